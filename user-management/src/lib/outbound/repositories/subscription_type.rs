use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use super::violation;
use super::Violation;
use crate::domain::subscription_type::errors::SubscriptionTypeError;
use crate::domain::subscription_type::models::Plan;
use crate::domain::subscription_type::models::ProductKey;
use crate::domain::subscription_type::models::SubscriptionType;
use crate::domain::subscription_type::models::SubscriptionTypeDraft;
use crate::domain::subscription_type::models::SubscriptionTypeId;
use crate::domain::subscription_type::ports::SubscriptionTypeRepository;
use crate::domain::user::models::Name;

const SUBSCRIPTION_TYPE_COLUMNS: &str = "id, name, access_months, price_cents, product_key";

pub struct PostgresSubscriptionTypeRepository {
    pool: PgPool,
}

impl PostgresSubscriptionTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        let sql = format!(
            "SELECT {} FROM subscription_types WHERE {}",
            SUBSCRIPTION_TYPE_COLUMNS, predicate
        );
        sqlx::query_as::<_, SubscriptionTypeRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SubscriptionTypeError::DatabaseError(e.to_string()))?
            .map(SubscriptionType::try_from)
            .transpose()
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionTypeRow {
    id: i64,
    name: String,
    access_months: Option<i32>,
    price_cents: Option<i64>,
    product_key: Option<String>,
}

impl TryFrom<SubscriptionTypeRow> for SubscriptionType {
    type Error = SubscriptionTypeError;

    fn try_from(row: SubscriptionTypeRow) -> Result<Self, Self::Error> {
        Ok(SubscriptionType {
            id: SubscriptionTypeId(row.id),
            name: Name::new(row.name)?,
            plan: Plan::new(row.access_months, row.price_cents)?,
            product_key: row.product_key.as_deref().map(ProductKey::new).transpose()?,
        })
    }
}

fn map_write_error(e: sqlx::Error, draft: &SubscriptionTypeDraft) -> SubscriptionTypeError {
    match violation(&e) {
        Some(Violation::Unique("subscription_types_name_key")) => {
            SubscriptionTypeError::NameAlreadyExists(draft.name.to_string())
        }
        Some(Violation::Unique("subscription_types_product_key_key")) => {
            SubscriptionTypeError::ProductKeyAlreadyExists(
                draft
                    .product_key
                    .as_ref()
                    .map(ProductKey::to_string)
                    .unwrap_or_default(),
            )
        }
        _ => SubscriptionTypeError::DatabaseError(e.to_string()),
    }
}

#[async_trait]
impl SubscriptionTypeRepository for PostgresSubscriptionTypeRepository {
    async fn list_all(&self) -> Result<Vec<SubscriptionType>, SubscriptionTypeError> {
        let sql = format!(
            "SELECT {} FROM subscription_types ORDER BY id",
            SUBSCRIPTION_TYPE_COLUMNS
        );
        sqlx::query_as::<_, SubscriptionTypeRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SubscriptionTypeError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(SubscriptionType::try_from)
            .collect()
    }

    async fn find_by_id(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        let sql = format!(
            "SELECT {} FROM subscription_types WHERE id = $1",
            SUBSCRIPTION_TYPE_COLUMNS
        );
        sqlx::query_as::<_, SubscriptionTypeRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SubscriptionTypeError::DatabaseError(e.to_string()))?
            .map(SubscriptionType::try_from)
            .transpose()
    }

    async fn find_by_product_key(
        &self,
        product_key: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        self.fetch_one_where("product_key = $1", product_key).await
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        self.fetch_one_where("name = $1", name).await
    }

    async fn create(
        &self,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        let sql = format!(
            r#"
            INSERT INTO subscription_types (name, access_months, price_cents, product_key)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SUBSCRIPTION_TYPE_COLUMNS
        );

        let row = sqlx::query_as::<_, SubscriptionTypeRow>(&sql)
            .bind(draft.name.as_str())
            .bind(draft.plan.access_months())
            .bind(draft.plan.price_cents())
            .bind(draft.product_key.as_ref().map(ProductKey::as_str))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &draft))?;

        SubscriptionType::try_from(row)
    }

    async fn update(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        let sql = format!(
            r#"
            UPDATE subscription_types
            SET name = $1, access_months = $2, price_cents = $3, product_key = $4
            WHERE id = $5
            RETURNING {}
            "#,
            SUBSCRIPTION_TYPE_COLUMNS
        );

        let id = subscription_type.id;
        let draft = SubscriptionTypeDraft {
            name: subscription_type.name,
            plan: subscription_type.plan,
            product_key: subscription_type.product_key,
        };

        sqlx::query_as::<_, SubscriptionTypeRow>(&sql)
            .bind(draft.name.as_str())
            .bind(draft.plan.access_months())
            .bind(draft.plan.price_cents())
            .bind(draft.product_key.as_ref().map(ProductKey::as_str))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &draft))?
            .ok_or(SubscriptionTypeError::NotFound(id.to_string()))
            .and_then(SubscriptionType::try_from)
    }

    async fn delete(&self, id: &SubscriptionTypeId) -> Result<(), SubscriptionTypeError> {
        let result = sqlx::query("DELETE FROM subscription_types WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey(_)) => SubscriptionTypeError::InUse(id.to_string()),
                _ => SubscriptionTypeError::DatabaseError(e.to_string()),
            })?;

        if result.rows_affected() == 0 {
            return Err(SubscriptionTypeError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
