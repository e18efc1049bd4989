use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;

use super::violation;
use super::Violation;
use crate::domain::account::models::EmailAddress;
use crate::domain::subscription_type::models::SubscriptionTypeId;
use crate::domain::user::models::Cpf;
use crate::domain::user::models::Name;
use crate::domain::user::models::Phone;
use crate::domain::user::models::SubscriptionPeriod;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user_type::models::UserTypeId;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, name, email, phone, cpf, dt_subscription, dt_expiration, \
     user_type_id, subscription_type_id";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, predicate: &str, value: &str) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, predicate);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    cpf: Option<String>,
    dt_subscription: Option<NaiveDate>,
    dt_expiration: Option<NaiveDate>,
    user_type_id: Option<i64>,
    subscription_type_id: Option<i64>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: Name::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            phone: row.phone.as_deref().map(Phone::new).transpose()?,
            cpf: row.cpf.as_deref().map(Cpf::new).transpose()?,
            period: SubscriptionPeriod::new(row.dt_subscription, row.dt_expiration)?,
            user_type_id: row.user_type_id.map(UserTypeId),
            subscription_type_id: row.subscription_type_id.map(SubscriptionTypeId),
        })
    }
}

/// Bind the draft columns in `USER_COLUMNS` order, without `id`.
fn bind_draft<'q>(
    query: QueryAs<'q, Postgres, UserRow, PgArguments>,
    draft: &'q UserDraft,
) -> QueryAs<'q, Postgres, UserRow, PgArguments> {
    query
        .bind(draft.name.as_str())
        .bind(draft.email.as_str())
        .bind(draft.phone.as_ref().map(Phone::as_str))
        .bind(draft.cpf.as_ref().map(Cpf::as_str))
        .bind(draft.period.subscription())
        .bind(draft.period.expiration())
        .bind(draft.user_type_id.map(|id| id.0))
        .bind(draft.subscription_type_id.map(|id| id.0))
}

fn map_write_error(e: sqlx::Error, draft: &UserDraft) -> UserError {
    let field = |value: Option<&str>| value.unwrap_or_default().to_string();

    match violation(&e) {
        Some(Violation::Unique("users_email_key")) => {
            UserError::EmailAlreadyExists(draft.email.to_string())
        }
        Some(Violation::Unique("users_phone_key")) => {
            UserError::PhoneAlreadyExists(field(draft.phone.as_ref().map(Phone::as_str)))
        }
        Some(Violation::Unique("users_cpf_key")) => {
            UserError::CpfAlreadyExists(field(draft.cpf.as_ref().map(Cpf::as_str)))
        }
        Some(Violation::ForeignKey("users_user_type_id_fkey")) => {
            UserError::UnknownReference("user type".to_string())
        }
        Some(Violation::ForeignKey("users_subscription_type_id_fkey")) => {
            UserError::UnknownReference("subscription type".to_string())
        }
        _ => UserError::DatabaseError(e.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.fetch_one_where("email = $1", email).await
    }

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, UserError> {
        self.fetch_one_where("phone = $1", phone.as_str()).await
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, UserError> {
        self.fetch_one_where("cpf = $1", cpf.as_str()).await
    }

    async fn create(&self, draft: UserDraft) -> Result<User, UserError> {
        let sql = format!(
            r#"
            INSERT INTO users (name, email, phone, cpf, dt_subscription, dt_expiration,
                user_type_id, subscription_type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = bind_draft(sqlx::query_as::<_, UserRow>(&sql), &draft)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &draft))?;

        User::try_from(row)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = $1, email = $2, phone = $3, cpf = $4, dt_subscription = $5,
                dt_expiration = $6, user_type_id = $7, subscription_type_id = $8
            WHERE id = $9
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let id = user.id;
        let draft = UserDraft {
            name: user.name,
            email: user.email,
            phone: user.phone,
            cpf: user.cpf,
            period: user.period,
            user_type_id: user.user_type_id,
            subscription_type_id: user.subscription_type_id,
        };

        let row = bind_draft(sqlx::query_as::<_, UserRow>(&sql), &draft)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &draft))?
            .ok_or(UserError::NotFound(id.to_string()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
