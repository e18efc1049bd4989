use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use super::violation;
use super::Violation;
use crate::domain::user::models::Name;
use crate::domain::user_type::errors::UserTypeError;
use crate::domain::user_type::models::UserType;
use crate::domain::user_type::models::UserTypeDraft;
use crate::domain::user_type::models::UserTypeId;
use crate::domain::user_type::ports::UserTypeRepository;

pub struct PostgresUserTypeRepository {
    pool: PgPool,
}

impl PostgresUserTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserTypeRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl TryFrom<UserTypeRow> for UserType {
    type Error = UserTypeError;

    fn try_from(row: UserTypeRow) -> Result<Self, Self::Error> {
        Ok(UserType {
            id: UserTypeId(row.id),
            name: Name::new(row.name)?,
            description: row.description,
        })
    }
}

fn map_write_error(e: sqlx::Error, name: &Name) -> UserTypeError {
    match violation(&e) {
        Some(Violation::Unique("user_types_name_key")) => {
            UserTypeError::NameAlreadyExists(name.to_string())
        }
        _ => UserTypeError::DatabaseError(e.to_string()),
    }
}

#[async_trait]
impl UserTypeRepository for PostgresUserTypeRepository {
    async fn list_all(&self) -> Result<Vec<UserType>, UserTypeError> {
        sqlx::query_as::<_, UserTypeRow>("SELECT id, name, description FROM user_types ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserTypeError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(UserType::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: &UserTypeId) -> Result<Option<UserType>, UserTypeError> {
        sqlx::query_as::<_, UserTypeRow>("SELECT id, name, description FROM user_types WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserTypeError::DatabaseError(e.to_string()))?
            .map(UserType::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UserType>, UserTypeError> {
        sqlx::query_as::<_, UserTypeRow>(
            "SELECT id, name, description FROM user_types WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserTypeError::DatabaseError(e.to_string()))?
        .map(UserType::try_from)
        .transpose()
    }

    async fn create(&self, draft: UserTypeDraft) -> Result<UserType, UserTypeError> {
        let row = sqlx::query_as::<_, UserTypeRow>(
            r#"
            INSERT INTO user_types (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(draft.name.as_str())
        .bind(draft.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;

        UserType::try_from(row)
    }

    async fn update(&self, user_type: UserType) -> Result<UserType, UserTypeError> {
        sqlx::query_as::<_, UserTypeRow>(
            r#"
            UPDATE user_types SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, description
            "#,
        )
        .bind(user_type.name.as_str())
        .bind(user_type.description.as_deref())
        .bind(user_type.id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user_type.name))?
        .ok_or(UserTypeError::NotFound(user_type.id.to_string()))
        .and_then(UserType::try_from)
    }

    async fn delete(&self, id: &UserTypeId) -> Result<(), UserTypeError> {
        let result = sqlx::query("DELETE FROM user_types WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey(_)) => UserTypeError::InUse(id.to_string()),
                _ => UserTypeError::DatabaseError(e.to_string()),
            })?;

        if result.rows_affected() == 0 {
            return Err(UserTypeError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
