use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use super::violation;
use super::Violation;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::account::errors::AccountError;

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, role, enabled, \
     account_non_locked, account_non_expired, credentials_non_expired, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<Account>, AccountError> {
        let sql = format!("SELECT {} FROM accounts WHERE {}", ACCOUNT_COLUMNS, predicate);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }

    async fn exists_where(&self, predicate: &str, value: &str) -> Result<bool, AccountError> {
        let sql = format!("SELECT EXISTS (SELECT 1 FROM accounts WHERE {})", predicate);
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    enabled: bool,
    account_non_locked: bool,
    account_non_expired: bool,
    credentials_non_expired: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            role: row
                .role
                .parse()
                .map_err(|e| AccountError::DatabaseError(format!("Corrupt account row: {}", e)))?,
            status: AccountStatus {
                enabled: row.enabled,
                account_non_locked: row.account_non_locked,
                account_non_expired: row.account_non_expired,
                credentials_non_expired: row.credentials_non_expired,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        self.fetch_one_where("username = $1", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.fetch_one_where("email = $1", email).await
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError> {
        // Usernames cannot contain '@', so at most one row matches
        self.fetch_one_where("username = $1 OR email = $1", identifier)
            .await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        self.exists_where("username = $1", username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError> {
        self.exists_where("email = $1", email).await
    }

    async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
        let sql = format!(
            r#"
            INSERT INTO accounts (username, email, password_hash, role, enabled,
                account_non_locked, account_non_expired, credentials_non_expired)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account.username.as_str())
            .bind(account.email.as_str())
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(account.status.enabled)
            .bind(account.status.account_non_locked)
            .bind(account.status.account_non_expired)
            .bind(account.status.credentials_non_expired)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::Unique("accounts_username_key")) => {
                    AccountError::UsernameAlreadyExists(account.username.to_string())
                }
                Some(Violation::Unique("accounts_email_key")) => {
                    AccountError::EmailAlreadyExists(account.email.to_string())
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;

        Account::try_from(row)
    }
}
