use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::Principal;
use crate::account::models::RegisterCommand;

/// Port for registration, login and token operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account with role USER and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `command` - Username or email plus plaintext password
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `AccountDisabled` / `AccountLocked` / `AccountExpired` / `CredentialsExpired`
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The presented refresh token is not revoked.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, expired or not a refresh token
    /// * `NotFound` - Account named by the token no longer exists
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AccountError>;

    /// Whether a token of either kind validates. Never fails.
    fn validate_token(&self, token: &str) -> bool;

    /// Resolve an access token to the identity it carries, without a store lookup.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, expired, not an access token or with an unknown role
    fn authenticate_access_token(&self, token: &str) -> Result<Principal, AccountError>;

    /// Load the account named by an access token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token does not validate
    /// * `NotFound` - Account no longer exists
    async fn account_from_token(&self, token: &str) -> Result<Account, AccountError>;
}

/// Persistence operations for accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account whose username or email equals `identifier`.
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError>;

    /// Persist a new account atomically.
    ///
    /// # Returns
    /// Stored account with assigned id and timestamps
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username uniqueness violated
    /// * `EmailAlreadyExists` - Email uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, account: NewAccount) -> Result<Account, AccountError>;
}
