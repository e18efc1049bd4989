use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;
use auth::TokenKind;
use auth::TokenPair;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountStatus;
use crate::account::models::AuthSession;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::Principal;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

/// Domain service implementation for authentication flows.
///
/// Tokens carry the username as subject. Password hashing runs on the
/// blocking pool.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_session(&self, account: Account) -> Result<AuthSession, AccountError> {
        let tokens: TokenPair = self
            .authenticator
            .issue_tokens(account.username.as_str(), account.role.as_str())
            .map_err(|e| AccountError::TokenIssuance(e.to_string()))?;

        Ok(AuthSession { tokens, account })
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &password_hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))?
            .map_err(|e| AccountError::Unknown(format!("Password verification failed: {}", e)))
    }
}

#[async_trait]
impl<AR> AuthServicePort for AuthService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError> {
        if self
            .repository
            .exists_by_username(command.username.as_str())
            .await?
        {
            return Err(AccountError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self.repository.exists_by_email(command.email.as_str()).await? {
            return Err(AccountError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password.into_inner()).await?;

        // The store re-checks uniqueness atomically for concurrent registrations
        let account = self
            .repository
            .save(NewAccount {
                username: command.username,
                email: command.email,
                password_hash,
                role: Role::User,
                status: AccountStatus::active(),
            })
            .await?;

        tracing::info!(account_id = %account.id, username = %account.username, "Account registered");

        self.issue_session(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError> {
        let Some(account) = self
            .repository
            .find_by_username_or_email(&command.username_or_email)
            .await?
        else {
            tracing::warn!(identifier = %command.username_or_email, "Login for unknown account");
            return Err(AccountError::InvalidCredentials);
        };

        let matches = self
            .verify_password(command.password, account.password_hash.clone())
            .await?;
        if !matches {
            tracing::warn!(username = %account.username, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        if let Err(e) = account.ensure_usable() {
            tracing::warn!(username = %account.username, reason = %e, "Login for unusable account");
            return Err(e);
        }

        tracing::info!(username = %account.username, "Account logged in");

        self.issue_session(account)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AccountError> {
        let claims = self
            .authenticator
            .decode_token(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Refresh token rejected");
                AccountError::InvalidToken
            })?;

        let account = self
            .repository
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AccountError::NotFound(claims.sub.clone()))?;

        account.ensure_usable()?;

        self.issue_session(account)
    }

    fn validate_token(&self, token: &str) -> bool {
        self.authenticator.validate_token(token)
    }

    fn authenticate_access_token(&self, token: &str) -> Result<Principal, AccountError> {
        let claims = self
            .authenticator
            .decode_token(token, TokenKind::Access)
            .map_err(|e: JwtError| {
                tracing::debug!(reason = %e, "Access token rejected");
                AccountError::InvalidToken
            })?;

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| AccountError::InvalidToken)?;

        Ok(Principal {
            username: claims.sub,
            role,
        })
    }

    async fn account_from_token(&self, token: &str) -> Result<Account, AccountError> {
        let username = self
            .authenticator
            .extract_subject(token)
            .map_err(|_| AccountError::InvalidToken)?;

        self.repository
            .find_by_username(&username)
            .await?
            .ok_or(AccountError::NotFound(username))
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use auth::TokenIssuer;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::account::models::AccountId;
    use crate::account::models::EmailAddress;
    use crate::account::models::Password;
    use crate::account::models::Username;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>, AccountError>;
            async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError>;
            async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError>;
            async fn save(&self, account: NewAccount) -> Result<Account, AccountError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::from_parts(
            PasswordHasher::with_params(1024, 1, 1).unwrap(),
            TokenIssuer::new(SECRET, Duration::hours(24), Duration::days(7)),
        ))
    }

    fn stored_account(authenticator: &Authenticator, username: &str, password: &str) -> Account {
        Account {
            id: AccountId(1),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            role: Role::User,
            status: AccountStatus::active(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn persisted(account: NewAccount) -> Account {
        Account {
            id: AccountId(7),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            status: account.status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register_command(username: &str, email: &str) -> RegisterCommand {
        RegisterCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("Secret123!".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_save()
            .withf(|account| {
                account.username.as_str() == "alice"
                    && account.role == Role::User
                    && account.status == AccountStatus::active()
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|account| Ok(persisted(account)));

        let authenticator = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service
            .register(register_command("alice", "alice@x.com"))
            .await
            .unwrap();

        assert_eq!(session.account.id, AccountId(7));
        assert_eq!(session.tokens.expires_in, 86_400);
        assert!(authenticator
            .verify_password("Secret123!", &session.account.password_hash)
            .unwrap());
        assert_eq!(
            authenticator
                .extract_subject(&session.tokens.access_token)
                .unwrap(),
            "alice"
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_save().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command("alice", "other@x.com")).await;
        assert!(matches!(
            result,
            Err(AccountError::UsernameAlreadyExists(name)) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_exists_by_username()
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_save().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command("bob", "alice@x.com")).await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_race_lost_at_store() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_exists_by_username()
            .returning(|_| Ok(false));
        repository.expect_exists_by_email().returning(|_| Ok(false));
        repository
            .expect_save()
            .times(1)
            .returning(|account| Err(AccountError::UsernameAlreadyExists(account.username.to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command("alice", "alice@x.com")).await;
        assert!(matches!(result, Err(AccountError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_by_username_or_email() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "alice", "Secret123!");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_username_or_email()
            .times(2)
            .returning(move |identifier| {
                if identifier == "alice" || identifier == "alice@example.com" {
                    Ok(Some(account.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        for identifier in ["alice", "alice@example.com"] {
            let session = service
                .login(LoginCommand {
                    username_or_email: identifier.to_string(),
                    password: "Secret123!".to_string(),
                })
                .await
                .unwrap();
            assert_eq!(session.account.username.as_str(), "alice");
        }
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "alice", "Secret123!");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_username_or_email()
            .returning(move |identifier| {
                Ok((identifier == "alice").then(|| account.clone()))
            });

        let service = AuthService::new(Arc::new(repository), authenticator);

        let wrong = service
            .login(LoginCommand {
                username_or_email: "alice".to_string(),
                password: "nope-nope".to_string(),
            })
            .await;
        let unknown = service
            .login(LoginCommand {
                username_or_email: "ghost".to_string(),
                password: "Secret123!".to_string(),
            })
            .await;

        assert!(matches!(wrong, Err(AccountError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_disabled_account() {
        let authenticator = authenticator();
        let mut account = stored_account(&authenticator, "alice", "Secret123!");
        account.status.enabled = false;

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_username_or_email()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service
            .login(LoginCommand {
                username_or_email: "alice".to_string(),
                password: "Secret123!".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::AccountDisabled)));
    }

    #[tokio::test]
    async fn test_refresh_requires_refresh_token() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "alice", "Secret123!");
        let pair = authenticator.issue_tokens("alice", "USER").unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let refreshed = service.refresh(&pair.refresh_token).await.unwrap();
        assert!(authenticator.validate_token(&refreshed.tokens.access_token));

        assert!(matches!(
            service.refresh(&pair.access_token).await,
            Err(AccountError::InvalidToken)
        ));
        assert!(matches!(
            service.refresh("garbage").await,
            Err(AccountError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_for_vanished_account() {
        let authenticator = authenticator();
        let pair = authenticator.issue_tokens("ghost", "USER").unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator);

        assert!(matches!(
            service.refresh(&pair.refresh_token).await,
            Err(AccountError::NotFound(name)) if name == "ghost"
        ));
    }

    #[tokio::test]
    async fn test_authenticate_access_token() {
        let authenticator = authenticator();
        let pair = authenticator.issue_tokens("carol", "MODERATOR").unwrap();
        let bogus_role = authenticator.issue_tokens("carol", "ROOT").unwrap();

        let service = AuthService::new(
            Arc::new(MockTestAccountRepository::new()),
            authenticator,
        );

        assert_eq!(
            service.authenticate_access_token(&pair.access_token).unwrap(),
            Principal {
                username: "carol".to_string(),
                role: Role::Moderator,
            }
        );
        assert!(service
            .authenticate_access_token(&pair.refresh_token)
            .is_err());
        assert!(service
            .authenticate_access_token(&bogus_role.access_token)
            .is_err());
        assert!(service.validate_token(&pair.refresh_token));
        assert!(!service.validate_token("x.y.z"));
    }
}
