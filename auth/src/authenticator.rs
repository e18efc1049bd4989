use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Constructed once at startup and shared by reference; holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,
    /// JWT refresh token
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `access_ttl` - Access token lifetime
    /// * `refresh_ttl` - Refresh token lifetime
    pub fn new(jwt_secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(jwt_secret, access_ttl, refresh_ttl),
        }
    }

    /// Create an authenticator from already configured parts.
    pub fn from_parts(password_hasher: PasswordHasher, token_issuer: TokenIssuer) -> Self {
        Self {
            password_hasher,
            token_issuer,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// # Errors
    /// * `PasswordError` - Stored digest is unusable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used right after registration and by the refresh flow, where identity
    /// was established by other means.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_tokens(&self, subject: &str, role: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.token_issuer.issue_access_token(subject, role)?,
            refresh_token: self.token_issuer.issue_refresh_token(subject, role)?,
            expires_in: self.token_issuer.access_ttl().num_seconds(),
        })
    }

    /// Whether a token of either kind validates.
    pub fn validate_token(&self, token: &str) -> bool {
        self.token_issuer.validate(token)
    }

    /// Decode a token, requiring it to be of `kind`.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed or kind differs
    pub fn decode_token(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        self.token_issuer.decode(token, kind)
    }

    /// Validated subject of a token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        self.token_issuer.extract_subject(token)
    }
}
