use chrono::Duration;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues and validates the access/refresh tokens of one signing secret.
///
/// Tokens are self-contained: nothing is stored server side, so a token
/// stays valid until it expires.
pub struct TokenIssuer {
    handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
    issuer: Option<String>,
}

impl TokenIssuer {
    /// Create a token issuer.
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret shared by issuance and validation
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            access_ttl,
            refresh_ttl,
            issuer: None,
        }
    }

    /// Stamp tokens with `iss` and reject tokens from any other issuer.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        let issuer = issuer.to_string();
        self.handler = self.handler.with_issuer(&issuer);
        self.issuer = Some(issuer);
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issue a signed access token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_access_token(&self, subject: &str, role: &str) -> Result<String, JwtError> {
        self.issue(subject, role, TokenKind::Access, self.access_ttl)
    }

    /// Issue a signed refresh token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_refresh_token(&self, subject: &str, role: &str) -> Result<String, JwtError> {
        self.issue(subject, role, TokenKind::Refresh, self.refresh_ttl)
    }

    fn issue(
        &self,
        subject: &str,
        role: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let mut claims = Claims::new(subject, role, kind, ttl);
        if let Some(issuer) = &self.issuer {
            claims = claims.with_issuer(issuer);
        }
        self.handler.encode(&claims)
    }

    /// Check signature, structure and expiry of a token of either kind.
    ///
    /// Never panics on arbitrary input; every failure is `false`.
    pub fn validate(&self, token: &str) -> bool {
        match self.handler.decode::<Claims>(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                false
            }
        }
    }

    /// Decode a token and require it to be of `kind`.
    ///
    /// # Errors
    /// * `TokenExpired` / `InvalidToken` - Token does not validate
    /// * `WrongTokenKind` - Valid token of the other kind
    pub fn decode(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.token_type != kind {
            return Err(JwtError::WrongTokenKind {
                expected: kind,
                actual: claims.token_type,
            });
        }

        Ok(claims)
    }

    /// Subject of a token, re-validating it first.
    ///
    /// # Errors
    /// * `TokenExpired` / `InvalidToken` - Token does not validate
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        self.handler
            .decode::<Claims>(token)
            .map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::hours(24), Duration::days(7))
    }

    #[test]
    fn test_access_token_validates_and_carries_claims() {
        let issuer = issuer();
        let token = issuer.issue_access_token("alice", "USER").unwrap();

        assert!(issuer.validate(&token));
        assert_eq!(issuer.extract_subject(&token).unwrap(), "alice");

        let claims = issuer.decode(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_token_has_longer_lifetime() {
        let issuer = issuer();
        let token = issuer.issue_refresh_token("alice", "USER").unwrap();

        let claims = issuer.decode(&token, TokenKind::Refresh).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let issuer = issuer();
        let access = issuer.issue_access_token("alice", "USER").unwrap();
        let refresh = issuer.issue_refresh_token("alice", "USER").unwrap();

        assert_eq!(
            issuer.decode(&access, TokenKind::Refresh),
            Err(JwtError::WrongTokenKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            })
        );
        assert!(issuer.decode(&refresh, TokenKind::Access).is_err());
        // Plain validation is kind-agnostic
        assert!(issuer.validate(&refresh));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let issuer = TokenIssuer::new(SECRET, Duration::seconds(-1), Duration::seconds(-1));
        let token = issuer.issue_access_token("alice", "USER").unwrap();

        assert!(!issuer.validate(&token));
        assert_eq!(issuer.extract_subject(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let other = TokenIssuer::new(
            b"another_secret_key_at_least_32_bytes",
            Duration::hours(1),
            Duration::hours(1),
        );
        let token = other.issue_access_token("mallory", "ADMIN").unwrap();

        assert!(!issuer().validate(&token));
        assert!(issuer().extract_subject(&token).is_err());
    }

    #[test]
    fn test_any_single_altered_character_is_invalid() {
        let issuer = issuer();
        let token = issuer.issue_access_token("alice", "USER").unwrap();

        for (index, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(index..index + 1, &replacement.to_string());

            assert!(
                !issuer.validate(&tampered),
                "altering position {} was not detected",
                index
            );
        }
    }

    #[test]
    fn test_garbage_input_is_invalid() {
        let issuer = issuer();

        for input in ["", ".", "..", "a.b.c", "not a token", "é.ü.ß"] {
            assert!(!issuer.validate(input));
            assert!(issuer.extract_subject(input).is_err());
        }
    }

    #[test]
    fn test_issuer_stamped_and_enforced() {
        let stamped = issuer().with_issuer("user-management");
        let token = stamped.issue_access_token("alice", "USER").unwrap();

        let claims = stamped.decode(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.iss.as_deref(), Some("user-management"));

        let unstamped = issuer().issue_access_token("alice", "USER").unwrap();
        assert!(!stamped.validate(&unstamped));
    }
}
