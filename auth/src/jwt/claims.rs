use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Purpose of a token. Access tokens authorize API calls; refresh tokens
/// may only be exchanged for a new token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account username)
    pub sub: String,

    /// Role of the account at issuance time
    pub role: String,

    /// Access or refresh
    pub token_type: TokenKind,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Create claims expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `role` - Role name embedded for authorization checks
    /// * `kind` - Access or refresh
    /// * `ttl` - Lifetime; a negative value yields an already expired token
    pub fn new(subject: impl ToString, role: impl ToString, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            token_type: kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: None,
        }
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("alice", "USER", TokenKind::Access, Duration::hours(24));

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.token_type, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(claims.iss.is_none());
    }

    #[test]
    fn test_token_kind_wire_format() {
        let claims = Claims::new("bob", "ADMIN", TokenKind::Refresh, Duration::days(7))
            .with_issuer("user-management");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["token_type"], "refresh");
        assert_eq!(json["iss"], "user-management");
        assert_eq!(json["sub"], "bob");
    }

    #[test]
    fn test_issuer_omitted_when_absent() {
        let claims = Claims::new("bob", "ADMIN", TokenKind::Access, Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("iss").is_none());
    }
}
