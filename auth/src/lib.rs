//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id) and password generation
//! - Access/refresh JWT issuance and validation
//! - Authentication coordination
//!
//! Services define their own account model and roles and adapt these
//! implementations; roles cross this boundary as plain strings.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenKind};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//!     Duration::days(7),
//! );
//! let token = issuer.issue_access_token("alice", "USER").unwrap();
//! assert!(issuer.validate(&token));
//! assert_eq!(issuer.extract_subject(&token).unwrap(), "alice");
//! assert!(issuer.decode(&token, TokenKind::Refresh).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//!     Duration::days(7),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue tokens
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let pair = auth.issue_tokens("alice", "USER").unwrap();
//! assert!(auth.validate_token(&pair.access_token));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordGenerator;
pub use password::PasswordHasher;
pub use password::PasswordStrength;
