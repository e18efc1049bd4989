use thiserror::Error;

use super::claims::TokenKind;

/// Error type for JWT operations.
///
/// The variants exist for logging. Callers deciding what to tell a client
/// should treat every decoding variant as the same "invalid token".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Expected {expected} token, got {actual}")]
    WrongTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}
