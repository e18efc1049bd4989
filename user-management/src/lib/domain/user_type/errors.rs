use thiserror::Error;

use crate::user::errors::NameError;

/// Error for UserTypeId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserTypeIdError {
    #[error("Invalid user type id: {0}")]
    InvalidFormat(String),
}

/// Top-level error for user type operations
#[derive(Debug, Clone, Error)]
pub enum UserTypeError {
    #[error("Invalid user type id: {0}")]
    InvalidId(#[from] UserTypeIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("User type not found: {0}")]
    NotFound(String),

    #[error("User type name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("User type {0} is referenced by existing users")]
    InUse(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserTypeError {
    fn from(err: anyhow::Error) -> Self {
        UserTypeError::Unknown(err.to_string())
    }
}
