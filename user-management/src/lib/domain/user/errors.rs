use thiserror::Error;

use crate::account::errors::EmailError;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be blank")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for phone number validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number must have between {min} and {max} digits, optionally prefixed by '+'")]
    InvalidFormat { min: usize, max: usize },
}

/// Error for CPF validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CpfError {
    #[error("CPF must contain exactly 11 digits")]
    InvalidFormat,
}

/// Error for inconsistent subscription dates
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriptionPeriodError {
    #[error("Expiration date {expiration} is before subscription date {subscription}")]
    ExpiresBeforeStart {
        subscription: chrono::NaiveDate,
        expiration: chrono::NaiveDate,
    },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("Invalid CPF: {0}")]
    InvalidCpf(#[from] CpfError),

    #[error("Invalid subscription period: {0}")]
    InvalidPeriod(#[from] SubscriptionPeriodError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Phone already exists: {0}")]
    PhoneAlreadyExists(String),

    #[error("CPF already exists: {0}")]
    CpfAlreadyExists(String),

    #[error("Referenced {0} does not exist")]
    UnknownReference(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
