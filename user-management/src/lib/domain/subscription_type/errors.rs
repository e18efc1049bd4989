use thiserror::Error;

use crate::user::errors::NameError;

/// Error for SubscriptionTypeId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriptionTypeIdError {
    #[error("Invalid subscription type id: {0}")]
    InvalidFormat(String),
}

/// Error for subscription plan terms
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Access months must be positive, got {0}")]
    NonPositiveAccessMonths(i32),

    #[error("Price must not be negative, got {0}")]
    NegativePrice(i64),

    #[error("Product key must not be blank")]
    BlankProductKey,
}

/// Top-level error for subscription type operations
#[derive(Debug, Clone, Error)]
pub enum SubscriptionTypeError {
    #[error("Invalid subscription type id: {0}")]
    InvalidId(#[from] SubscriptionTypeIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid plan: {0}")]
    InvalidPlan(#[from] PlanError),

    #[error("Subscription type not found: {0}")]
    NotFound(String),

    #[error("Subscription type name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Product key already exists: {0}")]
    ProductKeyAlreadyExists(String),

    #[error("Subscription type {0} is referenced by existing users")]
    InUse(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for SubscriptionTypeError {
    fn from(err: anyhow::Error) -> Self {
        SubscriptionTypeError::Unknown(err.to_string())
    }
}
