use std::collections::BTreeMap;
use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::subscription_type::errors::SubscriptionTypeError;
use crate::user::errors::UserError;
use crate::user_type::errors::UserTypeError;

pub mod auth;
pub mod subscription_types;
pub mod user_types;
pub mod users;

/// Message of every credential failure, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials or authentication token";
/// Message of every rejected bearer or refresh token.
pub const INVALID_TOKEN: &str = "Invalid or expired token";
pub const ACCESS_DENIED: &str = "You don't have permission to access this resource";
const INTERNAL_ERROR: &str = "An unexpected error occurred. Please try again later.";
const MALFORMED_JSON: &str = "Invalid JSON format in request body";
const REFERENCED_ENTITY: &str = "Cannot delete - resource is referenced by other entities";

/// Successful response with a bare JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Logged in full, answered with a generic message.
    InternalServerError(String),
    Validation(FieldErrors),
    MalformedJson,
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    IntegrityViolation(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    pub fn credentials() -> Self {
        ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
    }

    pub fn token() -> Self {
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

/// Uniform error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, error, message) = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    INTERNAL_ERROR.to_string(),
                )
            }
            ApiError::Validation(fields) => {
                details = Some(fields.0);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation Failed",
                    "Invalid input data".to_string(),
                )
            }
            ApiError::MalformedJson => (
                StatusCode::BAD_REQUEST,
                "Malformed JSON",
                MALFORMED_JSON.to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Invalid Argument", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Resource Not Found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "Duplicate Resource", msg),
            ApiError::IntegrityViolation(msg) => {
                (StatusCode::CONFLICT, "Data Integrity Violation", msg)
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "Authentication Failed", msg)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "Access Denied", msg),
        };

        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Per-field validation messages collected while parsing a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Keep the value of `result`, or record its error under `field`.
    pub fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.insert(field.to_string(), e.to_string());
                None
            }
        }
    }

    pub fn add(&mut self, field: &str, message: impl ToString) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// `Json` extractor answering rejections with the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Request body rejected");
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                ApiError::MalformedJson
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UsernameAlreadyExists(_) | AccountError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials
            | AccountError::AccountDisabled
            | AccountError::AccountLocked
            | AccountError::AccountExpired
            | AccountError::CredentialsExpired => ApiError::credentials(),
            AccountError::InvalidToken => ApiError::token(),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidUsername(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            AccountError::TokenIssuance(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_)
            | UserError::PhoneAlreadyExists(_)
            | UserError::CpfAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPhone(_)
            | UserError::InvalidCpf(_)
            | UserError::InvalidPeriod(_)
            | UserError::UnknownReference(_) => ApiError::BadRequest(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<UserTypeError> for ApiError {
    fn from(err: UserTypeError) -> Self {
        match err {
            UserTypeError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserTypeError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserTypeError::InUse(_) => ApiError::IntegrityViolation(REFERENCED_ENTITY.to_string()),
            UserTypeError::InvalidId(_) | UserTypeError::InvalidName(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserTypeError::DatabaseError(_) | UserTypeError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<SubscriptionTypeError> for ApiError {
    fn from(err: SubscriptionTypeError) -> Self {
        match err {
            SubscriptionTypeError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SubscriptionTypeError::NameAlreadyExists(_)
            | SubscriptionTypeError::ProductKeyAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            SubscriptionTypeError::InUse(_) => {
                ApiError::IntegrityViolation(REFERENCED_ENTITY.to_string())
            }
            SubscriptionTypeError::InvalidId(_)
            | SubscriptionTypeError::InvalidName(_)
            | SubscriptionTypeError::InvalidPlan(_) => ApiError::BadRequest(err.to_string()),
            SubscriptionTypeError::DatabaseError(_) | SubscriptionTypeError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}
