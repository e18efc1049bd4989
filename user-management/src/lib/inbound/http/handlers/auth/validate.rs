use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::handlers::INVALID_TOKEN;
use crate::inbound::http::router::AppState;

/// Report whether a token of either kind is currently valid.
///
/// An invalid token is still a successful request; only a missing token is
/// rejected.
pub async fn validate(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ValidateRequest>,
) -> Result<ApiSuccess<ValidateResponseData>, ApiError> {
    let token = body.token.trim();
    if token.is_empty() {
        return Ok(ApiSuccess::new(
            StatusCode::BAD_REQUEST,
            ValidateResponseData::new(false, "Token not provided"),
        ));
    }

    let data = if state.auth_service.validate_token(token) {
        ValidateResponseData::new(true, "Valid token")
    } else {
        ValidateResponseData::new(false, INVALID_TOKEN)
    };

    Ok(ApiSuccess::ok(data))
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidateRequest {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub valid: bool,
    pub message: &'static str,
}

impl ValidateResponseData {
    fn new(valid: bool, message: &'static str) -> Self {
        Self { valid, message }
    }
}
