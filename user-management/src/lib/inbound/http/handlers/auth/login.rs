use axum::extract::State;
use serde::Deserialize;

use crate::account::models::LoginCommand;
use crate::inbound::http::handlers::auth::AuthResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let command = body.try_into_command()?;
    tracing::info!(identifier = %command.username_or_email, "Login requested");

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::ok(session.into()))
}

/// HTTP request body for login (raw JSON)
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    username_or_email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, FieldErrors> {
        let username_or_email = self.username_or_email.trim().to_string();

        let mut errors = FieldErrors::default();
        if username_or_email.is_empty() {
            errors.add("usernameOrEmail", "Username or email is required");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoginCommand {
            username_or_email,
            password: self.password,
        })
    }
}
