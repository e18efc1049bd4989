use axum::extract::State;
use serde::Deserialize;

use crate::inbound::http::handlers::auth::AuthResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RefreshRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    tracing::info!("Token refresh requested");

    let refresh_token = body.refresh_token.trim();
    if refresh_token.is_empty() {
        return Err(ApiError::BadRequest(
            "Refresh token is required".to_string(),
        ));
    }

    state
        .auth_service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::ok(session.into()))
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshRequest {
    refresh_token: String,
}
