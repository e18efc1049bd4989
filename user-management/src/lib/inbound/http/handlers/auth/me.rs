use axum::extract::State;
use axum::Extension;

use crate::inbound::http::handlers::auth::UserInfoData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::BearerToken;
use crate::inbound::http::router::AppState;

/// Account behind the bearer token already checked by the auth middleware.
pub async fn me(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<ApiSuccess<UserInfoData>, ApiError> {
    state
        .auth_service
        .account_from_token(&token)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::ok(account.into()))
}
