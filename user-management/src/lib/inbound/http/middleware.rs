use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::account::models::Role;
use crate::account::models::RoleSet;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ACCESS_DENIED;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub username: String,
    pub role: Role,
}

/// Raw access token of the current request, already validated.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Middleware that validates the bearer access token and adds the account to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_string();

    let principal = state
        .auth_service
        .authenticate_access_token(&token)
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Bearer token rejected");
            ApiError::token()
        })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        username: principal.username,
        role: principal.role,
    });
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}

/// Middleware that admits only the roles in its state.
///
/// Must run inside `authenticate`.
pub async fn authorize(
    State(allowed): State<RoleSet>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let account = req
        .extensions()
        .get::<AuthenticatedAccount>()
        .ok_or_else(ApiError::credentials)?;

    if !allowed.contains(account.role) {
        tracing::warn!(
            username = %account.username,
            role = %account.role,
            method = %req.method(),
            uri = %req.uri(),
            "Access denied"
        );
        return Err(ApiError::Forbidden(ACCESS_DENIED.to_string()));
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(ApiError::credentials)?;

    let auth_str = auth_header.to_str().map_err(|_| ApiError::credentials())?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(ApiError::credentials)
}
