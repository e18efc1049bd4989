use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth;
use super::handlers::subscription_types;
use super::handlers::user_types;
use super::handlers::users;
use super::middleware::authenticate;
use super::middleware::authorize;
use crate::account::models::RoleSet;
use crate::account::ports::AuthServicePort;
use crate::subscription_type::ports::SubscriptionTypeServicePort;
use crate::user::ports::UserServicePort;
use crate::user_type::ports::UserTypeServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub user_type_service: Arc<dyn UserTypeServicePort>,
    pub subscription_type_service: Arc<dyn SubscriptionTypeServicePort>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/validate", post(auth::validate))
        .route("/auth/health", get(auth::health));

    let any_role_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user).put(users::update_user))
        .route("/users/email/:email", get(users::get_user_by_email))
        .route("/users/phone/:phone", get(users::get_user_by_phone))
        .route("/users/cpf/:cpf", get(users::get_user_by_cpf))
        .route("/user-types", get(user_types::list_user_types))
        .route("/user-types/:id", get(user_types::get_user_type))
        .route(
            "/user-types/name/:name",
            get(user_types::get_user_type_by_name),
        )
        .route(
            "/subscription-types",
            get(subscription_types::list_subscription_types),
        )
        .route(
            "/subscription-types/:id",
            get(subscription_types::get_subscription_type),
        )
        .route(
            "/subscription-types/product-key/:product_key",
            get(subscription_types::get_subscription_type_by_product_key),
        )
        .route(
            "/subscription-types/name/:name",
            get(subscription_types::get_subscription_type_by_name),
        )
        .route_layer(middleware::from_fn_with_state(RoleSet::ANY, authorize));

    let staff_routes = Router::new()
        .route("/users", post(users::create_user))
        .route("/user-types", post(user_types::create_user_type))
        .route("/user-types/:id", put(user_types::update_user_type))
        .route(
            "/subscription-types",
            post(subscription_types::create_subscription_type),
        )
        .route(
            "/subscription-types/:id",
            put(subscription_types::update_subscription_type),
        )
        .route_layer(middleware::from_fn_with_state(RoleSet::STAFF, authorize));

    let admin_routes = Router::new()
        .route("/users/:id", delete(users::delete_user))
        .route("/user-types/:id", delete(user_types::delete_user_type))
        .route(
            "/subscription-types/:id",
            delete(subscription_types::delete_subscription_type),
        )
        .route_layer(middleware::from_fn_with_state(RoleSet::ADMIN, authorize));

    // Authentication wraps every tier, so it runs before the role checks
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .merge(any_role_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin, with credentials; origin and headers are mirrored back.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
