use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_management::account::ports::AuthServicePort;
use user_management::account::service::AuthService;
use user_management::config::Config;
use user_management::inbound::http::router::create_router;
use user_management::inbound::http::router::AppState;
use user_management::outbound::repositories::PostgresAccountRepository;
use user_management::outbound::repositories::PostgresSubscriptionTypeRepository;
use user_management::outbound::repositories::PostgresUserRepository;
use user_management::outbound::repositories::PostgresUserTypeRepository;
use user_management::subscription_type::ports::SubscriptionTypeServicePort;
use user_management::subscription_type::service::SubscriptionTypeService;
use user_management::user::ports::UserServicePort;
use user_management::user::service::UserService;
use user_management::user_type::ports::UserTypeServicePort;
use user_management::user_type::service::UserTypeService;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_management=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-management",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_expiration_hours = config.jwt.access_expiration_hours,
        refresh_expiration_hours = config.jwt.refresh_expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let mut token_issuer = TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_ttl(),
        config.jwt.refresh_ttl(),
    );
    if let Some(issuer) = &config.jwt.issuer {
        token_issuer = token_issuer.with_issuer(issuer);
    }
    let authenticator = Arc::new(Authenticator::from_parts(
        PasswordHasher::new(),
        token_issuer,
    ));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let user_type_repository = Arc::new(PostgresUserTypeRepository::new(pg_pool.clone()));
    let subscription_type_repository =
        Arc::new(PostgresSubscriptionTypeRepository::new(pg_pool));

    let auth_service: Arc<dyn AuthServicePort> =
        Arc::new(AuthService::new(account_repository, authenticator));
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repository));
    let user_type_service: Arc<dyn UserTypeServicePort> =
        Arc::new(UserTypeService::new(user_type_repository));
    let subscription_type_service: Arc<dyn SubscriptionTypeServicePort> =
        Arc::new(SubscriptionTypeService::new(subscription_type_repository));

    let http_application = create_router(AppState {
        auth_service,
        user_service,
        user_type_service,
        subscription_type_service,
    });

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
