use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::clients::HttpOrderClient;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        memory_store = config.uses_memory_store(),
        order_service = %config.order_service.base_url,
        basic_auth = config.basic_auth.is_some(),
        "Configuration loaded"
    );

    if config.jwt.secret().is_err() {
        tracing::warn!("JWT secret not set, login and protected routes will fail");
    }

    let authenticator = Arc::new(Authenticator::new(config.jwt.clone()));
    let order_client = Arc::new(HttpOrderClient::new(
        &config.order_service,
        config.basic_auth.clone(),
    )?);

    let user_service: Arc<dyn UserServicePort> = if config.uses_memory_store() {
        tracing::info!(database = "memory", "Using in-memory user store");
        let user_repository = Arc::new(InMemoryUserRepository::new());
        Arc::new(UserService::new(
            user_repository,
            order_client,
            Arc::clone(&authenticator),
        ))
    } else {
        let pg_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database.url)
            .await?;
        tracing::info!(
            max_connections = 5,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
        Arc::new(UserService::new(
            user_repository,
            order_client,
            Arc::clone(&authenticator),
        ))
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator, config.basic_auth);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
