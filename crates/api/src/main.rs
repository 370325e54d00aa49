use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrumboard_ai::groq::GroqProvider;
use scrumboard_ai::{AiMediator, ProviderConfig};
use scrumboard_api::config::ServerConfig;
use scrumboard_api::router::build_app_router;
use scrumboard_api::state::AppState;
use scrumboard_core::board::store::BoardStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "scrumboard_api=debug,scrumboard_ai=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let provider_config = ProviderConfig::from_env().expect("Invalid AI provider configuration");
    tracing::info!(
        base_url = %provider_config.base_url,
        model = %provider_config.model,
        timeout_secs = provider_config.timeout_secs,
        stream = provider_config.stream,
        "Loaded AI provider configuration"
    );

    // --- Database ---
    let pool = scrumboard_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    scrumboard_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    scrumboard_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Board store ---
    let boards = BoardStore::open(&config.boards_file)
        .await
        .expect("Failed to load board file");
    tracing::info!(path = %config.boards_file, "Board store opened");

    // --- AI mediator ---
    let stream = provider_config.stream;
    let provider = GroqProvider::new(provider_config).expect("Failed to build AI provider");
    let mediator = AiMediator::new(Arc::new(provider)).with_streaming(stream);

    // --- App state ---
    let state = AppState {
        pool,
        mediator: Arc::new(mediator),
        boards: Arc::new(boards),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
