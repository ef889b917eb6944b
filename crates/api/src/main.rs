use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use spycat_breeds::TheCatApiClient;
use spycat_core::cat::CatService;
use spycat_core::mission::MissionService;
use spycat_db::{PgCatStore, PgMissionStore};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spycat_api::config::ServerConfig;
use spycat_api::router::build_app_router;
use spycat_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spycat_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = spycat_db::connect_with_retry(
        &database_url,
        Duration::from_secs(config.db_connect_timeout_secs),
        Duration::from_secs(config.db_retry_interval_secs),
    )
    .await
    .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    spycat_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Breed catalog ---
    let breeds = TheCatApiClient::new(
        config.breed_catalog_url.clone(),
        Duration::from_secs(config.breed_catalog_timeout_secs),
    )
    .expect("Failed to build breed catalog client");
    tracing::info!(url = %config.breed_catalog_url, "Breed catalog client created");

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        cats: CatService::new(
            Arc::new(PgCatStore::new(pool.clone())),
            Arc::new(breeds),
        ),
        missions: MissionService::new(Arc::new(PgMissionStore::new(pool.clone()))),
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

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    let server =
        axum::serve(listener, app).with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let mut server = tokio::spawn(async move { server.await });

    // In-flight requests get a bounded grace period once shutdown starts.
    let grace = Duration::from_secs(config.shutdown_grace_secs);
    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
        }
        () = async {
            shutdown.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(?grace, "Grace period elapsed, dropping in-flight requests");
            server.abort();
        }
    }

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped, closing database pool");
    pool.close().await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
