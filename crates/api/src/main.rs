use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse_access::AccessHandler;
use gatehouse_api::config::Config;
use gatehouse_api::{routes, state::AppState};
use gatehouse_checkin::{CheckInEngine, NoopActuator};
use gatehouse_events::MessageBus;
use gatehouse_remote::HttpBackend;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = Config::from_env();
    tracing::info!(
        site_id = config.site_id,
        backend = %config.backend_url,
        policy = ?config.access_policy,
        "Loaded unit configuration"
    );

    // --- Local store ---
    let pool = gatehouse_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open local store");

    gatehouse_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    gatehouse_db::health_check(&pool)
        .await
        .expect("Local store health check failed");
    tracing::info!("Local store ready");

    // --- Remote backend ---
    let backend: Arc<dyn gatehouse_remote::RemoteBackend> = Arc::new(HttpBackend::new(
        config.backend_url.clone(),
        config.backend_token.clone(),
    ));

    // --- Message bus ---
    let bus = Arc::new(MessageBus::default());

    // --- Background tasks ---
    let cancel = tokio_util::sync::CancellationToken::new();

    let access_handler = AccessHandler::new(pool.clone(), config.access_policy);
    // Subscribe before spawning: a request arriving before the task's
    // first poll must already sit in the receiver's buffer.
    let access_handle = tokio::spawn(gatehouse_access::run(
        access_handler,
        Arc::clone(&bus),
        bus.subscribe(),
        cancel.clone(),
    ));

    let sync_handle = tokio::spawn(gatehouse_sync::scheduler::run(
        pool.clone(),
        Arc::clone(&backend),
        config.site_id,
        Duration::from_secs(config.sync_interval_secs),
        cancel.clone(),
    ));
    tracing::info!("Authorization service and synchronizer started");

    // --- Check-in engine ---
    let engine = Arc::new(CheckInEngine::new(
        pool.clone(),
        Arc::clone(&backend),
        Arc::new(NoopActuator),
    ));

    // --- App state + router ---
    let state = AppState {
        pool,
        backend,
        engine,
        site_id: config.site_id,
    };

    let app = routes::app(state)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), access_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), sync_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the unit shuts
/// down cleanly whether stopped interactively or by a process manager.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
