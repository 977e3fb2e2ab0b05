//! WordGrid Server — multiplayer word-guessing game sessions
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use wordgrid_api::{AppState, build_app};
use wordgrid_core::config::AppConfig;
use wordgrid_core::error::AppError;
use wordgrid_engine::{SessionEngine, SweeperConfig, spawn_sweeper};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment.
///
/// `WORDGRID_ENV` selects the overlay file; `PORT` overrides the bind port.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("WORDGRID_ENV").unwrap_or_else(|_| "development".to_string());

    let mut config = AppConfig::load(&env)?;

    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid PORT value '{port}'")))?;
    }

    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting WordGrid v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);
    let engine = Arc::new(SessionEngine::from_config(&config)?);
    let cancel = CancellationToken::new();

    // ── Idle session sweeper ─────────────────────────────────────
    let sweeper_handle = match SweeperConfig::from_game(&config.game) {
        Some(sweeper) => Some(spawn_sweeper(Arc::clone(&engine), sweeper, cancel.clone())),
        None => {
            tracing::info!("Idle session sweeper disabled");
            None
        }
    };

    // ── HTTP server ──────────────────────────────────────────────
    let app = build_app(AppState::new(Arc::clone(&config), Arc::clone(&engine)));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "WordGrid server listening");

    let shutdown_engine = Arc::clone(&engine);
    let shutdown_cancel = cancel.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, closing event streams...");
        shutdown_cancel.cancel();
        // Open event streams only end once their hubs are closed.
        shutdown_engine.shutdown();
    });

    // ── Graceful shutdown ────────────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let grace_elapsed = async {
        cancel.cancelled().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server.into_future() => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = grace_elapsed => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Grace period elapsed, dropping remaining connections"
            );
        }
    }

    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    tracing::info!("WordGrid server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
