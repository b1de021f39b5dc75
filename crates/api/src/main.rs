use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use envoy_api::config::ServerConfig;
use envoy_api::router::build_app_router;
use envoy_api::state::AppState;
use envoy_db::{MySqlStore, SettingsStore};
use envoy_events::{EventBus, Topic};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "envoy_api=debug,envoy_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    // The pool connects lazily; an unreachable database degrades to
    // compiled defaults rather than stopping startup.
    let pool = envoy_db::create_pool(&config.database);
    tracing::info!(
        host = %config.database.host,
        database = %config.database.database,
        "Database connection pool created",
    );

    match envoy_db::run_migrations(&pool).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::warn!(error = %e, "Skipping migrations, database unavailable"),
    }

    let store = Arc::new(MySqlStore::new(pool));
    match SettingsStore::new(store.clone()).seed_defaults().await {
        Ok(inserted) => tracing::info!(inserted, "Default settings seeded"),
        Err(e) => tracing::warn!(error = %e, "Skipping settings seed, database unavailable"),
    }

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    tracing::info!("Event bus created");

    let mut saves = event_bus.subscribe_topic(Topic::Settings);
    let audit_handle = tokio::spawn(async move {
        loop {
            match saves.recv().await {
                Ok(event) => tracing::info!(event = %event.name(), "Site event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Settings event listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // --- App state ---
    let state = AppState::new(store, config.clone(), Arc::clone(&event_bus));
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped accepting connections, shutting down");

    // Dropping the last sender closes the channel and ends the listener.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), audit_handle).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
