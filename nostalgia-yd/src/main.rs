//! nostalgia-yd (year data) - Main entry point
//!
//! Serves aggregated music, events, and archived websites for a calendar year.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use nostalgia_common::config::{default_config_path, RootFolderInitializer, RootFolderResolver};
use nostalgia_common::db::{init_database_pool, SqliteDocumentStore};
use nostalgia_common::{DocumentStore, MemoryDocumentStore};
use nostalgia_yd::config::{ServiceConfig, StorageBackend, MODULE_NAME};
use nostalgia_yd::services::HttpSourceClient;
use nostalgia_yd::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for nostalgia-yd
#[derive(Parser, Debug)]
#[command(name = "nostalgia-yd")]
#[command(about = "Year data service: songs, events, and archived websites per year")]
#[command(version)]
struct Args {
    /// Bootstrap TOML file (defaults to the platform config dir)
    #[arg(short, long, env = "NOSTALGIA_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "NOSTALGIA_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Folder holding the SQLite database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(MODULE_NAME));
    let loaded = ServiceConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let from_file = loaded.is_some();
    let mut config = loaded.unwrap_or_default();

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind.clone() {
        config.bind_address = bind;
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting nostalgia year data service (nostalgia-yd) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Config was read before logging existed
    if from_file {
        info!("Loaded configuration from {}", config_path.display());
    } else {
        warn!(
            "Config file {} not found, using built-in defaults",
            config_path.display()
        );
    }

    let store: Arc<dyn DocumentStore> = match config.storage {
        StorageBackend::Sqlite => {
            let root_folder = RootFolderResolver::new(MODULE_NAME)
                .with_cli_arg(args.root_folder.clone())
                .with_toml_root(config.root_folder.clone())
                .resolve();

            let initializer = RootFolderInitializer::new(root_folder);
            initializer.ensure_directory_exists()?;

            let db_path = initializer.database_path();
            info!("Database path: {}", db_path.display());

            let pool = match init_database_pool(&db_path).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("Failed to open database: {}", e);
                    return Err(e.into());
                }
            };
            Arc::new(SqliteDocumentStore::new(pool))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage (cache is lost on restart)");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let client = Arc::new(
        HttpSourceClient::new(&config.sources.user_agent)
            .context("Failed to create source HTTP client")?,
    );

    let state = AppState::from_config(&config, store, client)?;
    info!(
        max_requests = config.rate_limit.max_requests,
        window_seconds = config.rate_limit.window_seconds,
        identity_header = %config.identity.header,
        "Request gating configured"
    );

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("nostalgia-yd listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
