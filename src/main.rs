//! TaskHub Server: multi-tenant project and task management API.
//!
//! Main entry point that loads configuration, opens the store, and starts
//! the HTTP server.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use taskhub_core::config::{AppConfig, DatabaseBackend};
use taskhub_core::error::AppError;
use taskhub_database::migration::run_migrations;
use taskhub_database::{DatabasePool, MemoryStore, Repositories};

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

/// Load `config/default.toml`, the `TASKHUB_ENV` overlay, and the
/// environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TASKHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing. `RUST_LOG` overrides `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
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

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting TaskHub");

    match config.database.backend {
        DatabaseBackend::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                info!("Running database migrations");
                run_migrations(db.pool()).await?;
            }
            let repos = Repositories::postgres(db.pool().clone());
            let result = taskhub_api::run_server(config, repos).await;
            db.close().await;
            result
        }
        DatabaseBackend::Memory => {
            info!("Using the in-memory store; data is lost on exit");
            let repos = Repositories::in_memory(MemoryStore::new());
            taskhub_api::run_server(config, repos).await
        }
    }
}
