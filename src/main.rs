//! GradUWate course-graph API service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ request id ─▶ trace ─▶ CORS ─▶ timeout ─┐   │
//!                         │                                          ▼   │
//!                         │                           /health  or  404   │
//!     Client Response     │                                          │   │
//!     ◀───────────────────┼──────────────────────────────────────────┘   │
//!                         │                                              │
//!                         │  config (defaults → file → env → flags)      │
//!                         │  observability (tracing subscriber)          │
//!                         │  lifecycle (signals → graceful shutdown)     │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use course_graph_api::config::{self, loader::CONFIG_PATH_VAR, CliOverrides, ConfigError, LogFormat};
use course_graph_api::error::{Result, ServiceError};
use course_graph_api::lifecycle::{spawn_signal_listener, Shutdown};
use course_graph_api::observability::init_logging;
use course_graph_api::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "course-graph-api")]
#[command(version, about = "GradUWate course-graph API", long_about = None)]
struct Cli {
    /// Path to a TOML config file (overrides CONFIG_PATH).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, e.g. 0.0.0.0:8000 (overrides BIND_ADDRESS and PORT).
    #[arg(short, long)]
    bind: Option<String>,

    /// Log format: pretty, compact or json (overrides LOG_FORMAT).
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("course-graph-api: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // A missing .env file is fine.
    dotenv::dotenv().ok();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));
    let flags = CliOverrides {
        bind: cli.bind,
        log_format: cli.log_format,
    };
    let config =
        config::load_layered(config_path.as_deref(), |key| std::env::var(key).ok(), flags)?;
    config::validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    tracing::info!(
        service = %config.app.service_name,
        version = env!("CARGO_PKG_VERSION"),
        env = %config.app.env,
        "course-graph-api starting"
    );
    tracing::info!(
        config_file = ?config_path,
        bind_address = %config.listener.bind_address,
        cors_origins = ?config.cors.allowed_origins,
        cors_credentials = config.cors.allow_credentials,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| ServiceError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
