//! Campus API CLI
//!
//! Main entry point for serving the student and course API.

use std::path::Path;
use std::process::ExitCode;

use campus_api::{create_router, AppState, Config};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Campus API - student and course REST service
///
/// Serves in-memory student and course collections over HTTP. Data is
/// seeded at startup and lost when the process exits.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: campus.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Address to bind (overrides config)
    #[arg(long, value_name = "ADDR")]
    host: Option<String>,

    /// Port for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON seed file with initial students and courses (overrides config)
    #[arg(short, long, value_name = "FILE")]
    seed: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Campus API starting");
    tracing::debug!(config = ?args.config, "Config file");

    match run_server(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Loads configuration and seed data, then serves until Ctrl+C.
async fn run_server(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(seed) = args.seed {
        config.seed_file = Some(seed);
    }

    // Re-validate after overrides
    config.validate()?;

    let store = config.initial_store()?;
    tracing::info!(
        students = store.students().len(),
        courses = store.courses().len(),
        seed_file = ?config.seed_file,
        "Store seeded"
    );

    let addr = config.socket_addr()?;
    let prefix = config.api_prefix.clone();
    let router = create_router(AppState::with_store(config, store));

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {addr}: {e}\n\nSuggestion: Try a different port with --port"
        )
    })?;
    let local_addr = listener.local_addr()?;

    tracing::info!(addr = %local_addr, prefix = %prefix, "HTTP server listening");
    println!("Campus API running on http://{local_addr}{prefix}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Campus API stopped");
    Ok(())
}

/// Loads configuration from the specified path or default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Ok(Config::load_from_file(path)?)
        }
        None => Ok(Config::load()?),
    }
}

/// Resolves when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}
