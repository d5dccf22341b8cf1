//! imgxform: on-demand image resizing server.

use anyhow::Context;
use clap::{Parser, Subcommand};
use imgxform_core::config::Config;
use imgxform_service::Pipeline;
use imgxform_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::info;

/// Resize remote images to JPEG or WebP over HTTP
#[derive(Parser)]
#[command(name = "imgxform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (imgxform.toml or .config/imgxform.toml if not given)
    #[arg(short, long, global = true, env = "IMGXFORM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen address, e.g. 0.0.0.0:3000
        #[arg(short, long)]
        bind: Option<String>,

        /// Log filter directive, e.g. info or imgxform_service=debug
        #[arg(long)]
        log_level: Option<String>,

        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Validate configuration and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            bind,
            log_level,
            json_logs,
        } => serve(cli.config, bind, log_level, json_logs).await,
        Commands::CheckConfig => check_config(cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    log_level: Option<String>,
    json_logs: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load(config_path.as_deref())?;

    if let Some(bind) = bind {
        config.schema.server.bind = bind;
    }
    if let Some(level) = log_level {
        config.schema.logging.level = level;
    }
    if json_logs {
        config.schema.logging.json = true;
    }
    config.validate()?;

    imgxform_telemetry::init_with_config(TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    })?;

    let addr = config.bind_addr()?;
    let pipeline =
        Pipeline::from_config(&config.schema.fetch).context("Failed to build HTTP client")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        config = ?config.path,
        max_body_bytes = config.schema.fetch.max_body_bytes,
        "Listening"
    );

    imgxform_service::serve(listener, pipeline, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

fn check_config(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref())?;
    config.bind_addr()?;

    match &config.path {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# No config file found, using defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
