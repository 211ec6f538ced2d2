//! SIWOTI - Someone Is Wrong On The Internet
//!
//! Command line front end: scans saved pages for comments and generates
//! suggested replies through the configured chat-completion backend.

mod cli;
mod cmd_page;
mod cmd_settings;

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use siwoti_config::ConfigLoader;
use siwoti_core::Runtime;

use cli::{Cli, Commands};
use cmd_page::{handle_reply, handle_scan, handle_suggest};
use cmd_settings::{handle_settings_command, handle_sites_command};

/// Log files kept by the daily rotation.
const MAX_LOG_FILES: usize = 30;

/// Get the SIWOTI home directory (~/.siwoti).
fn siwoti_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".siwoti")
}

/// Initialize tracing with console output and a rolling log file.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = siwoti_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("siwoti")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes buffered lines on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(&cli.config)?;
    debug!("Configuration loaded from {}", cli.config.display());
    info!("Starting SIWOTI v{}", env!("CARGO_PKG_VERSION"));

    let runtime = Runtime::start(&config);
    let result = match cli.command {
        Commands::Scan { html, url } => handle_scan(&runtime, &html, &url).await,
        Commands::Reply { html, url, index, tone } => {
            handle_reply(&runtime, &html, &url, index, tone).await
        }
        Commands::Suggest { text, tone, url, html } => {
            handle_suggest(&runtime, &text, tone, url.as_deref(), html.as_deref()).await
        }
        Commands::Settings { action } => handle_settings_command(&runtime, action).await,
        Commands::Sites { action } => handle_sites_command(&runtime, action).await,
    };

    runtime.shutdown().await;
    result
}
