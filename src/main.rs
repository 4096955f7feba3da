//! Hotkey launcher
//!
//! Entry point for the launcher CLI.

mod cli;
mod cmd_browser;
mod cmd_registry;
mod cmd_style;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use launcher_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use launcher_protocols::SyncStore;
use launcher_store::FileSyncStore;

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files rotate daily under the configured directory.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = logging.resolved_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("hotkey-launcher")
        .filename_suffix("log")
        .max_log_files(logging.max_files)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console goes to stderr so command output stays clean
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())?,
    };
    Ok(config)
}

async fn open_store(config: &Config) -> Result<Arc<dyn SyncStore>, Box<dyn std::error::Error>> {
    let mut store = FileSyncStore::new(config.storage.resolved_path()).await?;
    if let Some(quota) = config.storage.item_quota_bytes {
        store = store.with_item_quota(quota);
    }
    info!("Using store {}", store.path().display());
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(store) = &cli.store {
        config.storage.path = store.display().to_string();
    }

    init_tracing(&config.logging)?;

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in &warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    match cli.command {
        Commands::CheckConfig => {
            println!("Configuration is valid");
            Ok(())
        }
        Commands::Open { trigger } => cmd_browser::open(&config, &trigger).await,
        Commands::Message { json, sender } => cmd_browser::message(&config, &json, sender).await,
        Commands::Press {
            key,
            shift,
            address,
            mode,
            prev_url,
            tab,
            dry_run,
        } => {
            let store = open_store(&config).await?;
            cmd_browser::press(&config, store, key, shift, address, mode, prev_url, tab, dry_run).await
        }
        Commands::Style { action } => {
            let store = open_store(&config).await?;
            cmd_style::handle_style_command(store, action).await
        }
        command => {
            let store = open_store(&config).await?;
            cmd_registry::handle_registry_command(store, command).await
        }
    }
}
