//! Quill CLI - command-line client for the Quill blog

mod commands;
mod config;
mod logging;
mod navigator;
mod store;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use config::CliConfig;
use navigator::TerminalNavigator;
use quill_http::{BlogClient, ClientError};
use std::path::PathBuf;
use std::sync::Arc;
use store::FileCredentialStore;
use tracing::{Level, debug, error, info};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Command-line client for the Quill blog")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Data directory for the stored session and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/quill/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Blog API base URL, overriding QUILL_API_URL and the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (0 = no timeout)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = CliConfig::load(cli.config.as_deref())?;
    let data_dir = settings.data_dir(cli.data_dir);
    logging::init_logging(cli.log_level.into(), &data_dir, cli.no_file_log)?;

    let api = settings.api_config(cli.api_url.as_deref(), cli.timeout)?;
    info!(api = %api.base_url, data_dir = %data_dir.display(), "Starting Quill CLI");

    let store = Arc::new(FileCredentialStore::new(&data_dir));
    let client = BlogClient::new(api, store, Arc::new(TerminalNavigator))?;

    match cli.command.execute(&client).await {
        Ok(()) => {
            debug!("Command completed successfully");
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            match e.downcast_ref::<ClientError>() {
                Some(client_error) => eprintln!("{}", client_error.user_message()),
                None => eprintln!("{e:#}"),
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
