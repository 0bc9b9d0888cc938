use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timezone: String,
    pub tick_rate_ms: u64,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Rome".to_string(),
            tick_rate_ms: 200,
            log_file: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bilancio_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override timezone (IANA name) used for the month header.
    #[arg(long)]
    timezone: Option<String>,
    /// Override the event poll interval in milliseconds.
    #[arg(long)]
    tick_rate_ms: Option<u64>,
    /// Append tracing output to this file.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BILANCIO_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(tick_rate_ms) = args.tick_rate_ms {
        settings.tick_rate_ms = tick_rate_ms;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    Ok(settings)
}
