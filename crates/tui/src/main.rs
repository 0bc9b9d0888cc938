mod app;
mod config;
mod error;
mod surface;
mod ui;

use std::{sync::Arc, time::Duration};

use crate::error::{AppError, Result};

fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(config.log_file.as_deref())?;

    let timezone: chrono_tz::Tz = config
        .timezone
        .parse()
        .map_err(|_| AppError::Timezone(config.timezone.clone()))?;

    let surface = surface::TuiSurface::new(timezone);
    let mut app = app::App::new(surface, Duration::from_millis(config.tick_rate_ms));
    app.run()?;

    Ok(())
}

/// Tracing goes to a file or nowhere: the alternate screen owns stdout.
fn init_tracing(log_file: Option<&str>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("bilancio_tui=debug,ledger=debug")
                }),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
