use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initializes the tracing subscriber, writing to a timestamped file under
/// `log_dir` so the interactive console stays clean. `RUST_LOG` controls the
/// filter; the default is `info`.
pub fn init_logger(log_dir: &str) -> Result<()> {
    if !Path::new(log_dir).exists() {
        fs::create_dir_all(log_dir)?;
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_file = format!("{log_dir}/scratchpad_{timestamp}.log");

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(fs::File::create(&log_file)?))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("Logger initialized, writing to {}", log_file);

    Ok(())
}
