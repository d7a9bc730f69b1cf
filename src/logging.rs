use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing::{Level, Subscriber};
use tracing_subscriber::FmtSubscriber;

/// Installs the global subscriber. Logs only ever go to a file because the
/// terminal is owned by the UI; without a path this is a no-op.
pub fn init(path: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing::subscriber::set_global_default(file_subscriber(file, parse_level(level)))
        .context("failed to install log subscriber")?;
    Ok(())
}

pub(crate) fn file_subscriber(file: File, level: Level) -> impl Subscriber + Send + Sync {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .finish()
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
