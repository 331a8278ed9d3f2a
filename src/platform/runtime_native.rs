use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::future::Future;

pub type Instant = std::time::Instant;

/// Run a fetch or other background job on the tokio runtime.
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(fut);
}

/// Route `log` output to `log_file`; the terminal itself is drawn by ratatui.
/// Level comes from `RUST_LOG`, defaulting to info.
pub fn init_logging(log_file: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {log_file}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Logger already initialised")?;
    Ok(())
}
