/// Logging setup for the dashboards
///
/// The terminal is owned by ratatui, so events go to a file instead of stdout.
/// Level comes from `RUST_LOG`, defaulting to `info`.
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

/// Initialize logging to `path` (appending)
pub fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
