//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
///
/// Returns the log file path if debug logging is enabled. Graph construction
/// is silent by default; with debug on, everything goes to a temp file so
/// callers keep stdout/stderr to themselves.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        return None;
    }

    let log_path = tempfile::Builder::new()
        .prefix("eventing-graph-")
        .suffix(".log")
        .tempfile()
        .ok()
        .and_then(|f| f.keep().ok())
        .map(|(_, path)| path)
        .unwrap_or_else(|| {
            std::env::temp_dir().join(format!("eventing-graph-{}.log", std::process::id()))
        });

    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&log_path)
        .ok()?;

    // Another subscriber may already be installed (tests, embedding apps)
    let installed = tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .is_ok();

    installed.then_some(log_path)
}
