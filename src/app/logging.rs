//! Log setup
//!
//! The screen belongs to the editor, so logs only ever go to a file. With no
//! file configured no subscriber is installed and all events are dropped.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming a log file, overriding the config
pub const LOG_ENV: &str = "MOCHI_EDIT_LOG";

/// Pick the log file: the environment wins over the config
pub fn log_path(configured: Option<&Path>) -> Option<PathBuf> {
    std::env::var_os(LOG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| configured.map(Path::to_path_buf))
}

/// Install the global subscriber writing to `path`
///
/// The filter comes from `RUST_LOG`, defaulting to `warn`.
pub fn init(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
