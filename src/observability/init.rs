//! Tracing initialization and subscriber setup.
//!
//! This module wires `tracing` macros to a plain-text fmt layer writing into the
//! rotating log file under the data directory.

use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "gridlaunch.log";

/// Initializes the global tracing subscriber.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` environment variable if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently gives up if that fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use gridlaunch::observability::init_tracing;
/// use gridlaunch::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(config.trace_level.as_deref()))
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_thread_names(true));

    let _ = subscriber.try_init();
}

fn build_filter(trace_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(trace_level.unwrap_or("info")).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}
