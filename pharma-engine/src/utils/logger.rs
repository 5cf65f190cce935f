//! Logging Infrastructure
//!
//! Console logging through `tracing-subscriber`, plus an optional daily
//! rolling file. `RUST_LOG` overrides the configured level.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix of the rolling log files (`pharma-engine.YYYY-MM-DD`)
const LOG_FILE_PREFIX: &str = "pharma-engine";

/// Initialize console logging at `info`
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", None)
}

/// Initialize logging with an optional log directory
///
/// # Examples
/// ```no_run
/// // Console only
/// pharma_engine::init_logger_with_file("debug", None)?;
///
/// // Console + daily file
/// pharma_engine::init_logger_with_file("info", Some("./data/logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(level: &str, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
