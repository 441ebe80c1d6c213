//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it. This allows developers to
/// use `RUST_LOG=debug` for quick debugging while still supporting explicit
/// CLI control via `--log-level`.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Returns
///
/// `Ok(())` if initialization succeeds, or an error if logger setup fails.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if logger initialization fails.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug seo_analyzer example.com
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug seo_analyzer example.com --log-level info
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=seo_analyzer=debug,reqwest=info seo_analyzer example.com
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    // Override with CLI-provided level (takes precedence over RUST_LOG)
    builder.filter_level(level);
    // html5ever reports every recoverable parse error; pages are full of them
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("seo_analyzer", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let (emoji, colored_level) = level_style(record.level());
                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // Use try_init() instead of init() to avoid panicking if logger is already initialized
    // This is important for tests where logger may be initialized multiple times
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One log record as a single JSON object.
fn json_line(ts_millis: i64, level: log::Level, target: &str, msg: &str) -> String {
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        ts_millis,
        level,
        target,
        serde_json::to_string(msg).unwrap_or_else(|_| "\"\"".into())
    )
}

fn level_style(level: log::Level) -> (&'static str, ColoredString) {
    let label = level.to_string();
    match level {
        log::Level::Error => ("❌", label.red()),
        log::Level::Warn => ("⚠️", label.yellow()),
        log::Level::Info => ("✔️", label.green()),
        log::Level::Debug => ("🔍", label.blue()),
        log::Level::Trace => ("🔬", label.purple()),
    }
}
