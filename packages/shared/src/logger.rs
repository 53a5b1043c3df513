//! Logging setup utilities for the Porch chat relay.

use std::path::Path;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default `EnvFilter` directive string, e.g. `porch_server=debug,tower_http=debug`.
fn default_directives(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Open `path` for appending, without rotation.
fn file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "porch.log".to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// Every target in `targets` is enabled at `default_log_level`. The whole filter
/// can be overridden using the `RUST_LOG` environment variable. Events always go
/// to stdout; when `log_file` is given they are also appended to that file
/// without ANSI colors.
///
/// # Arguments
///
/// * `targets` - Crate (or module) names to enable (e.g. `["porch_server", "tower_http"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
/// * `log_file` - Optional path of a log file (e.g. `logs/main.log`)
///
/// # Examples
///
/// ```no_run
/// use porch_shared::logger::setup_logger;
///
/// setup_logger(&["porch_server", "tower_http"], "debug", None);
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str, log_file: Option<&Path>) {
    let (file_layer, file_error) = match log_file.map(file_appender) {
        Some(Ok(appender)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(appender),
            ),
            None,
        ),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("Logging to stdout only, failed to open log file: {}", e);
    }
}
