//! # Structured Logging Module
//!
//! Environment-aware structured logging: human-readable console output,
//! plus a JSON file layer when `GAZETTE_LOG_DIR` points somewhere.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::OnceLock;

use chrono::Utc;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.clone())));

        let registry = tracing_subscriber::registry().with(console_layer);

        // File output is opt-in so test runs don't litter the workspace.
        if let Ok(log_dir) = std::env::var("GAZETTE_LOG_DIR") {
            let log_dir = PathBuf::from(log_dir);
            if !log_dir.exists() {
                fs::create_dir_all(&log_dir).expect("Failed to create log directory");
            }

            let pid = process::id();
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
            let log_filename = format!("{environment}.{pid}.{timestamp}.log");

            let file_appender = tracing_appender::rolling::never(&log_dir, &log_filename);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(log_level));

            if registry.with(file_layer).try_init().is_ok() {
                tracing::info!(
                    pid = pid,
                    environment = %environment,
                    log_file = %log_dir.join(&log_filename).display(),
                    "Structured logging initialized with file output"
                );
            }

            // The writer stops flushing once the guard drops; logging lives
            // for the whole process, so leak it.
            std::mem::forget(guard);
        } else if registry.try_init().is_ok() {
            tracing::debug!(environment = %environment, "Structured logging initialized");
        }
    });
}

/// Get current environment from environment variables.
fn get_environment() -> String {
    std::env::var("GAZETTE_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment.
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}
