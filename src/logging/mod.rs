//! Logging setup: console plus a daily-rolling file, JSON in production.

pub mod middleware;

use std::io;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber. The returned guards must be held for
/// the process lifetime; dropping them stops the background log writers.
pub fn init() -> Vec<WorkerGuard> {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let is_production = environment == "production";

    std::fs::create_dir_all("logs").ok();
    let (file_writer, file_guard) = non_blocking(rolling::daily("logs", "app.log"));
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if is_production {
            "info".to_string()
        } else {
            "debug".to_string()
        }
    });
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "portfolio_config_api={log_level},tower_http=info,axum=info"
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if is_production {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(fmt::layer().json().with_writer(console_writer).with_target(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(file_writer).with_ansi(false))
            .with(fmt::layer().with_writer(console_writer).pretty())
            .init();
    }

    tracing::info!(environment, "logging initialized");
    vec![file_guard, console_guard]
}
