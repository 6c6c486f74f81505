//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GatherHub application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard owns the background writer for the rolling file
/// layer; the caller must hold it for the process lifetime, or file
/// output stops as soon as it is dropped.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "gatherhub.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log RSVP decisions with structured data
pub fn log_rsvp_decision(user_id: uuid::Uuid, event_id: uuid::Uuid, status: &str) {
    info!(
        user_id = %user_id,
        event_id = %event_id,
        status = status,
        "RSVP recorded"
    );
}

/// Log admin actions against events
pub fn log_admin_action(admin_id: uuid::Uuid, action: &str, event_id: Option<uuid::Uuid>) {
    warn!(
        admin_id = %admin_id,
        action = action,
        event_id = ?event_id,
        "Admin action performed"
    );
}
