//! Error handling for GatherHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the GatherHub application
#[derive(Error, Debug)]
pub enum GatherHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: uuid::Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: uuid::Uuid },

    #[error("Event is not available for RSVP")]
    EventNotAvailable,

    #[error("Not registered for event: {event_id}")]
    NotRegistered { event_id: uuid::Uuid },

    #[error("RSVP admission conflicted with a concurrent request")]
    CapacityConflict,

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for GatherHub operations
pub type Result<T> = std::result::Result<T, GatherHubError>;

impl GatherHubError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GatherHubError::Database(_) => false,
            GatherHubError::Migration(_) => false,
            GatherHubError::Config(_) => false,
            GatherHubError::PermissionDenied(_) => false,
            GatherHubError::Unauthorized => false,
            GatherHubError::UserNotFound { .. } => false,
            GatherHubError::EventNotFound { .. } => false,
            GatherHubError::EventNotAvailable => false,
            GatherHubError::NotRegistered { .. } => false,
            GatherHubError::CapacityConflict => true,
            GatherHubError::InvalidStateTransition { .. } => false,
            GatherHubError::Serialization(_) => false,
            GatherHubError::Io(_) => true,
            GatherHubError::InvalidInput(_) => false,
            GatherHubError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GatherHubError::Database(_) => ErrorSeverity::Critical,
            GatherHubError::Migration(_) => ErrorSeverity::Critical,
            GatherHubError::Config(_) => ErrorSeverity::Critical,
            GatherHubError::PermissionDenied(_) => ErrorSeverity::Warning,
            GatherHubError::Unauthorized => ErrorSeverity::Warning,
            GatherHubError::CapacityConflict => ErrorSeverity::Warning,
            GatherHubError::InvalidInput(_) => ErrorSeverity::Info,
            GatherHubError::EventNotAvailable => ErrorSeverity::Info,
            GatherHubError::NotRegistered { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether a transaction-level conflict can be retried transparently.
    ///
    /// Postgres reports serialization failures as SQLSTATE 40001 and
    /// deadlocks as 40P01; both mean the per-event critical section lost
    /// a race and can be re-run against fresh state.
    pub fn is_transaction_conflict(&self) -> bool {
        match self {
            GatherHubError::Database(sqlx::Error::Database(db_err)) => {
                matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
            }
            _ => false,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_conflict_is_recoverable() {
        assert!(GatherHubError::CapacityConflict.is_recoverable());
        assert!(!GatherHubError::EventNotAvailable.is_recoverable());
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(
            GatherHubError::Config("missing".to_string()).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            GatherHubError::Unauthorized.severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            GatherHubError::EventNotAvailable.severity(),
            ErrorSeverity::Info
        );
    }

    #[test]
    fn test_non_database_errors_are_not_conflicts() {
        assert!(!GatherHubError::CapacityConflict.is_transaction_conflict());
        assert!(!GatherHubError::Unauthorized.is_transaction_conflict());
    }
}
