//! Logging and observability
//!
//! Structured `tracing` logs to the console, plus optional JSON files with
//! rotation.
//!
//! # Example
//!
//! ```no_run
//! use ade_bridge::logging::init_logging;
//! use ade_bridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(location = "be.herd/farm-1", "Serving request");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log how many rows a query returned out of the total available
///
/// # Example
///
/// ```no_run
/// use ade_bridge::log_records_received;
/// use ade_bridge::domain::OperationId;
///
/// log_records_received!(OperationId::GetMilkingVisits, "be.herd/farm-1", 20, 95);
/// ```
#[macro_export]
macro_rules! log_records_received {
    ($operation:expr, $location:expr, $received:expr, $total:expr) => {
        tracing::info!(
            operation = %$operation,
            location = %$location,
            received = $received,
            total = $total,
            "Received {} of {} records from database",
            $received,
            $total
        );
    };
}

/// Log a required field a source row did not provide
///
/// # Example
///
/// ```no_run
/// use ade_bridge::log_missing_required_field;
///
/// log_missing_required_field!("get-animals", "be.herd/farm-1", "gender");
/// ```
#[macro_export]
macro_rules! log_missing_required_field {
    ($operation:expr, $location:expr, $field:expr) => {
        tracing::warn!(
            operation = %$operation,
            location = %$location,
            field = %$field,
            "Missing required field"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ade_bridge::log_error_with_context;
/// use ade_bridge::domain::AdeError;
///
/// let error = AdeError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
