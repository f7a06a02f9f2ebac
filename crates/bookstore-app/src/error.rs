//! # Design
//!
//! - Aggregate the typed errors of the library crates behind one binary error.
//! - Keep error messages constant; each variant names the failed operation.
//! - [`AppError::report`] flattens the source chain for the process exit path,
//!   which may run before logging is installed.

use std::error::Error as _;

use bookstore_config::ConfigError;
use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: ConfigError,
    },
    /// API server operations failed.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: bookstore_api::ApiServerError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: bookstore_telemetry::TelemetryError,
    },
}

impl AppError {
    pub(crate) const fn config(operation: &'static str, source: ConfigError) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: bookstore_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: bookstore_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    /// Identifier of the failed operation.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Config { operation, .. }
            | Self::ApiServer { operation, .. }
            | Self::Telemetry { operation, .. } => *operation,
        }
    }

    /// One-line description of the failure and every underlying cause.
    ///
    /// Invalid configuration also names the variable, its value, and the reason.
    #[must_use]
    pub fn report(&self) -> String {
        let mut report = format!("{self} ({})", self.operation());
        if let Self::Config {
            source:
                ConfigError::InvalidField {
                    field,
                    value,
                    reason,
                },
            ..
        } = self
        {
            report.push_str(&format!(": {field}={value:?} rejected ({reason})"));
            return report;
        }
        let mut cause = self.source();
        while let Some(err) = cause {
            report.push_str(": ");
            report.push_str(&err.to_string());
            cause = err.source();
        }
        report
    }
}
