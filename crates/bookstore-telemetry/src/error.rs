//! Error types for telemetry operations.

use thiserror::Error;

use crate::metrics::Series;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised while installing logging or maintaining the catalog series.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        source: tracing_subscriber::util::TryInitError,
    },
    /// A series had invalid options or label names.
    #[error("failed to build metrics series {series}")]
    SeriesBuild {
        /// Series being constructed.
        series: Series,
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// A series clashed with one already in the registry.
    #[error("failed to register metrics series {series}")]
    SeriesRegister {
        /// Series being registered.
        series: Series,
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// The text exposition could not be encoded.
    #[error("failed to encode metrics exposition")]
    Exposition {
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// The encoded exposition was not UTF-8.
    #[error("metrics exposition was not valid utf-8")]
    ExpositionUtf8 {
        /// Underlying conversion error.
        source: std::string::FromUtf8Error,
    },
}
