#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives shared across the bookstore workspace.
//!
//! This crate centralises logging, metrics, and request-scoped tracing helpers so
//! the API and the binary adopt a consistent observability story.
//!
//! Layout: `init.rs` (subscriber installation), `context.rs` (process span and
//! task-local request context), `metrics.rs` (Prometheus series), `error.rs`
//! (error type).

pub mod context;
pub mod error;
pub mod init;
pub mod metrics;

pub use context::{GlobalContextGuard, RequestContext, current_request};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use metrics::{Metrics, MetricsSnapshot, Series};
