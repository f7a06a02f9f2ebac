//! HTTP surface modules (router, extractors, handlers, middleware).

/// Shared header names.
pub mod constants;
/// Per-collection CRUD handlers.
pub mod entities;
/// Lenient path and body extractors.
pub mod extract;
/// Health and metrics endpoints.
pub mod health;
/// Root informational endpoint.
pub mod info;
/// Request context and counting middleware.
pub mod middleware;
/// Router construction and server host.
pub mod router;
