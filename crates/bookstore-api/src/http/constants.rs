//! Shared HTTP constants.

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
pub(crate) const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";
