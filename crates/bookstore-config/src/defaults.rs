//! Default values and environment variable names.
//!
//! # Design
//! - Keep every fallback in one place so the loader and docs agree.

use std::net::{IpAddr, Ipv4Addr};

/// Port the API listens on when none is configured.
pub const DEFAULT_HTTP_PORT: u16 = 3000;
/// Address the API binds to when none is configured.
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Log level used when neither `RUST_LOG` nor the level variable is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Variable holding the listener port.
pub const ENV_HTTP_PORT: &str = "BOOKSTORE_HTTP_PORT";
/// Variable holding the bind address.
pub const ENV_BIND_ADDR: &str = "BOOKSTORE_BIND_ADDR";
/// Variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "BOOKSTORE_LOG_LEVEL";
/// Variable holding the log format (`json` or `pretty`).
pub const ENV_LOG_FORMAT: &str = "BOOKSTORE_LOG_FORMAT";
