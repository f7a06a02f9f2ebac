//! Typed server configuration.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_BIND_ADDR, DEFAULT_HTTP_PORT, DEFAULT_LOG_LEVEL};

/// Requested log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormatSetting {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

impl LogFormatSetting {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

/// Listener and logging settings for the API process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind_addr: IpAddr,
    /// Port the listener binds to.
    pub http_port: u16,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Explicit log format; `None` lets the telemetry layer infer one.
    pub log_format: Option<LogFormatSetting>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            http_port: DEFAULT_HTTP_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: None,
        }
    }
}

impl ServerConfig {
    /// Socket address the listener should bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}
