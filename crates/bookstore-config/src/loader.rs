//! Environment lookup for [`ServerConfig`].
//!
//! # Design
//! - `from_lookup` is pure over a lookup function so tests never touch the
//!   process environment.
//! - Unset or empty variables fall back to defaults; set-but-invalid values fail.

use tracing::debug;

use crate::defaults::{ENV_BIND_ADDR, ENV_HTTP_PORT, ENV_LOG_FORMAT, ENV_LOG_LEVEL};
use crate::error::ConfigResult;
use crate::model::ServerConfig;
use crate::validate::{parse_bind_addr, parse_log_format, parse_log_level, parse_port};

impl ServerConfig {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`, applying defaults for missing variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            let value = lookup(name).filter(|value| !value.trim().is_empty());
            if value.is_none() {
                debug!(variable = name, "configuration variable unset; using default");
            }
            value
        };

        let mut config = Self::default();
        if let Some(raw) = read(ENV_HTTP_PORT) {
            config.http_port = parse_port(ENV_HTTP_PORT, &raw)?;
        }
        if let Some(raw) = read(ENV_BIND_ADDR) {
            config.bind_addr = parse_bind_addr(ENV_BIND_ADDR, &raw)?;
        }
        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.log_level = parse_log_level(ENV_LOG_LEVEL, &raw)?;
        }
        if let Some(raw) = read(ENV_LOG_FORMAT) {
            config.log_format = Some(parse_log_format(ENV_LOG_FORMAT, &raw)?);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::model::LogFormatSetting;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() -> ConfigResult<()> {
        let config = ServerConfig::from_lookup(lookup_from(&[]))?;
        assert_eq!(config, ServerConfig::default());
        Ok(())
    }

    #[test]
    fn blank_variables_are_treated_as_unset() -> ConfigResult<()> {
        let config = ServerConfig::from_lookup(lookup_from(&[(ENV_HTTP_PORT, "  ")]))?;
        assert_eq!(config.http_port, 3000);
        Ok(())
    }

    #[test]
    fn all_variables_are_applied() -> ConfigResult<()> {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ENV_HTTP_PORT, "8080"),
            (ENV_BIND_ADDR, "127.0.0.1"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "json"),
        ]))?;
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, Some(LogFormatSetting::Json));
        Ok(())
    }

    #[test]
    fn invalid_variable_reports_field() {
        let err = ServerConfig::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "nowhere")]))
            .expect_err("invalid address rejected");
        let ConfigError::InvalidField { field, value, .. } = err;
        assert_eq!(field, ENV_BIND_ADDR);
        assert_eq!(value, "nowhere");
    }
}
