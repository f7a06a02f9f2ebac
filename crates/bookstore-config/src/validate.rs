//! Validation helpers and parsing utilities for configuration values.

use std::net::IpAddr;

use crate::error::{ConfigError, ConfigResult};
use crate::model::LogFormatSetting;

/// Parse a listener port in `1..=65535`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is not an integer or is zero.
pub fn parse_port(field: &'static str, raw: &str) -> ConfigResult<u16> {
    let trimmed = raw.trim();
    let port = trimmed
        .parse::<u32>()
        .map_err(|_| ConfigError::invalid(field, raw, "not_an_integer"))?;
    match u16::try_from(port) {
        Ok(0) | Err(_) => Err(ConfigError::invalid(field, raw, "out_of_range")),
        Ok(port) => Ok(port),
    }
}

/// Parse an IPv4 or IPv6 bind address.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is not an IP literal.
pub fn parse_bind_addr(field: &'static str, raw: &str) -> ConfigResult<IpAddr> {
    raw.trim()
        .parse::<IpAddr>()
        .map_err(|_| ConfigError::invalid(field, raw, "not_an_ip_address"))
}

/// Accept any non-blank log filter directive.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is blank.
pub fn parse_log_level(field: &'static str, raw: &str) -> ConfigResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid(field, raw, "blank"));
    }
    Ok(trimmed.to_string())
}

/// Parse `json` or `pretty` (case-insensitive).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for any other value.
pub fn parse_log_format(field: &'static str, raw: &str) -> ConfigResult<LogFormatSetting> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormatSetting::Json),
        "pretty" => Ok(LogFormatSetting::Pretty),
        _ => Err(ConfigError::invalid(field, raw, "unknown_log_format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: &ConfigError) -> &'static str {
        let ConfigError::InvalidField { reason, .. } = err;
        *reason
    }

    #[test]
    fn parse_port_accepts_valid_range() -> ConfigResult<()> {
        assert_eq!(parse_port("port", "3000")?, 3000);
        assert_eq!(parse_port("port", " 65535 ")?, 65_535);
        assert_eq!(parse_port("port", "1")?, 1);
        Ok(())
    }

    #[test]
    fn parse_port_rejects_zero_overflow_and_text() {
        let zero = parse_port("port", "0").expect_err("zero rejected");
        assert_eq!(reason(&zero), "out_of_range");
        let large = parse_port("port", "70000").expect_err("overflow rejected");
        assert_eq!(reason(&large), "out_of_range");
        let text = parse_port("port", "http").expect_err("text rejected");
        assert_eq!(reason(&text), "not_an_integer");
    }

    #[test]
    fn parse_bind_addr_handles_both_families() -> ConfigResult<()> {
        assert!(parse_bind_addr("addr", "127.0.0.1")?.is_loopback());
        assert!(parse_bind_addr("addr", "::1")?.is_loopback());
        let err = parse_bind_addr("addr", "localhost").expect_err("hostname rejected");
        assert_eq!(reason(&err), "not_an_ip_address");
        Ok(())
    }

    #[test]
    fn parse_log_level_rejects_blank() -> ConfigResult<()> {
        assert_eq!(parse_log_level("level", " debug ")?, "debug");
        assert!(parse_log_level("level", "   ").is_err());
        Ok(())
    }

    #[test]
    fn parse_log_format_is_case_insensitive() -> ConfigResult<()> {
        assert_eq!(parse_log_format("fmt", "JSON")?, LogFormatSetting::Json);
        assert_eq!(parse_log_format("fmt", "pretty")?, LogFormatSetting::Pretty);
        let err = parse_log_format("fmt", "xml").expect_err("unknown format");
        assert_eq!(reason(&err), "unknown_log_format");
        Ok(())
    }
}
