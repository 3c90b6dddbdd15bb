//! Value parsers wired into clap via `value_parser`.
//!
//! These run during argument parsing, so a bad value is reported by
//! clap with usage context before any configuration is loaded.

use std::fs;
use std::net::IpAddr;
use std::num::{IntErrorKind, NonZeroU16};
use std::path::PathBuf;

/// Ceiling on `migrate --rollback` to stop accidental mass rollbacks.
const MAX_ROLLBACK_STEPS: u32 = 100;

/// Hostname length limit per RFC 1035.
const MAX_HOSTNAME_LEN: usize = 253;

pub fn parse_port(value: &str) -> Result<u16, String> {
    match value.parse::<NonZeroU16>() {
        Ok(port) => Ok(port.get()),
        Err(e) if matches!(e.kind(), IntErrorKind::Zero) => {
            Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string())
        }
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            value
        )),
    }
}

pub fn parse_config_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", value));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", value));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", value, e))
}

pub fn parse_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            value
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {} for safety reasons",
            MAX_ROLLBACK_STEPS
        )),
        s => Ok(s),
    }
}

/// Accepts IP literals, `localhost` and plain hostnames. The returned
/// string is trimmed.
pub fn parse_host(value: &str) -> Result<String, String> {
    let host = value.trim();

    if host.is_empty() {
        return Err("Host address must not be empty".to_string());
    }
    if host.contains(' ') {
        return Err("Host address must not contain spaces".to_string());
    }

    if host.parse::<IpAddr>().is_err() {
        // Digits and dots that did not parse as an IP are a broken IPv4
        // literal, not a hostname.
        if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(format!("Invalid IPv4 address format: '{}'", value));
        }
        if host.len() > MAX_HOSTNAME_LEN {
            return Err(format!(
                "Host address is too long (maximum {} characters)",
                MAX_HOSTNAME_LEN
            ));
        }
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_bounds() {
        for valid in ["1", "80", "443", "3000", "65535"] {
            assert_eq!(parse_port(valid), Ok(valid.parse().unwrap()));
        }

        for invalid in ["0", "65536", "99999", "abc", "-1", ""] {
            assert!(parse_port(invalid).is_err(), "'{}' should fail", invalid);
        }
    }

    #[test]
    fn test_port_zero_gets_its_own_message() {
        let err = parse_port("0").unwrap_err();
        assert!(err.contains("Port 0 is not allowed"));
    }

    #[test]
    fn test_rollback_steps_range() {
        for valid in ["1", "5", "50", "100"] {
            assert_eq!(parse_rollback_steps(valid), Ok(valid.parse().unwrap()));
        }

        for invalid in ["0", "101", "999", "-1", "abc", ""] {
            assert!(parse_rollback_steps(invalid).is_err(), "'{}' should fail", invalid);
        }
    }

    #[test]
    fn test_host_accepts_ips_and_hostnames() {
        let hosts = [
            "localhost",
            "127.0.0.1",
            "0.0.0.0",
            "10.20.30.40",
            "::1",
            "reservo.example.com",
            "my-server.local",
        ];
        for host in hosts {
            assert_eq!(parse_host(host).as_deref(), Ok(host));
        }
    }

    #[test]
    fn test_host_is_trimmed() {
        assert_eq!(
            parse_host("  reservo.internal  ").as_deref(),
            Ok("reservo.internal")
        );
    }

    #[test]
    fn test_host_rejects_malformed_input() {
        let long = "x".repeat(300);
        let hosts = [
            "",
            "   ",
            "two words",
            "999.999.999.999",
            "1.2.3",
            long.as_str(),
        ];
        for host in hosts {
            assert!(parse_host(host).is_err(), "'{}' should fail", host);
        }
    }

    #[test]
    fn test_missing_config_file_is_rejected() {
        assert!(parse_config_path("/nonexistent/reservo.toml").is_err());
    }
}
