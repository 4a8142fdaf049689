//! Parsers for command-line values.

use byte_unit::Byte;
use std::{str::FromStr, time::Duration};

/// Parses a human-readable size such as "1GB", "500MB" or "1024KiB" into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	Byte::from_str(s)
		.map(|byte| byte.as_u64())
		.map_err(|e| format!("Invalid size format: '{}'. Error: {}", s, e))
}

/// Parses a positive number of milliseconds.
pub fn parse_timeout_ms(s: &str) -> Result<Duration, String> {
	match s.trim().parse::<u64>() {
		Ok(0) => Err("Timeout must be greater than zero".to_string()),
		Ok(ms) => Ok(Duration::from_millis(ms)),
		Err(e) => Err(format!("Invalid timeout: '{}'. Error: {}", s, e)),
	}
}

/// Trims and lowercases a contract slug so `--contract CNS` selects `cns`.
pub fn normalize_slug(input: &str) -> String {
	input.trim().to_lowercase()
}
