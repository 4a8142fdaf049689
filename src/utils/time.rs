//! Wall-clock helpers.

use chrono::Utc;

/// Number of seconds in one hour
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Whole hours elapsed since the Unix epoch for a timestamp in seconds.
///
/// Equivalent to `floor(unix_seconds / 3600)`.
pub fn epoch_hours(unix_seconds: u64) -> u64 {
	unix_seconds / SECONDS_PER_HOUR
}

/// Whole hours elapsed since the Unix epoch, according to the system clock.
///
/// A clock set before 1970 is treated as the epoch itself.
pub fn current_epoch_hours() -> u64 {
	let now = Utc::now().timestamp();
	epoch_hours(u64::try_from(now).unwrap_or(0))
}
