//! Caller-side retry policy for contract queries.
//!
//! The query client never retries on its own. Callers that want to ride out
//! flaky endpoints wrap their calls with [`retry_transient`], which backs off
//! exponentially and only retries transport failures.

use backon::{ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};
use std::{future::Future, time::Duration};

use crate::services::blockchain::QueryError;

fn default_max_attempts() -> u32 {
	3
}

fn default_initial_backoff() -> Duration {
	Duration::from_millis(250)
}

fn default_max_backoff() -> Duration {
	Duration::from_secs(10)
}

fn default_base_for_backoff() -> u32 {
	2
}

/// Serializable setting for jitter in retry policies
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JitterSetting {
	/// No jitter applied to the backoff duration
	None,
	/// Full jitter applied, randomizing the backoff duration
	#[default]
	Full,
}

/// Exponential backoff settings applied around a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
	/// Maximum number of retries after the first attempt
	#[serde(default = "default_max_attempts")]
	pub max_retries: u32,
	/// Growth factor between two consecutive delays
	#[serde(default = "default_base_for_backoff")]
	pub base_for_backoff: u32,
	/// Delay before the first retry
	#[serde(default = "default_initial_backoff")]
	pub initial_backoff: Duration,
	/// Upper bound for a single delay
	#[serde(default = "default_max_backoff")]
	pub max_backoff: Duration,
	/// Jitter to apply to the backoff duration
	#[serde(default)]
	pub jitter: JitterSetting,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_retries: default_max_attempts(),
			base_for_backoff: default_base_for_backoff(),
			initial_backoff: default_initial_backoff(),
			max_backoff: default_max_backoff(),
			jitter: JitterSetting::default(),
		}
	}
}

impl RetryConfig {
	/// A policy that performs the first attempt only
	pub fn disabled() -> Self {
		Self {
			max_retries: 0,
			..Self::default()
		}
	}

	/// Builds the backon backoff described by this configuration
	pub fn backoff(&self) -> ExponentialBuilder {
		let builder = ExponentialBuilder::default()
			.with_factor(self.base_for_backoff as f32)
			.with_min_delay(self.initial_backoff)
			.with_max_delay(self.max_backoff)
			.with_max_times(self.max_retries as usize);

		match self.jitter {
			JitterSetting::None => builder,
			JitterSetting::Full => builder.with_jitter(),
		}
	}
}

/// Runs `operation`, retrying it while it fails with a transient error.
///
/// Only [`QueryError::is_transient`] errors are retried; validation and
/// decoding failures are returned immediately.
pub async fn retry_transient<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T, QueryError>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, QueryError>>,
{
	operation
		.retry(config.backoff())
		.when(QueryError::is_transient)
		.notify(|err, delay| {
			tracing::warn!(
				error = %err,
				delay_ms = delay.as_millis() as u64,
				"Transient query failure, retrying"
			);
		})
		.await
}
