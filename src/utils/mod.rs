//! Utility modules for common functionality.
//!
//! - logging: Logging setup and error context
//! - parsing: Parsing utilities
//! - retry: Caller-level retry with exponential backoff
//! - tests: Test utilities
//! - time: Epoch-hour helpers

pub mod logging;
pub mod parsing;
pub mod retry;
pub mod tests;
pub mod time;

pub use parsing::*;
pub use retry::{retry_transient, JitterSetting, RetryConfig};
pub use time::{current_epoch_hours, epoch_hours, SECONDS_PER_HOUR};
