//! Security models
//!
//! - `error`: Error types for secret resolution
//! - `secret`: Secret values with zeroization

mod error;
mod secret;

pub use error::{SecurityError, SecurityResult};
pub use secret::{SecretString, SecretValue};
