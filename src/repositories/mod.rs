//! Repository implementations for configuration management.
//!
//! - Contract: loads contract configurations and serves them by slug

mod contract;
mod error;

pub use contract::{ContractRepository, ContractRepositoryTrait};
pub use error::RepositoryError;
