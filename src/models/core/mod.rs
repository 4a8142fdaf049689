//! Core domain models.
//!
//! - `ContractConfig`: how to reach one deployed contract and what it exposes

mod contract;

pub use contract::{parse_endpoint_url, redact_endpoint, ContractConfig, DEFAULT_TIMEOUT_MS};
