//! Domain models and data structures.
//!
//! - `blockchain`: EVM contract interfaces, descriptors and query results
//! - `config`: Configuration loading and validation
//! - `core`: Contract configuration
//! - `security`: Secret values

mod blockchain;
mod config;
mod core;
mod security;

pub use blockchain::evm::{
	format_value, parse_contract_address, value_to_json, BlockHeader, ContractDescriptor,
	InterfaceSource, InterfaceSpec, MethodSignature, MethodSpec, PreparedCall, QueryResult,
	ReturnTypes,
};

pub use core::{parse_endpoint_url, redact_endpoint, ContractConfig, DEFAULT_TIMEOUT_MS};

pub use config::{ConfigError, ConfigLoader, DEFAULT_CONTRACTS_DIR};

pub use security::{SecretString, SecretValue, SecurityError, SecurityResult};
