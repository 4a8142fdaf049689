use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};
use url::Url;

use crate::{
	models::{
		blockchain::evm::{ContractDescriptor, InterfaceSource},
		SecretValue,
	},
	services::blockchain::QueryError,
	utils::RetryConfig,
};

/// Deadline applied to a call when the configuration does not set one
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

/// Parses a JSON-RPC endpoint. Only `http` and `https` URLs with a host are accepted.
pub fn parse_endpoint_url(endpoint: &str) -> Result<Url, QueryError> {
	let url = Url::parse(endpoint).map_err(|e| {
		QueryError::invalid_configuration("Malformed endpoint URL", Some(Box::new(e)), None)
	})?;

	match url.scheme() {
		"http" | "https" if url.host().is_some() => Ok(url),
		scheme => Err(QueryError::invalid_configuration(
			format!("Unsupported endpoint scheme '{}'", scheme),
			None,
			None,
		)),
	}
}

/// Scheme, host and port of an endpoint.
///
/// Paths, queries and credentials often carry API keys, so only the origin
/// goes into error messages and logs.
pub fn redact_endpoint(url: &Url) -> String {
	url.origin().ascii_serialization()
}

/// Everything needed to query one deployed contract.
///
/// Loaded from a JSON file; one file per contract.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
	/// Human-readable name, e.g. "CNS Token"
	pub name: String,

	/// Unique identifier used to select the contract on the command line
	pub slug: String,

	/// JSON-RPC endpoint (can be a secret value)
	pub endpoint_url: SecretValue,

	/// `0x`-prefixed contract address
	pub contract_address: String,

	/// Interface description: JSON ABI, ABI file reference or method table
	pub interface: InterfaceSource,

	/// Per-call deadline in milliseconds
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,

	/// Backoff applied by callers that retry transient failures
	#[serde(default)]
	pub retry: RetryConfig,
}

impl ContractConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	/// Resolves and parses the endpoint URL
	pub fn endpoint(&self) -> Result<Url, QueryError> {
		let resolved = self.endpoint_url.resolve().map_err(|e| {
			QueryError::invalid_configuration(
				"Failed to resolve endpoint URL",
				Some(e),
				Some(HashMap::from([("contract".to_string(), self.slug.clone())])),
			)
		})?;

		parse_endpoint_url(resolved.as_str())
	}

	/// Validates the address and builds the interface the contract is queried through
	pub fn descriptor(&self) -> Result<ContractDescriptor, QueryError> {
		let interface = self.interface.resolve()?;
		ContractDescriptor::new(&self.contract_address, interface)
	}
}
