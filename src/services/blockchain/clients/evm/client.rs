//! Read-only query client for EVM-compatible contracts.
//!
//! A [`QueryClient`] binds one JSON-RPC endpoint to one deployed contract.
//! Calls are encoded locally against the contract's interface, sent as
//! `eth_call` against the latest block and decoded into the declared return
//! type. Nothing is cached: every call produces exactly one request.

use alloy::core::dyn_abi::DynSolValue;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::{collections::HashMap, time::Duration};

use crate::{
	models::{
		parse_endpoint_url, redact_endpoint, BlockHeader, ContractConfig, ContractDescriptor,
		PreparedCall, QueryResult, DEFAULT_TIMEOUT_MS,
	},
	services::blockchain::{
		client::ContractQuery,
		transports::{BlockchainTransport, HttpTransportClient},
		QueryError, TransportFailureKind,
	},
};

/// Client for read-only calls against a single contract
///
/// Cheap to clone; clones share the transport's connection pool and the
/// contract's interface.
#[derive(Clone, Debug)]
pub struct QueryClient<T: Send + Sync + Clone> {
	/// The underlying transport for RPC communication
	transport: T,
	contract: ContractDescriptor,
	timeout: Duration,
}

impl<T: Send + Sync + Clone> QueryClient<T> {
	/// Creates a client over an existing transport
	pub fn new_with_transport(transport: T, contract: ContractDescriptor) -> Self {
		Self {
			transport,
			contract,
			timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
		}
	}

	/// Replaces the deadline applied by `call` and `latest_block`
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn contract(&self) -> &ContractDescriptor {
		&self.contract
	}

	/// Names of the methods that can be called, in lexical order
	pub fn methods(&self) -> Vec<&str> {
		self.contract.interface().method_names().collect()
	}

	/// Validates `args` against `method` and computes its call data
	///
	/// Pure: nothing is sent.
	pub fn prepare_call(
		&self,
		method: &str,
		args: &[DynSolValue],
	) -> Result<PreparedCall, QueryError> {
		let spec = self.contract.interface().method(method)?;
		let calldata = spec.encode_call(args)?;

		Ok(PreparedCall {
			method: method.to_string(),
			selector: spec.selector(),
			calldata: calldata.into(),
		})
	}
}

impl QueryClient<HttpTransportClient> {
	/// Creates a client for `contract` reachable through `endpoint`
	///
	/// Fails with [`QueryError::InvalidConfiguration`] for anything but an
	/// absolute `http`/`https` URL. No request is sent.
	pub fn new(endpoint: &str, contract: ContractDescriptor) -> Result<Self, QueryError> {
		let url = parse_endpoint_url(endpoint)?;
		let origin = redact_endpoint(&url);
		let transport = HttpTransportClient::new(url).map_err(|e| {
			QueryError::invalid_configuration(
				"Failed to create HTTP transport",
				Some(e.into()),
				Some(HashMap::from([("endpoint".to_string(), origin)])),
			)
		})?;

		Ok(Self::new_with_transport(transport, contract))
	}

	/// Creates a client from a loaded contract configuration
	pub fn from_config(config: &ContractConfig) -> Result<Self, QueryError> {
		let url = config.endpoint()?;
		let contract = config.descriptor()?;
		let transport = HttpTransportClient::new(url).map_err(|e| {
			QueryError::invalid_configuration(
				"Failed to create HTTP transport",
				Some(e.into()),
				Some(HashMap::from([("contract".to_string(), config.slug.clone())])),
			)
		})?;

		Ok(Self::new_with_transport(transport, contract).with_timeout(config.timeout()))
	}
}

impl<T: Send + Sync + Clone + BlockchainTransport> QueryClient<T> {
	/// Sends one request under `timeout` and returns its `result` member
	async fn request(
		&self,
		rpc_method: &str,
		params: Value,
		timeout: Duration,
	) -> Result<Value, QueryError> {
		let response = tokio::time::timeout(
			timeout,
			self.transport.send_raw_request(rpc_method, Some(params)),
		)
		.await
		.map_err(|_| {
			QueryError::transport_failure(
				TransportFailureKind::Timeout,
				format!("No response to {} within {}ms", rpc_method, timeout.as_millis()),
				None,
				Some(HashMap::from([(
					"rpc_method".to_string(),
					rpc_method.to_string(),
				)])),
			)
		})??;

		match response.get("result") {
			Some(result) if !result.is_null() => Ok(result.clone()),
			_ => Err(QueryError::decode_failure(
				format!("Missing 'result' field in {} response", rpc_method),
				None,
				None,
			)),
		}
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> ContractQuery for QueryClient<T> {
	async fn call(&self, method: &str, args: &[DynSolValue]) -> Result<QueryResult, QueryError> {
		self.call_with_timeout(method, args, self.timeout).await
	}

	async fn call_with_timeout(
		&self,
		method: &str,
		args: &[DynSolValue],
		timeout: Duration,
	) -> Result<QueryResult, QueryError> {
		let prepared = self.prepare_call(method, args)?;
		let spec = self.contract.interface().method(method)?;

		let params = json!([
			{
				"to": format!("0x{:x}", self.contract.address()),
				"data": format!("0x{}", hex::encode(&prepared.calldata)),
			},
			"latest"
		]);

		let result = self.request("eth_call", params, timeout).await?;

		let encoded = result.as_str().ok_or_else(|| {
			QueryError::decode_failure(
				format!("eth_call result is not a string: {}", result),
				None,
				None,
			)
		})?;

		let data = hex::decode(encoded.trim_start_matches("0x")).map_err(|e| {
			QueryError::decode_failure(
				"eth_call result is not valid hex",
				Some(Box::new(e)),
				Some(HashMap::from([("method".to_string(), method.to_string())])),
			)
		})?;

		let value = spec.decode_output(&data)?;

		Ok(QueryResult::new(method, spec.return_type(), value))
	}

	async fn call_with_str_args(
		&self,
		method: &str,
		args: &[&str],
	) -> Result<QueryResult, QueryError> {
		let values = self.contract.interface().method(method)?.coerce_args(args)?;
		self.call(method, &values).await
	}

	async fn latest_block(&self) -> Result<BlockHeader, QueryError> {
		let result = self
			.request("eth_getBlockByNumber", json!(["latest", false]), self.timeout)
			.await?;

		serde_json::from_value(result).map_err(|e| {
			QueryError::decode_failure(
				"Malformed block header",
				Some(Box::new(e)),
				None,
			)
		})
	}
}
