//! HTTP transport implementation for blockchain interactions.
//!
//! Sends JSON-RPC 2.0 requests to a single node over HTTP(S). The transport
//! performs exactly one exchange per request: no retries and no endpoint
//! rotation. Deadlines are enforced by the caller, with a generous
//! request timeout on the underlying client as a backstop.

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use url::Url;

use crate::{
	models::redact_endpoint,
	services::blockchain::transports::{BlockchainTransport, TransportError},
};

/// Upper bound for a single HTTP exchange, independent of per-call deadlines
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Basic HTTP transport client for blockchain interactions
///
/// The underlying `reqwest::Client` pools connections and is cheap to clone;
/// clones share the pool. The client is never exposed for mutation.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	client: reqwest::Client,
	url: Url,
}

impl HttpTransportClient {
	/// Creates a transport bound to `url`. No request is sent.
	pub fn new(url: Url) -> Result<Self, anyhow::Error> {
		let client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(REQUEST_TIMEOUT)
			.connect_timeout(CONNECT_TIMEOUT)
			.build()
			.context("Failed to create base HTTP client")?;

		Ok(Self { client, url })
	}

	fn url_metadata(&self, method: &str) -> Option<HashMap<String, String>> {
		Some(HashMap::from([
			("url".to_string(), redact_endpoint(&self.url)),
			("rpc_method".to_string(), method.to_string()),
		]))
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.url.to_string()
	}

	/// Sends a JSON-RPC request and returns the parsed response document.
	///
	/// A response carrying a JSON-RPC `error` object is turned into
	/// [`TransportError::Rpc`]; the caller only ever sees documents with a
	/// `result` member (possibly missing or malformed).
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request_body = self.customize_request(method, params).await;

		let response = self
			.client
			.post(self.url.clone())
			.json(&request_body)
			.send()
			.await
			.map_err(|e| {
				let e = e.without_url();
				if e.is_timeout() {
					TransportError::timeout(
						format!("No response for {}", method),
						Some(Box::new(e)),
						self.url_metadata(method),
					)
				} else {
					TransportError::network(
						format!("Failed to send {} request", method),
						Some(Box::new(e)),
						self.url_metadata(method),
					)
				}
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::http(
				status,
				redact_endpoint(&self.url),
				body,
				None,
				self.url_metadata(method),
			));
		}

		let body = response.text().await.map_err(|e| {
			let e = e.without_url();
			if e.is_timeout() {
				TransportError::timeout(
					format!("Timed out reading {} response", method),
					Some(Box::new(e)),
					self.url_metadata(method),
				)
			} else {
				TransportError::network(
					format!("Failed to read {} response", method),
					Some(Box::new(e)),
					self.url_metadata(method),
				)
			}
		})?;

		let json: Value = serde_json::from_str(&body).map_err(|e| {
			TransportError::response_parse(
				format!("Invalid JSON in {} response", method),
				Some(Box::new(e)),
				self.url_metadata(method),
			)
		})?;

		if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
			let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("unknown error");
			let mut metadata = self.url_metadata(method).unwrap_or_default();
			if let Some(data) = error.get("data").filter(|d| !d.is_null()) {
				metadata.insert("data".to_string(), data.to_string());
			}
			return Err(TransportError::rpc(code, message, Some(metadata)));
		}

		Ok(json)
	}
}
