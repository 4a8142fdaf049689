//! Network transport implementations for blockchain clients.
//!
//! - `BlockchainTransport`: the seam between the query client and the node
//! - `HttpTransportClient`: JSON-RPC 2.0 over HTTP(S)

mod error;
mod http;

pub use error::TransportError;
pub use http::HttpTransportClient;

use serde::Serialize;
use serde_json::{json, Value};

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL requests are sent to
	async fn get_current_url(&self) -> String;

	/// Send a raw JSON-RPC request and return the full response document
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize;

	/// Builds the JSON-RPC 2.0 envelope for a request
	async fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into()).unwrap_or_else(|| json!([]))
		})
	}
}
