//! Read-only contract query interface.
//!
//! Every operation suspends the caller until a response arrives or a typed
//! error is produced. Implementations hold no mutable state, so a single
//! client can serve any number of concurrent calls.

use alloy::core::dyn_abi::DynSolValue;
use async_trait::async_trait;
use std::time::Duration;

use crate::{
	models::{BlockHeader, QueryResult},
	services::blockchain::QueryError,
};

/// Defines the operations of a contract query client
#[async_trait]
pub trait ContractQuery: Send + Sync + Clone {
	/// Calls a declared read method under the client's default deadline
	///
	/// Arguments are validated against the interface before any network
	/// activity; undeclared methods fail with [`QueryError::UnknownMethod`].
	async fn call(&self, method: &str, args: &[DynSolValue]) -> Result<QueryResult, QueryError>;

	/// Same as [`ContractQuery::call`] with an explicit deadline
	///
	/// Expiry yields a transport failure of kind `Timeout`.
	async fn call_with_timeout(
		&self,
		method: &str,
		args: &[DynSolValue],
		timeout: Duration,
	) -> Result<QueryResult, QueryError>;

	/// Calls a method with arguments given as text, coerced to the declared types
	async fn call_with_str_args(
		&self,
		method: &str,
		args: &[&str],
	) -> Result<QueryResult, QueryError>;

	/// Retrieves the number and timestamp of the latest block
	async fn latest_block(&self) -> Result<BlockHeader, QueryError>;
}
