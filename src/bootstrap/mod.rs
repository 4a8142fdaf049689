//! Bootstrap module for loading contract configurations and running queries.
//!
//! This module wires the configuration repository to query clients and runs
//! one query per configured contract. It is the glue used by the binary and
//! is generic over the repository and client so that both can be mocked.
//!
//! # Functions
//! - `initialize_repository`: Loads contract configurations
//! - `create_targets`: Builds one query client per selected contract
//! - `run_queries`: Queries every target concurrently, retrying transient failures
//! - `validate_configuration`: Loads and constructs everything without sending requests

use futures::future::join_all;
use serde_json::{json, Value};
use std::{error::Error, path::Path, time::Duration};
use tracing::{debug, info, instrument, warn};

use crate::{
	models::{BlockHeader, ContractConfig, QueryResult},
	repositories::{ContractRepository, ContractRepositoryTrait},
	services::blockchain::{ContractQuery, HttpTransportClient, QueryClient, QueryError},
	utils::{retry_transient, RetryConfig},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// One contract bound to a ready-to-use client
#[derive(Clone, Debug)]
pub struct QueryTarget<C: ContractQuery> {
	pub name: String,
	pub slug: String,
	pub client: C,
	pub retry: RetryConfig,
}

/// What to ask every target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
	pub method: String,
	pub args: Vec<String>,
	pub latest_block: bool,
}

impl Default for QueryRequest {
	fn default() -> Self {
		Self {
			method: "totalSupply".to_string(),
			args: Vec::new(),
			latest_block: false,
		}
	}
}

/// Result of querying one target
#[derive(Debug)]
pub struct QueryOutcome {
	pub name: String,
	pub slug: String,
	pub result: std::result::Result<QueryResult, QueryError>,
	/// Present only when the latest block was requested
	pub latest_block: Option<std::result::Result<BlockHeader, QueryError>>,
}

impl QueryOutcome {
	pub fn is_success(&self) -> bool {
		self.result.is_ok() && !matches!(self.latest_block, Some(Err(_)))
	}

	/// JSON view of the outcome; errors are rendered as their message
	pub fn to_json(&self) -> Value {
		let mut output = json!({
			"name": self.name,
			"slug": self.slug,
		});

		match &self.result {
			Ok(result) => output["result"] = result.to_json(),
			Err(e) => output["error"] = json!(e.to_string()),
		}

		match &self.latest_block {
			Some(Ok(block)) => output["latest_block"] = block.to_json(),
			Some(Err(e)) => output["latest_block_error"] = json!(e.to_string()),
			None => {}
		}

		output
	}
}

/// Loads the contract repository, or returns the one provided.
///
/// # Errors
/// Returns an error if the configuration directory cannot be loaded
pub async fn initialize_repository<R: ContractRepositoryTrait>(
	repository: Option<R>,
	path: Option<&Path>,
) -> Result<R> {
	let repository = match repository {
		Some(repository) => repository,
		None => R::new(path).await?,
	};

	info!(
		contracts = repository.get_all().len(),
		"Contract configurations loaded"
	);
	Ok(repository)
}

/// Builds an HTTP query client from `config`, optionally overriding its deadline
pub fn create_client(
	config: &ContractConfig,
	timeout: Option<Duration>,
) -> std::result::Result<QueryClient<HttpTransportClient>, QueryError> {
	let client = QueryClient::from_config(config)?;
	Ok(match timeout {
		Some(timeout) => client.with_timeout(timeout),
		None => client,
	})
}

/// Builds one target per selected contract.
///
/// `slugs` selects contracts in the given order; an empty list selects all of
/// them sorted by slug.
///
/// # Errors
/// Returns an error for an unknown slug or a configuration the client rejects
pub fn create_targets<R: ContractRepositoryTrait>(
	repository: &R,
	slugs: &[String],
	timeout: Option<Duration>,
) -> Result<Vec<QueryTarget<QueryClient<HttpTransportClient>>>> {
	repository
		.select(slugs)?
		.into_iter()
		.map(|config| -> Result<QueryTarget<QueryClient<HttpTransportClient>>> {
			let client = create_client(&config, timeout)?;
			debug!(contract = %config.slug, methods = ?client.methods(), "Query client ready");
			Ok(QueryTarget {
				name: config.name.clone(),
				slug: config.slug.clone(),
				client,
				retry: config.retry.clone(),
			})
		})
		.collect()
}

/// Runs `request` against one target, retrying transient failures
#[instrument(skip_all, fields(contract = %target.slug, method = %request.method))]
pub async fn run_query<C: ContractQuery>(
	target: &QueryTarget<C>,
	request: &QueryRequest,
) -> QueryOutcome {
	let args: Vec<&str> = request.args.iter().map(String::as_str).collect();

	let result = retry_transient(&target.retry, || {
		target.client.call_with_str_args(&request.method, &args)
	})
	.await;

	match &result {
		Ok(value) => info!(result = %value, "Query succeeded"),
		Err(e) => warn!(error = %e, "Query failed"),
	}

	let latest_block = if request.latest_block {
		let block = retry_transient(&target.retry, || target.client.latest_block()).await;
		if let Err(e) = &block {
			warn!(error = %e, "Failed to fetch latest block");
		}
		Some(block)
	} else {
		None
	};

	QueryOutcome {
		name: target.name.clone(),
		slug: target.slug.clone(),
		result,
		latest_block,
	}
}

/// Runs `request` against all targets concurrently.
///
/// Outcomes are returned in target order; one failing target does not affect
/// the others.
pub async fn run_queries<C: ContractQuery>(
	targets: &[QueryTarget<C>],
	request: &QueryRequest,
) -> Vec<QueryOutcome> {
	join_all(targets.iter().map(|target| run_query(target, request))).await
}

/// Loads every configuration under `path` and builds a client for each.
///
/// Nothing is sent over the network. Returns the number of contracts found.
pub async fn validate_configuration(path: Option<&Path>) -> Result<usize> {
	let repository = initialize_repository::<ContractRepository>(None, path).await?;
	let targets = create_targets(&repository, &[], None)?;

	for target in &targets {
		info!(
			contract = %target.slug,
			methods = target.client.methods().len(),
			"✓ Contract configuration is valid"
		);
	}

	Ok(targets.len())
}
