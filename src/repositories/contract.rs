//! Contract configuration repository implementation.
//!
//! Loads contract configurations from JSON files and serves them by slug.

#![allow(clippy::result_large_err)]

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;

use crate::{
	models::{ConfigLoader, ContractConfig},
	repositories::error::RepositoryError,
};

/// Repository for storing and retrieving contract configurations
#[derive(Clone)]
pub struct ContractRepository {
	/// Map of contract slugs to their configurations
	pub contracts: HashMap<String, ContractConfig>,
}

impl ContractRepository {
	/// Loads all contract configurations from `path`, or from the default
	/// directory when `None`
	pub async fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let contracts = Self::load_all(path).await?;
		Ok(ContractRepository { contracts })
	}
}

/// Interface for contract repository implementations
#[async_trait]
pub trait ContractRepositoryTrait: Clone + Send + Sync {
	/// Create a new repository instance
	async fn new(path: Option<&Path>) -> Result<Self, RepositoryError>
	where
		Self: Sized;

	/// Load all contract configurations from the given path
	async fn load_all(
		path: Option<&Path>,
	) -> Result<HashMap<String, ContractConfig>, RepositoryError>;

	/// Get a specific contract by slug
	fn get(&self, slug: &str) -> Option<ContractConfig>;

	/// Get all contracts
	///
	/// Returns a copy of the contract map to prevent external mutation.
	fn get_all(&self) -> HashMap<String, ContractConfig>;

	/// Contracts to query: the given slugs in order, or every contract sorted by
	/// slug when `slugs` is empty
	fn select(&self, slugs: &[String]) -> Result<Vec<ContractConfig>, RepositoryError> {
		if slugs.is_empty() {
			let mut all: Vec<_> = self.get_all().into_values().collect();
			all.sort_by(|a, b| a.slug.cmp(&b.slug));
			return Ok(all);
		}

		slugs
			.iter()
			.map(|slug| {
				self.get(slug).ok_or_else(|| {
					let mut known: Vec<_> = self.get_all().into_keys().collect();
					known.sort();
					RepositoryError::validation_error(
						format!("Unknown contract '{}'", slug),
						None,
						Some(HashMap::from([
							("slug".to_string(), slug.clone()),
							("known".to_string(), known.join(",")),
						])),
					)
				})
			})
			.collect()
	}
}

#[async_trait]
impl ContractRepositoryTrait for ContractRepository {
	async fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		ContractRepository::new(path).await
	}

	async fn load_all(
		path: Option<&Path>,
	) -> Result<HashMap<String, ContractConfig>, RepositoryError> {
		ContractConfig::load_all(path).await.map_err(|e| {
			RepositoryError::load_error(
				"Failed to load contracts",
				Some(Box::new(e)),
				Some(HashMap::from([(
					"path".to_string(),
					path.map_or_else(|| "default".to_string(), |p| p.display().to_string()),
				)])),
			)
		})
	}

	fn get(&self, slug: &str) -> Option<ContractConfig> {
		self.contracts.get(slug).cloned()
	}

	fn get_all(&self) -> HashMap<String, ContractConfig> {
		self.contracts.clone()
	}
}
