//! Contract configuration loading and validation.
//!
//! Implements [`ConfigLoader`] for [`ContractConfig`]. Files are keyed by
//! slug; relative ABI file paths are resolved against the directory of the
//! configuration file that references them.

use async_trait::async_trait;
use std::{collections::HashMap, path::Path};

use crate::{
	models::{
		config::error::ConfigError, redact_endpoint, ConfigLoader, ContractConfig, SecretValue,
	},
	utils::normalize_slug,
};

/// Directory scanned when no configuration path is given
pub const DEFAULT_CONTRACTS_DIR: &str = "config/contracts";

fn path_metadata(path: &Path) -> Option<HashMap<String, String>> {
	Some(HashMap::from([(
		"path".to_string(),
		path.display().to_string(),
	)]))
}

#[async_trait]
impl ConfigLoader for ContractConfig {
	/// Replaces an environment-sourced endpoint with its plain value
	async fn resolve_secrets(&self) -> Result<Self, ConfigError> {
		let mut contract = self.clone();

		let resolved = self.endpoint_url.resolve().map_err(|e| {
			ConfigError::parse_error(
				format!("failed to resolve endpoint URL: {}", e),
				Some(e),
				Some(HashMap::from([("contract".to_string(), self.slug.clone())])),
			)
		})?;
		contract.endpoint_url = SecretValue::Plain(resolved);

		Ok(contract)
	}

	/// Loads every JSON file in the directory, keyed by slug
	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let contract_dir = path.unwrap_or(Path::new(DEFAULT_CONTRACTS_DIR));

		if !contract_dir.exists() {
			return Err(ConfigError::file_error(
				"contracts directory not found",
				None,
				path_metadata(contract_dir),
			));
		}

		let entries = std::fs::read_dir(contract_dir).map_err(|e| {
			ConfigError::file_error(
				format!("failed to read contracts directory: {}", e),
				Some(Box::new(e)),
				path_metadata(contract_dir),
			)
		})?;

		let mut paths = Vec::new();
		for entry in entries {
			let entry = entry.map_err(|e| {
				ConfigError::file_error(
					format!("failed to read directory entry: {}", e),
					Some(Box::new(e)),
					path_metadata(contract_dir),
				)
			})?;
			let path = entry.path();
			if Self::is_json_file(&path) {
				paths.push(path);
			}
		}
		// Stable order so duplicate errors name the same file on every run
		paths.sort();

		let mut pairs: Vec<(String, Self)> = Vec::new();
		for path in paths {
			let contract = Self::load_from_path(&path).await?;

			let existing: Vec<&ContractConfig> = pairs.iter().map(|(_, c)| c).collect();
			Self::validate_uniqueness(&existing, &contract, &path.display().to_string())?;

			pairs.push((contract.slug.clone(), contract));
		}

		Ok(T::from_iter(pairs))
	}

	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open contract config file: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		let mut config: ContractConfig = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse contract config: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		if let Some(base) = path.parent() {
			config.interface = config.interface.relative_to(base);
		}

		config = config.resolve_secrets().await?;
		config.validate()?;

		Ok(config)
	}

	/// Checks that the contract can be queried as configured.
	///
	/// Covers the slug format, the endpoint URL, the contract address, the
	/// interface (including any referenced ABI file) and the timeout.
	fn validate(&self) -> Result<(), ConfigError> {
		let metadata = Some(HashMap::from([("contract".to_string(), self.slug.clone())]));

		if self.name.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Contract name is required",
				None,
				metadata,
			));
		}

		if self.slug.is_empty()
			|| !self
				.slug
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
		{
			return Err(ConfigError::validation_error(
				"Slug must contain only lowercase letters, numbers, and underscores",
				None,
				metadata,
			));
		}

		if !(self.endpoint_url.starts_with("http://") || self.endpoint_url.starts_with("https://"))
		{
			return Err(ConfigError::validation_error(
				"Endpoint URL must start with http:// or https://",
				None,
				metadata,
			));
		}

		self.endpoint().map_err(|e| {
			ConfigError::validation_error("Invalid endpoint URL", Some(Box::new(e)), metadata.clone())
		})?;

		self.descriptor().map_err(|e| {
			ConfigError::validation_error(
				format!("Invalid contract description: {}", e),
				Some(Box::new(e)),
				metadata.clone(),
			)
		})?;

		if self.timeout_ms == 0 {
			return Err(ConfigError::validation_error(
				"timeout_ms must be greater than 0",
				None,
				metadata,
			));
		}

		self.validate_protocol();

		Ok(())
	}

	fn validate_protocol(&self) {
		if !self.endpoint_url.starts_with("http://") {
			return;
		}
		if let Ok(url) = self.endpoint() {
			tracing::warn!(
				"Contract '{}' uses an insecure endpoint URL: {}",
				self.slug,
				redact_endpoint(&url)
			);
		}
	}

	fn validate_uniqueness(
		instances: &[&Self],
		current_instance: &Self,
		file_path: &str,
	) -> Result<(), ConfigError> {
		let slug = normalize_slug(&current_instance.slug);
		if instances
			.iter()
			.any(|existing| normalize_slug(&existing.slug) == slug)
		{
			return Err(ConfigError::validation_error(
				format!("Duplicate contract slug found: '{}'", current_instance.slug),
				None,
				Some(HashMap::from([
					("contract_slug".to_string(), current_instance.slug.clone()),
					("path".to_string(), file_path.to_string()),
				])),
			));
		}
		Ok(())
	}
}
