//! Contract query command-line entry point.
//!
//! Runs one read-only method against every configured contract (or the ones
//! selected with `--contract`) and prints the decoded results together with
//! the current number of hours since the Unix epoch.
//!
//! # Flow
//! 1. Applies CLI options to the environment and sets up logging
//! 2. Loads contract configurations from the configuration directory
//! 3. Builds one query client per selected contract
//! 4. Queries all contracts concurrently, retrying transient failures
//! 5. Prints the results as text or JSON

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::{
	bootstrap::{
		create_targets, initialize_repository, run_queries, validate_configuration, QueryOutcome,
		QueryRequest, Result,
	},
	models::DEFAULT_CONTRACTS_DIR,
	repositories::ContractRepository,
	utils::{
		current_epoch_hours, logging::setup_logging, normalize_slug, parse_string_to_bytes_size,
		parse_timeout_ms,
	},
};

use clap::Parser;
use dotenvy::dotenv_override;
use serde_json::{json, Value};
use std::{
	env::{set_var, var},
	path::PathBuf,
	time::Duration,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
	name = "contract-query",
	about = "Runs read-only methods against EVM smart contracts and prints the decoded results.",
	version
)]
struct Cli {
	/// Directory holding contract configuration files
	#[arg(long, value_name = "DIR", default_value = DEFAULT_CONTRACTS_DIR)]
	config_dir: PathBuf,

	/// Contract to query, by slug (repeatable; default: all configured contracts)
	#[arg(long = "contract", value_name = "SLUG")]
	contracts: Vec<String>,

	/// Method to call
	#[arg(long, value_name = "NAME", default_value = "totalSupply")]
	method: String,

	/// Method argument, in declaration order (repeatable)
	#[arg(long = "arg", value_name = "VALUE")]
	args: Vec<String>,

	/// Deadline per call in milliseconds, overriding the configured one
	#[arg(long, value_name = "MS", value_parser = parse_timeout_ms)]
	timeout_ms: Option<Duration>,

	/// Also fetch the latest block number and timestamp
	#[arg(long)]
	latest_block: bool,

	/// Print results as JSON
	#[arg(long)]
	json: bool,

	/// Validate configuration files without sending any request
	#[arg(long)]
	check: bool,

	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Override any existing environment variables with the .env file
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}
	}

	fn request(&self) -> QueryRequest {
		QueryRequest {
			method: self.method.clone(),
			args: self.args.clone(),
			latest_block: self.latest_block,
		}
	}

	fn slugs(&self) -> Vec<String> {
		self.contracts.iter().map(|s| normalize_slug(s)).collect()
	}
}

/// Main entry point for the contract query CLI.
///
/// # Errors
/// Returns an error if configuration loading fails or if any query fails.
#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config_dir = cli.config_dir.as_path();

	if cli.check {
		info!("Validating configuration files...");
		let count = validate_configuration(Some(config_dir))
			.await
			.map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
		info!(
			"Configuration validation completed successfully! {} contract(s) found",
			count
		);
		return Ok(());
	}

	let repository = initialize_repository::<ContractRepository>(None, Some(config_dir))
		.await
		.map_err(|e| {
			anyhow::anyhow!(
				"Failed to load contract configurations from {}: {}",
				config_dir.display(),
				e
			)
		})?;

	let targets = create_targets(&repository, &cli.slugs(), cli.timeout_ms)?;
	if targets.is_empty() {
		info!("No contracts configured in {}. Exiting...", config_dir.display());
		return Ok(());
	}

	let request = cli.request();
	info!(
		contracts = targets.len(),
		method = %request.method,
		"Querying contracts"
	);

	let outcomes = run_queries(&targets, &request).await;
	let epoch_hours = current_epoch_hours();

	if cli.json {
		println!("{:#}", render_json(&outcomes, epoch_hours));
	} else {
		print!("{}", render_text(&outcomes, epoch_hours));
	}

	let failed = outcomes.iter().filter(|o| !o.is_success()).count();
	if failed > 0 {
		return Err(anyhow::anyhow!("{} of {} queries failed", failed, outcomes.len()).into());
	}

	Ok(())
}

fn render_text(outcomes: &[QueryOutcome], epoch_hours: u64) -> String {
	let mut output = String::new();

	for outcome in outcomes {
		match &outcome.result {
			Ok(result) => output.push_str(&format!(
				"{} ({}) {}: {}\n",
				outcome.name,
				outcome.slug,
				result.method(),
				result
			)),
			Err(e) => output.push_str(&format!(
				"{} ({}) error: {}\n",
				outcome.name, outcome.slug, e
			)),
		}

		match &outcome.latest_block {
			Some(Ok(block)) => output.push_str(&format!(
				"  latest block: {} (timestamp {})\n",
				block.number, block.timestamp
			)),
			Some(Err(e)) => output.push_str(&format!("  latest block error: {}\n", e)),
			None => {}
		}
	}

	output.push_str(&format!("epoch hours: {}\n", epoch_hours));
	output
}

fn render_json(outcomes: &[QueryOutcome], epoch_hours: u64) -> Value {
	json!({
		"epoch_hours": epoch_hours,
		"results": outcomes.iter().map(QueryOutcome::to_json).collect::<Vec<_>>(),
	})
}
