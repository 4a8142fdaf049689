//! Read-only query client for EVM-compatible smart contracts.
//!
//! This library binds a JSON-RPC endpoint, a contract address and an interface
//! description into one handle that can invoke any declared read method and
//! return a decoded, precision-preserving result. It includes:
//!
//! - Configuration management through JSON files
//! - Interface descriptions from JSON ABIs or compact method tables
//! - A JSON-RPC over HTTP transport behind a mockable trait
//! - Caller-side retry with exponential backoff
//!
//! # Module Structure
//!
//! - `bootstrap`: Wires configuration to clients and runs queries
//! - `models`: Contract, interface, configuration and secret models
//! - `repositories`: Configuration storage and lookup by slug
//! - `services`: Query client and transport
//! - `utils`: Logging, retry, time and parsing helpers

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
