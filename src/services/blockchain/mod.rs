//! Blockchain client interfaces and implementations.
//!
//! - `ContractQuery`: read-only contract call interface
//! - `QueryClient`: its EVM implementation
//! - Network transport implementations
//! - Error handling for query operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::ContractQuery;
pub use clients::QueryClient;
pub use error::{QueryError, TransportFailureKind};
pub use transports::{BlockchainTransport, HttpTransportClient, TransportError};
