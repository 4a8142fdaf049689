//! Blockchain client implementations.
//!
//! - EVM query client for Ethereum-compatible chains

mod evm {
	pub mod client;
}

pub use evm::client::QueryClient;
