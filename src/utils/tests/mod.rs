//! Test helper utilities
//!
//! - `builders`: Builders and fixtures for configuration models
//! - `rpc`: JSON-RPC response fixtures

pub mod builders {
	pub mod contract;
}


pub use builders::*;
pub use rpc::*;
