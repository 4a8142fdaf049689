//! Ethereum Virtual Machine (EVM) specific models.
//!
//! Contract interfaces, deployed contract descriptors and the values returned
//! by read-only calls.

mod contract;
mod interface;
mod query;

pub use contract::{parse_contract_address, ContractDescriptor};
pub use interface::{InterfaceSource, InterfaceSpec, MethodSignature, MethodSpec, ReturnTypes};
pub use query::{format_value, value_to_json, BlockHeader, PreparedCall, QueryResult};
