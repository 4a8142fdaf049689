//! Deployed contract descriptor.

use alloy::primitives::Address;
use std::{collections::HashMap, str::FromStr, sync::Arc};

use crate::{models::blockchain::evm::InterfaceSpec, services::blockchain::QueryError};

/// Parses a contract address written as `0x` followed by 40 hex digits.
///
/// All-lowercase and all-uppercase addresses are accepted as is. Mixed-case
/// addresses must carry a valid EIP-55 checksum.
pub fn parse_contract_address(address: &str) -> Result<Address, QueryError> {
	let metadata = || Some(HashMap::from([("address".to_string(), address.to_string())]));

	let Some(digits) = address.strip_prefix("0x") else {
		return Err(QueryError::invalid_configuration(
			"Contract address must start with 0x",
			None,
			metadata(),
		));
	};

	if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(QueryError::invalid_configuration(
			"Contract address must be 40 hexadecimal digits",
			None,
			metadata(),
		));
	}

	let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
	let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

	let parsed = if has_lower && has_upper {
		Address::parse_checksummed(address, None).map_err(|e| {
			QueryError::invalid_configuration(
				"Contract address has an invalid checksum",
				Some(Box::new(e)),
				metadata(),
			)
		})?
	} else {
		Address::from_str(address).map_err(|e| {
			QueryError::invalid_configuration(
				"Invalid contract address",
				Some(Box::new(e)),
				metadata(),
			)
		})?
	};

	Ok(parsed)
}

/// A deployed contract: its address plus the interface it is queried through
///
/// The interface is shared, so cloning a descriptor is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDescriptor {
	address: Address,
	interface: Arc<InterfaceSpec>,
}

impl ContractDescriptor {
	/// Validates `address` and pairs it with `interface`
	pub fn new(address: &str, interface: InterfaceSpec) -> Result<Self, QueryError> {
		Ok(Self::from_parts(parse_contract_address(address)?, interface))
	}

	pub fn from_parts(address: Address, interface: InterfaceSpec) -> Self {
		Self {
			address,
			interface: Arc::new(interface),
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn interface(&self) -> &InterfaceSpec {
		&self.interface
	}
}
