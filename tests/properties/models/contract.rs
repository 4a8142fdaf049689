use alloy::primitives::Address;
use contract_query::{models::parse_contract_address, services::blockchain::QueryError};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_single_case_addresses_are_accepted(bytes in any::<[u8; 20]>()) {
		let lower = format!("0x{}", hex::encode(bytes));
		let upper = format!("0x{}", hex::encode_upper(bytes));

		prop_assert_eq!(parse_contract_address(&lower).unwrap(), Address::from(bytes));
		prop_assert_eq!(parse_contract_address(&upper).unwrap(), Address::from(bytes));
	}

	#[test]
	fn test_checksummed_addresses_are_accepted(bytes in any::<[u8; 20]>()) {
		let address = Address::from(bytes);
		let checksummed = address.to_checksum(None);

		prop_assert_eq!(parse_contract_address(&checksummed).unwrap(), address);
	}

	#[test]
	fn test_wrong_length_is_rejected(digits in "[0-9a-f]{0,64}") {
		prop_assume!(digits.len() != 40);
		let is_invalid = matches!(
			parse_contract_address(&format!("0x{}", digits)),
			Err(QueryError::InvalidConfiguration(_))
		);
		prop_assert!(is_invalid);
	}

	#[test]
	fn test_missing_prefix_is_rejected(bytes in any::<[u8; 20]>()) {
		let is_invalid = matches!(
			parse_contract_address(&hex::encode(bytes)),
			Err(QueryError::InvalidConfiguration(_))
		);
		prop_assert!(is_invalid);
	}
}
