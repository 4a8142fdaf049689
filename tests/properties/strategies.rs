use contract_query::{
	models::{ContractConfig, MethodSignature, ReturnTypes},
	utils::tests::builders::contract::ContractConfigBuilder,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const MIN_METHODS: usize = 1;
const MAX_METHODS: usize = 8;
const MAX_PARAMS: usize = 3;

const SOLIDITY_TYPES: [&str; 9] = [
	"uint256", "uint8", "int256", "address", "bool", "bytes32", "string", "bytes", "uint256[]",
];

pub fn identifier_strategy() -> impl Strategy<Value = String> {
	"[a-zA-Z_][a-zA-Z0-9_]{0,15}".prop_map(|s| s.to_string())
}

pub fn solidity_type_strategy() -> impl Strategy<Value = String> {
	prop::sample::select(SOLIDITY_TYPES.to_vec()).prop_map(|t| t.to_string())
}

pub fn method_signature_strategy() -> impl Strategy<Value = MethodSignature> {
	(
		prop::collection::vec(solidity_type_strategy(), 0..MAX_PARAMS),
		prop::collection::vec(solidity_type_strategy(), 1..MAX_PARAMS),
	)
		.prop_map(|(params, mut returns)| MethodSignature {
			params,
			returns: if returns.len() == 1 {
				ReturnTypes::One(returns.remove(0))
			} else {
				ReturnTypes::Many(returns)
			},
		})
}

pub fn method_table_strategy() -> impl Strategy<Value = BTreeMap<String, MethodSignature>> {
	prop::collection::btree_map(
		identifier_strategy(),
		method_signature_strategy(),
		MIN_METHODS..MAX_METHODS,
	)
}

pub fn contract_config_strategy() -> impl Strategy<Value = ContractConfig> {
	("[a-z0-9_]{1,12}", any::<[u8; 20]>(), 1u64..120_000).prop_map(
		|(slug, address, timeout_ms)| {
			ContractConfigBuilder::new()
				.name(&format!("Token {}", slug))
				.slug(&slug)
				.contract_address(&format!("0x{}", hex::encode(address)))
				.timeout_ms(timeout_ms)
				.build()
		},
	)
}
