#![no_main]

use alloy::core::dyn_abi::DynSolType;
use contract_query::models::MethodSpec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let outputs = vec![
		DynSolType::Uint(256),
		DynSolType::String,
		DynSolType::Array(Box::new(DynSolType::Address)),
	];
	if let Ok(method) = MethodSpec::new("decode", vec![], outputs) {
		let _ = method.decode_output(data);
	}
});
