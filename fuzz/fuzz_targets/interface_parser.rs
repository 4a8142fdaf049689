#![no_main]

use contract_query::models::InterfaceSpec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let json = String::from_utf8_lossy(data);
	let _ = InterfaceSpec::from_json_str(&json);
});
