//! Values produced by read-only contract calls.

use alloy::{
	core::dyn_abi::{DynSolType, DynSolValue},
	primitives::{Bytes, I256, U256},
};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

/// Call data for a method, computed without touching the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
	/// Interface key the call was prepared for
	pub method: String,
	/// First four bytes of the keccak-256 hash of the signature
	pub selector: [u8; 4],
	/// Selector followed by the ABI-encoded arguments
	pub calldata: Bytes,
}

/// Decoded return value of a read-only call
///
/// Serializes as `{"method", "type", "value"}`. Integers are written as
/// decimal strings so values above 2^53 survive JSON consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
	method: String,
	kind: DynSolType,
	value: DynSolValue,
}

impl QueryResult {
	pub fn new(method: impl Into<String>, kind: DynSolType, value: DynSolValue) -> Self {
		Self {
			method: method.into(),
			kind,
			value,
		}
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	/// Declared return type
	pub fn kind(&self) -> &DynSolType {
		&self.kind
	}

	pub fn value(&self) -> &DynSolValue {
		&self.value
	}

	pub fn into_value(self) -> DynSolValue {
		self.value
	}

	/// The value as an unsigned integer, if it is one
	pub fn as_uint(&self) -> Option<U256> {
		match self.value {
			DynSolValue::Uint(value, _) => Some(value),
			_ => None,
		}
	}

	/// The value as a signed integer, if it is one
	pub fn as_int(&self) -> Option<I256> {
		match self.value {
			DynSolValue::Int(value, _) => Some(value),
			_ => None,
		}
	}

	/// JSON rendering of the value alone
	pub fn to_json(&self) -> Value {
		value_to_json(&self.value)
	}
}

impl std::fmt::Display for QueryResult {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", format_value(&self.value))
	}
}

impl Serialize for QueryResult {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("QueryResult", 3)?;
		state.serialize_field("method", &self.method)?;
		state.serialize_field("type", &self.kind.sol_type_name())?;
		state.serialize_field("value", &self.to_json())?;
		state.end()
	}
}

/// Human-readable rendering of a decoded value
///
/// Integers print in full decimal, addresses and byte strings as lowercase
/// `0x` hex, composites as comma-separated lists.
pub fn format_value(value: &DynSolValue) -> String {
	let join = |items: &[DynSolValue]| {
		items
			.iter()
			.map(format_value)
			.collect::<Vec<String>>()
			.join(",")
	};

	match value {
		DynSolValue::Address(addr) => format!("0x{:x}", addr),
		DynSolValue::FixedBytes(bytes, size) => {
			format!("0x{}", hex::encode(&bytes[..(*size).min(32)]))
		}
		DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
		DynSolValue::Int(num, _) => num.to_string(),
		DynSolValue::Uint(num, _) => num.to_string(),
		DynSolValue::Bool(b) => b.to_string(),
		DynSolValue::String(s) => s.clone(),
		DynSolValue::Array(arr) | DynSolValue::FixedArray(arr) => format!("[{}]", join(arr)),
		DynSolValue::Tuple(tuple) => format!("({})", join(tuple)),
		DynSolValue::Function(function) => format!("0x{}", hex::encode(function)),
	}
}

/// Structured JSON rendering of a decoded value
pub fn value_to_json(value: &DynSolValue) -> Value {
	match value {
		DynSolValue::Bool(b) => json!(b),
		DynSolValue::String(s) => json!(s),
		DynSolValue::Array(items)
		| DynSolValue::FixedArray(items)
		| DynSolValue::Tuple(items) => Value::Array(items.iter().map(value_to_json).collect()),
		other => json!(format_value(other)),
	}
}

/// Number and timestamp of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
	#[serde(with = "alloy::serde::quantity")]
	pub number: u64,
	/// Unix seconds
	#[serde(with = "alloy::serde::quantity")]
	pub timestamp: u64,
}

impl BlockHeader {
	/// Decimal JSON view, as opposed to the hex quantities of the RPC encoding
	pub fn to_json(&self) -> Value {
		json!({
			"number": self.number,
			"timestamp": self.timestamp,
		})
	}
}
