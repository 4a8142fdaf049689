//! Contract interface descriptions.
//!
//! An [`InterfaceSpec`] maps method names to their parameter and return
//! types. It is built once, from a JSON ABI or from an explicit method table,
//! and then only read: it drives argument validation, call-data encoding and
//! return-value decoding.

use alloy::core::dyn_abi::{DynSolType, DynSolValue};
use alloy::json_abi::{JsonAbi, StateMutability};
use alloy::primitives::{keccak256, I256, U256};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, HashMap},
	fs,
	path::{Path, PathBuf},
};

use crate::services::blockchain::QueryError;

/// Return types of a method, written as one type or a list of types
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReturnTypes {
	One(String),
	Many(Vec<String>),
}

/// Textual declaration of a single method
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MethodSignature {
	/// Solidity parameter types, in order
	#[serde(default)]
	pub params: Vec<String>,
	/// Solidity return type(s)
	pub returns: ReturnTypes,
}

/// Where an interface description comes from
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum InterfaceSource {
	/// Inline Ethereum JSON ABI
	Abi(JsonAbi),
	/// Path to a JSON ABI file
	File {
		path: PathBuf,
	},
	/// Explicit table of method name to signature
	Methods(BTreeMap<String, MethodSignature>),
}

impl InterfaceSource {
	/// Builds the interface spec this source describes.
	///
	/// File sources are read from disk; relative paths are resolved against
	/// the current working directory.
	pub fn resolve(&self) -> Result<InterfaceSpec, QueryError> {
		match self {
			Self::Abi(abi) => InterfaceSpec::from_abi(abi),
			Self::File { path } => InterfaceSpec::from_abi_file(path),
			Self::Methods(methods) => InterfaceSpec::from_methods(methods),
		}
	}

	/// Rebases a relative file path onto `base`; other sources are unchanged.
	pub fn relative_to(self, base: &Path) -> Self {
		match self {
			Self::File { path } if path.is_relative() => Self::File {
				path: base.join(path),
			},
			other => other,
		}
	}
}

/// Parameter and return types of a callable read method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
	name: String,
	params: Vec<DynSolType>,
	outputs: Vec<DynSolType>,
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn parse_type(ty: &str, method: &str) -> Result<DynSolType, QueryError> {
	ty.trim().parse::<DynSolType>().map_err(|e| {
		QueryError::invalid_configuration(
			format!("Invalid type '{}'", ty),
			Some(Box::new(e)),
			Some(HashMap::from([("method".to_string(), method.to_string())])),
		)
	})
}

fn method_metadata(method: &str) -> Option<HashMap<String, String>> {
	Some(HashMap::from([("method".to_string(), method.to_string())]))
}

/// Whether `value` has the shape of `ty` and every integer in it fits its declared width
fn value_fits(ty: &DynSolType, value: &DynSolValue) -> bool {
	match (ty, value) {
		(DynSolType::Uint(bits), DynSolValue::Uint(value, _)) => value.bit_len() <= *bits,
		(DynSolType::Int(bits), DynSolValue::Int(value, _)) => int_fits(value, *bits),
		(DynSolType::Array(inner), DynSolValue::Array(values)) => {
			values.iter().all(|v| value_fits(inner, v))
		}
		(DynSolType::FixedArray(inner, len), DynSolValue::FixedArray(values)) => {
			values.len() == *len && values.iter().all(|v| value_fits(inner, v))
		}
		(DynSolType::Tuple(types), DynSolValue::Tuple(values)) => {
			types.len() == values.len()
				&& types.iter().zip(values).all(|(t, v)| value_fits(t, v))
		}
		_ => ty.matches(value),
	}
}

/// Two's-complement range check: `-2^(bits-1) <= value < 2^(bits-1)`
fn int_fits(value: &I256, bits: usize) -> bool {
	if bits == 0 {
		return false;
	}
	if bits >= 256 {
		return true;
	}
	let magnitude = value.unsigned_abs();
	if value.is_negative() {
		(magnitude - U256::from(1)).bit_len() < bits
	} else {
		magnitude.bit_len() < bits
	}
}

impl MethodSpec {
	/// Creates a method spec, rejecting names that are not Solidity identifiers
	pub fn new(
		name: impl Into<String>,
		params: Vec<DynSolType>,
		outputs: Vec<DynSolType>,
	) -> Result<Self, QueryError> {
		let name = name.into();
		if !is_identifier(&name) {
			return Err(QueryError::invalid_configuration(
				format!("Invalid method name '{}'", name),
				None,
				None,
			));
		}
		Ok(Self {
			name,
			params,
			outputs,
		})
	}

	/// Parses a textual method declaration
	pub fn from_signature(name: &str, signature: &MethodSignature) -> Result<Self, QueryError> {
		let params = signature
			.params
			.iter()
			.map(|ty| parse_type(ty, name))
			.collect::<Result<Vec<_>, _>>()?;

		let outputs = match &signature.returns {
			ReturnTypes::One(ty) => vec![parse_type(ty, name)?],
			ReturnTypes::Many(types) => types
				.iter()
				.map(|ty| parse_type(ty, name))
				.collect::<Result<Vec<_>, _>>()?,
		};

		Self::new(name, params, outputs)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn params(&self) -> &[DynSolType] {
		&self.params
	}

	pub fn outputs(&self) -> &[DynSolType] {
		&self.outputs
	}

	/// Declared return type: the single output, or a tuple of all outputs
	pub fn return_type(&self) -> DynSolType {
		match self.outputs.as_slice() {
			[single] => single.clone(),
			many => DynSolType::Tuple(many.to_vec()),
		}
	}

	/// Canonical signature, e.g. `balanceOf(address)`
	pub fn signature(&self) -> String {
		let params: Vec<_> = self.params.iter().map(|p| p.sol_type_name()).collect();
		format!("{}({})", self.name, params.join(","))
	}

	/// First four bytes of the keccak-256 hash of the signature
	pub fn selector(&self) -> [u8; 4] {
		let hash = keccak256(self.signature().as_bytes());
		[hash[0], hash[1], hash[2], hash[3]]
	}

	/// Checks arity and type of every argument against the declaration
	pub fn validate_args(&self, args: &[DynSolValue]) -> Result<(), QueryError> {
		if args.len() != self.params.len() {
			return Err(QueryError::argument_mismatch(
				format!(
					"{} expects {} argument(s), got {}",
					self.signature(),
					self.params.len(),
					args.len()
				),
				None,
				method_metadata(&self.name),
			));
		}

		for (index, (param, arg)) in self.params.iter().zip(args).enumerate() {
			if !value_fits(param, arg) {
				return Err(QueryError::argument_mismatch(
					format!(
						"argument {} does not match declared type {}",
						index,
						param.sol_type_name()
					),
					None,
					method_metadata(&self.name),
				));
			}
		}

		Ok(())
	}

	/// Coerces textual arguments into values of the declared parameter types
	pub fn coerce_args(&self, args: &[&str]) -> Result<Vec<DynSolValue>, QueryError> {
		if args.len() != self.params.len() {
			return Err(QueryError::argument_mismatch(
				format!(
					"{} expects {} argument(s), got {}",
					self.signature(),
					self.params.len(),
					args.len()
				),
				None,
				method_metadata(&self.name),
			));
		}

		self.params
			.iter()
			.zip(args)
			.enumerate()
			.map(|(index, (param, arg))| {
				param.coerce_str(arg).map_err(|e| {
					QueryError::argument_mismatch(
						format!(
							"argument {} ('{}') is not a valid {}",
							index,
							arg,
							param.sol_type_name()
						),
						Some(Box::new(e)),
						method_metadata(&self.name),
					)
				})
			})
			.collect()
	}

	/// Validates `args` and ABI-encodes them behind the selector
	pub fn encode_call(&self, args: &[DynSolValue]) -> Result<Vec<u8>, QueryError> {
		self.validate_args(args)?;

		let mut calldata = self.selector().to_vec();
		calldata.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
		Ok(calldata)
	}

	/// Decodes raw return data according to the declared outputs
	pub fn decode_output(&self, data: &[u8]) -> Result<DynSolValue, QueryError> {
		let decoded = DynSolType::Tuple(self.outputs.clone())
			.abi_decode_params(data)
			.map_err(|e| {
				QueryError::decode_failure(
					format!(
						"{} bytes do not decode as {}",
						data.len(),
						self.return_type().sol_type_name()
					),
					Some(Box::new(e)),
					method_metadata(&self.name),
				)
			})?;

		match decoded {
			DynSolValue::Tuple(mut values) if self.outputs.len() == 1 && values.len() == 1 => {
				Ok(values.remove(0))
			}
			DynSolValue::Tuple(values) => Ok(DynSolValue::Tuple(values)),
			other => Err(QueryError::decode_failure(
				format!("expected a tuple of outputs, got {:?}", other),
				None,
				method_metadata(&self.name),
			)),
		}
	}
}

/// Immutable table of the read methods a contract exposes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceSpec {
	methods: BTreeMap<String, MethodSpec>,
}

impl InterfaceSpec {
	/// Builds a spec from the `view` and `pure` functions of a JSON ABI.
	///
	/// Overloaded functions are keyed by their full signature; all other
	/// functions by their bare name.
	pub fn from_abi(abi: &JsonAbi) -> Result<Self, QueryError> {
		let read_only: Vec<_> = abi
			.functions()
			.filter(|f| {
				matches!(
					f.state_mutability,
					StateMutability::View | StateMutability::Pure
				)
			})
			.collect();

		let mut overloads: HashMap<&str, usize> = HashMap::new();
		for function in &read_only {
			*overloads.entry(function.name.as_str()).or_default() += 1;
		}

		let mut methods = BTreeMap::new();
		for function in read_only {
			let params = function
				.inputs
				.iter()
				.map(|p| parse_type(&p.selector_type(), &function.name))
				.collect::<Result<Vec<_>, _>>()?;
			let outputs = function
				.outputs
				.iter()
				.map(|p| parse_type(&p.selector_type(), &function.name))
				.collect::<Result<Vec<_>, _>>()?;

			let spec = MethodSpec::new(function.name.clone(), params, outputs)?;
			let key = if overloads[function.name.as_str()] > 1 {
				spec.signature()
			} else {
				spec.name().to_string()
			};
			methods.insert(key, spec);
		}

		Self::from_method_specs(methods)
	}

	/// Builds a spec from an explicit method table
	pub fn from_methods(methods: &BTreeMap<String, MethodSignature>) -> Result<Self, QueryError> {
		let methods = methods
			.iter()
			.map(|(name, signature)| {
				MethodSpec::from_signature(name, signature).map(|spec| (name.clone(), spec))
			})
			.collect::<Result<BTreeMap<_, _>, _>>()?;

		Self::from_method_specs(methods)
	}

	/// Reads and parses a JSON ABI file
	pub fn from_abi_file(path: &Path) -> Result<Self, QueryError> {
		let path_metadata = Some(HashMap::from([(
			"path".to_string(),
			path.display().to_string(),
		)]));

		let contents = fs::read_to_string(path).map_err(|e| {
			QueryError::invalid_configuration(
				"Failed to read ABI file",
				Some(Box::new(e)),
				path_metadata.clone(),
			)
		})?;

		let abi: JsonAbi = serde_json::from_str(&contents).map_err(|e| {
			QueryError::invalid_configuration(
				"Failed to parse ABI file",
				Some(Box::new(e)),
				path_metadata,
			)
		})?;

		Self::from_abi(&abi)
	}

	/// Parses either a JSON ABI array or a method table object
	pub fn from_json_str(json: &str) -> Result<Self, QueryError> {
		let source: InterfaceSource = serde_json::from_str(json).map_err(|e| {
			QueryError::invalid_configuration(
				"Interface is neither a JSON ABI nor a method table",
				Some(Box::new(e)),
				None,
			)
		})?;
		source.resolve()
	}

	fn from_method_specs(methods: BTreeMap<String, MethodSpec>) -> Result<Self, QueryError> {
		if methods.is_empty() {
			return Err(QueryError::invalid_configuration(
				"Interface declares no read-only methods",
				None,
				None,
			));
		}
		Ok(Self { methods })
	}

	/// Looks up a declared method
	pub fn method(&self, name: &str) -> Result<&MethodSpec, QueryError> {
		self.methods.get(name).ok_or_else(|| {
			QueryError::unknown_method(
				name,
				None,
				Some(HashMap::from([(
					"declared".to_string(),
					self.method_names().collect::<Vec<_>>().join(","),
				)])),
			)
		})
	}

	/// Names callers can pass to `method`, in lexical order
	pub fn method_names(&self) -> impl Iterator<Item = &str> {
		self.methods.keys().map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.methods.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.methods.len()
	}

	pub fn is_empty(&self) -> bool {
		self.methods.is_empty()
	}
}
