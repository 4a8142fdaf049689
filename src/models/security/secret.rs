//! Secrets that appear in contract configuration files.
//!
//! Endpoint URLs often embed API keys, so they are either written inline
//! (`plain`) or referenced through an environment variable (`environment`).
//! Both forms are wiped from memory on drop.

use serde::{
	de::{self, MapAccess, Visitor},
	Deserialize, Deserializer, Serialize,
};
use std::{collections::HashMap, env, fmt};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::models::security::error::{SecurityError, SecurityResult};

/// A secret sourced either inline or from the process environment
///
/// Serialized as `{"type": "plain" | "environment", "value": "..."}`. The
/// `type` tag is matched case-insensitively on input.
#[derive(Debug, Clone, Serialize, ZeroizeOnDrop)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SecretValue {
	/// The secret itself
	Plain(SecretString),
	/// Name of the environment variable holding the secret
	Environment(String),
}

impl PartialEq for SecretValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Plain(l), Self::Plain(r)) => l == r,
			(Self::Environment(l), Self::Environment(r)) => l == r,
			_ => false,
		}
	}
}

impl<'de> Deserialize<'de> for SecretValue {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct SecretValueVisitor;

		impl<'de> Visitor<'de> for SecretValueVisitor {
			type Value = SecretValue;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("an object with `type` and `value` fields")
			}

			fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<SecretValue, M::Error> {
				let mut kind: Option<String> = None;
				let mut value: Option<String> = None;

				while let Some(key) = map.next_key::<String>()? {
					match key.as_str() {
						"type" => kind = Some(map.next_value()?),
						"value" => value = Some(map.next_value()?),
						other => return Err(de::Error::unknown_field(other, &["type", "value"])),
					}
				}

				let kind = kind.ok_or_else(|| de::Error::missing_field("type"))?;
				let value = value.ok_or_else(|| de::Error::missing_field("value"))?;

				match kind.to_lowercase().as_str() {
					"plain" => Ok(SecretValue::Plain(SecretString::new(value))),
					"environment" => Ok(SecretValue::Environment(value)),
					_ => Err(de::Error::unknown_variant(&kind, &["plain", "environment"])),
				}
			}
		}

		deserializer.deserialize_map(SecretValueVisitor)
	}
}

impl SecretValue {
	/// Returns the secret, reading the environment for `Environment` values
	pub fn resolve(&self) -> SecurityResult<SecretString> {
		match self {
			Self::Plain(secret) => Ok(secret.clone()),
			Self::Environment(name) => {
				let metadata = Some(HashMap::from([("variable".to_string(), name.clone())]));
				let value = env::var(name).map_err(|e| {
					Box::new(SecurityError::parse_error(
						format!("Failed to read environment variable {}", name),
						Some(e.into()),
						metadata.clone(),
					))
				})?;
				if value.trim().is_empty() {
					return Err(Box::new(SecurityError::validation_error(
						format!("Environment variable {} is empty", name),
						None,
						metadata,
					)));
				}
				Ok(SecretString::new(value))
			}
		}
	}

	/// Checks if the underlying string starts with a given prefix
	pub fn starts_with(&self, prefix: &str) -> bool {
		self.as_str().starts_with(prefix)
	}

	pub fn is_empty(&self) -> bool {
		self.as_str().trim().is_empty()
	}

	/// The inline secret, or the variable name for `Environment`
	pub fn as_str(&self) -> &str {
		match self {
			Self::Plain(secret) => secret.as_str(),
			Self::Environment(name) => name,
		}
	}
}

impl Zeroize for SecretValue {
	fn zeroize(&mut self) {
		match self {
			Self::Plain(secret) => secret.zeroize(),
			Self::Environment(name) => name.zeroize(),
		}
	}
}

/// A string that is zeroized when dropped
#[derive(Clone, Serialize, Deserialize, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Exposes the secret. Use the reference immediately.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(***)")
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl AsRef<str> for SecretString {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}

impl AsRef<str> for SecretValue {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
