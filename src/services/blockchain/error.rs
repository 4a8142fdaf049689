//! Query client error types.
//!
//! Every failure of the query client falls into exactly one of five
//! categories so callers can branch on the cause: bad configuration, an
//! undeclared method, arguments that do not fit the declaration, a transport
//! problem, or a response that does not decode as the declared return type.

use crate::{
	services::blockchain::transports::TransportError,
	utils::logging::error::{BoxedSource, ErrorContext, TraceableError},
};
use std::{collections::HashMap, fmt};
use thiserror::Error as ThisError;

/// Refinement of [`QueryError::TransportFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportFailureKind {
	/// The endpoint could not be reached or the connection broke
	Unreachable,
	/// The endpoint answered with a non-success HTTP status
	HttpStatus,
	/// The node answered with a JSON-RPC error object
	Rpc,
	/// The response body was not a JSON document
	InvalidResponse,
	/// No response before the deadline
	Timeout,
}

impl fmt::Display for TransportFailureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self {
			Self::Unreachable => "unreachable",
			Self::HttpStatus => "http status",
			Self::Rpc => "rpc",
			Self::InvalidResponse => "invalid response",
			Self::Timeout => "timeout",
		};
		write!(f, "{}", kind)
	}
}

/// Represents the possible outcomes of a failed query
///
/// None of the constructors log: reporting is left to the caller.
#[derive(ThisError, Debug)]
pub enum QueryError {
	/// Malformed endpoint, address or interface description
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(ErrorContext),

	/// Method is not declared in the interface
	#[error("Unknown method: {0}")]
	UnknownMethod(ErrorContext),

	/// Arguments do not match the declared parameters
	#[error("Argument mismatch: {0}")]
	ArgumentMismatch(ErrorContext),

	/// Network-level failure while talking to the endpoint
	#[error("Transport failure ({kind}): {context}")]
	TransportFailure {
		kind: TransportFailureKind,
		context: ErrorContext,
	},

	/// Response could not be decoded as the declared return type
	#[error("Decode failure: {0}")]
	DecodeFailure(ErrorContext),
}

impl QueryError {
	pub fn invalid_configuration(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidConfiguration(ErrorContext::new(msg, source, metadata))
	}

	pub fn unknown_method(
		method: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnknownMethod(ErrorContext::new(method, source, metadata))
	}

	pub fn argument_mismatch(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ArgumentMismatch(ErrorContext::new(msg, source, metadata))
	}

	pub fn transport_failure(
		kind: TransportFailureKind,
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::TransportFailure {
			kind,
			context: ErrorContext::new(msg, source, metadata),
		}
	}

	pub fn decode_failure(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::DecodeFailure(ErrorContext::new(msg, source, metadata))
	}

	/// Whether retrying the same call could succeed
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::TransportFailure { .. })
	}

	/// Whether the call ran out of time
	pub fn is_timeout(&self) -> bool {
		matches!(
			self,
			Self::TransportFailure {
				kind: TransportFailureKind::Timeout,
				..
			}
		)
	}

	/// Transport failure subkind, if this is a transport failure
	pub fn transport_kind(&self) -> Option<TransportFailureKind> {
		match self {
			Self::TransportFailure { kind, .. } => Some(*kind),
			_ => None,
		}
	}

	/// Error context carried by every variant
	pub fn context(&self) -> &ErrorContext {
		match self {
			Self::InvalidConfiguration(ctx)
			| Self::UnknownMethod(ctx)
			| Self::ArgumentMismatch(ctx)
			| Self::DecodeFailure(ctx) => ctx,
			Self::TransportFailure { context, .. } => context,
		}
	}
}

impl TraceableError for QueryError {
	fn trace_id(&self) -> String {
		self.context().trace_id.clone()
	}
}

impl From<TransportError> for QueryError {
	fn from(err: TransportError) -> Self {
		let kind = match &err {
			TransportError::Http { .. } => TransportFailureKind::HttpStatus,
			TransportError::Network(_) => TransportFailureKind::Unreachable,
			TransportError::Timeout(_) => TransportFailureKind::Timeout,
			TransportError::Rpc { .. } => TransportFailureKind::Rpc,
			TransportError::ResponseParse(_) => TransportFailureKind::InvalidResponse,
		};
		let msg = err.to_string();
		Self::transport_failure(kind, msg, Some(Box::new(err)), None)
	}
}
