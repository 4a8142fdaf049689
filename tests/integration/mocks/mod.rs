//! Mock implementations for testing purposes.
//!
//! This module contains mock implementations of the traits used by the query
//! client, primarily for testing. It includes mocks for:
//! - JSON-RPC transports (scripted with `mockall`, delayed and counting)
//! - Contract descriptors and configurations

#[allow(unused_imports)]
pub use models::*;
#[allow(unused_imports)]
pub use transports::*;
