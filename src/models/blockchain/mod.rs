//! Blockchain-specific model implementations.
//!
//! Only EVM-compatible chains are supported; their models live in [`evm`].

pub mod evm;
