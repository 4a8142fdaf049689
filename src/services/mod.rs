//! Core services implementing the business logic.
//!
//! - `blockchain`: Contract query client, transports and error types

pub mod blockchain;
