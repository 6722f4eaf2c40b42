//! This crate contains the code that makes the deployer observable: the
//! initialization logic for logging and a panic hook that routes panics
//! through the same log output.
pub mod config;
pub mod panic_hook;
pub mod tracing;
