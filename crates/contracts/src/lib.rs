//! Access to compiled contract artifacts.
//!
//! Contracts are compiled by an external toolchain (Hardhat) which writes one
//! JSON artifact per contract into its `artifacts/` directory. This crate
//! finds those artifacts by contract name and turns them into
//! [`ContractFactory`] handles that know how to build deployment code.

mod artifact;
mod error;
mod factory;
mod registry;

pub use {
    artifact::Artifact,
    error::Error,
    factory::ContractFactory,
    registry::{ArtifactRegistry, DEFAULT_ARTIFACTS_DIR},
};
