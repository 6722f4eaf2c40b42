//! Trait definitions for the external systems a deployment talks to.
//!
//! These traits abstract the artifact registry, the signing account and the
//! blockchain node so the deployment sequence can be unit tested with mocks.

use {
    crate::{
        error::DeployError,
        request::{Confirmation, DeploymentTransaction},
    },
    alloy::primitives::{Address, TxHash, U256},
    contracts::ContractFactory,
};

/// Resolves compiled contracts by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArtifactRegistry: Send + Sync {
    /// Returns a factory for the named contract.
    ///
    /// Fails with [`DeployError::ArtifactNotFound`] if the contract was never
    /// compiled.
    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeployError>;
}

#[async_trait::async_trait]
impl ArtifactRegistry for contracts::ArtifactRegistry {
    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeployError> {
        // Scanning the artifacts directory is blocking file system work.
        let registry = self.clone();
        let name = name.to_string();
        let factory = tokio::task::spawn_blocking(move || {
            contracts::ArtifactRegistry::contract_factory(&registry, &name)
        })
        .await
        .map_err(|err| {
            DeployError::InvalidArtifact(anyhow::Error::new(err).context("artifact lookup failed"))
        })??;
        Ok(factory)
    }
}

/// Provides the account that signs and pays for the deployment.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SignerProvider: Send + Sync {
    /// The account used when no specific one is requested.
    async fn default_signer(&self) -> Result<Address, DeployError>;

    /// Current balance of `account` in wei.
    async fn balance(&self, account: Address) -> Result<U256, DeployError>;
}

/// The blockchain node deployments are sent to.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Node: Send + Sync {
    /// Sends the deployment transaction and returns its hash once the node
    /// accepted it.
    async fn submit(&self, tx: DeploymentTransaction) -> Result<TxHash, DeployError>;

    /// Waits until the transaction is final and returns its receipt data.
    async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation, DeployError>;

    /// Current balance of a contract in wei.
    async fn contract_balance(&self, address: Address) -> Result<U256, DeployError>;
}
