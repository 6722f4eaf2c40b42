use {
    crate::{
        error::DeployError,
        request::{Confirmation, DeploymentTransaction},
        traits::{Node, SignerProvider},
    },
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, TxHash, U256},
        providers::{PendingTransactionBuilder, PendingTransactionError, Provider},
        rpc::types::TransactionRequest,
        transports::TransportError,
    },
    ethrpc::{
        AlloyProvider,
        alloy::errors::{NodeErrorKind, TransportErrorExt},
    },
    std::time::Duration,
};

/// How long to wait for a deployment to become final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationConfig {
    /// Number of blocks (including the one it was mined in) the transaction
    /// has to be buried under.
    pub confirmations: u64,
    /// Give up waiting after this long. `None` waits as long as the node
    /// connection lives.
    pub timeout: Option<Duration>,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: None,
        }
    }
}

/// [`SignerProvider`] and [`Node`] backed by a JSON-RPC node.
pub struct NodeClient {
    provider: AlloyProvider,
    /// Set when transactions are signed locally. Otherwise the node's first
    /// managed account signs.
    local_signer: Option<Address>,
    confirmation: ConfirmationConfig,
}

impl NodeClient {
    pub fn new(
        provider: AlloyProvider,
        local_signer: Option<Address>,
        confirmation: ConfirmationConfig,
    ) -> Self {
        Self {
            provider,
            local_signer,
            confirmation,
        }
    }
}

#[async_trait::async_trait]
impl SignerProvider for NodeClient {
    async fn default_signer(&self) -> Result<Address, DeployError> {
        if let Some(signer) = self.local_signer {
            return Ok(signer);
        }
        let accounts = self.provider.get_accounts().await.map_err(node_error)?;
        accounts.first().copied().ok_or(DeployError::NoSigner)
    }

    async fn balance(&self, account: Address) -> Result<U256, DeployError> {
        self.provider.get_balance(account).await.map_err(node_error)
    }
}

#[async_trait::async_trait]
impl Node for NodeClient {
    async fn submit(&self, tx: DeploymentTransaction) -> Result<TxHash, DeployError> {
        let request = TransactionRequest::default()
            .with_from(tx.from)
            .with_deploy_code(tx.code)
            .with_value(tx.value);
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(node_error)?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation, DeployError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(self.confirmation.confirmations)
            .with_timeout(self.confirmation.timeout)
            .get_receipt()
            .await
            .map_err(|err| match err {
                PendingTransactionError::TransportError(err) => node_error(err),
                err => DeployError::NetworkFailure(
                    anyhow::Error::new(err).context("failed waiting for confirmation"),
                ),
            })?;
        Ok(Confirmation {
            tx_hash,
            contract_address: ReceiptResponse::contract_address(&receipt),
            succeeded: ReceiptResponse::status(&receipt),
            block_number: ReceiptResponse::block_number(&receipt),
            gas_used: ReceiptResponse::gas_used(&receipt),
        })
    }

    async fn contract_balance(&self, address: Address) -> Result<U256, DeployError> {
        self.provider.get_balance(address).await.map_err(node_error)
    }
}

/// Maps node errors onto the deployment error taxonomy.
fn node_error(err: TransportError) -> DeployError {
    match err.kind() {
        NodeErrorKind::InsufficientFunds => DeployError::InsufficientBalance(err.to_string()),
        NodeErrorKind::Reverted => DeployError::Reverted {
            tx_hash: None,
            reason: err.to_string(),
        },
        NodeErrorKind::Other => DeployError::NetworkFailure(err.into()),
    }
}
