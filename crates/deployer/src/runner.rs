use {
    crate::{
        error::DeployError,
        report,
        request::{DeploymentRequest, DeploymentResult, DeploymentTransaction},
        traits::{ArtifactRegistry, Node, SignerProvider},
    },
    number::Amount,
};

/// Where a deployment currently stands.
///
/// `Idle → Submitting → Confirmed` on success. Failures before submission go
/// straight from `Idle` to `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Confirmed,
    Failed,
}

impl Phase {
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Submitting)
                | (Self::Idle, Self::Failed)
                | (Self::Submitting, Self::Confirmed)
                | (Self::Submitting, Self::Failed)
        )
    }
}

#[derive(Debug)]
struct Progress<'a> {
    contract: &'a str,
    phase: Phase,
}

impl<'a> Progress<'a> {
    fn new(contract: &'a str) -> Self {
        Self {
            contract,
            phase: Phase::Idle,
        }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid phase transition {:?} -> {next:?}",
            self.phase
        );
        tracing::debug!(contract = self.contract, from = ?self.phase, to = ?next, "deployment phase changed");
        self.phase = next;
    }
}

/// Deploys a single contract: resolve the signer and the contract factory,
/// submit the creation transaction, wait for it to be confirmed and report
/// the new contract's address.
pub struct DeploymentRunner<'a> {
    registry: &'a dyn ArtifactRegistry,
    signer: &'a dyn SignerProvider,
    node: &'a dyn Node,
}

impl<'a> DeploymentRunner<'a> {
    pub fn new(
        registry: &'a dyn ArtifactRegistry,
        signer: &'a dyn SignerProvider,
        node: &'a dyn Node,
    ) -> Self {
        Self {
            registry,
            signer,
            node,
        }
    }

    /// Runs the deployment to completion. Nothing is retried, the first
    /// error ends the deployment.
    #[tracing::instrument(skip_all, fields(contract = %request.contract_name))]
    pub async fn run(&self, request: &DeploymentRequest) -> Result<DeploymentResult, DeployError> {
        let mut progress = Progress::new(&request.contract_name);
        let result = self.deploy(request, &mut progress).await;
        match &result {
            Ok(_) => progress.advance(Phase::Confirmed),
            Err(err) => {
                tracing::debug!(?err, "deployment failed");
                progress.advance(Phase::Failed);
            }
        }
        result
    }

    async fn deploy(
        &self,
        request: &DeploymentRequest,
        progress: &mut Progress<'_>,
    ) -> Result<DeploymentResult, DeployError> {
        let value = request.value();

        let deployer = self.signer.default_signer().await?;
        let balance = Amount::from_wei(self.signer.balance(deployer).await?);
        tracing::info!(
            "Deploying {} with account: {deployer} (balance {balance})",
            request.display_name()
        );

        let factory = self.registry.contract_factory(&request.contract_name).await?;
        tracing::debug!(source = factory.source_name(), "resolved contract artifact");
        factory.check_value(!value.is_zero())?;
        let code = factory.deploy_code(&request.constructor_args)?;
        if !value.is_zero() {
            tracing::info!("Initial funding amount: {value}");
        }
        if balance < value {
            return Err(DeployError::insufficient_balance(deployer, balance, value));
        }

        progress.advance(Phase::Submitting);
        let tx_hash = self
            .node
            .submit(DeploymentTransaction {
                from: deployer,
                code,
                value: value.wei(),
            })
            .await?;
        tracing::info!(?tx_hash, "deployment transaction submitted, waiting for confirmation");

        let confirmation = self.node.confirm(tx_hash).await?;
        if !confirmation.succeeded {
            return Err(DeployError::Reverted {
                tx_hash: Some(tx_hash),
                reason: "transaction was mined with failed status".to_string(),
            });
        }
        let address = confirmation.contract_address.ok_or_else(|| {
            DeployError::NetworkFailure(anyhow::anyhow!(
                "receipt of {tx_hash} has no contract address"
            ))
        })?;

        let contract_balance = Amount::from_wei(self.node.contract_balance(address).await?);
        if contract_balance != value {
            tracing::warn!(
                %contract_balance,
                attached = %value,
                "contract balance differs from the attached value"
            );
        }

        let result = DeploymentResult {
            contract_name: factory.name().to_string(),
            label: request.label.clone(),
            address,
            deployer,
            tx_hash,
            block_number: confirmation.block_number,
            gas_used: confirmation.gas_used,
            attached_value: value,
            contract_balance,
            transaction_confirmed: true,
        };
        report::log(&result);
        Ok(result)
    }
}
