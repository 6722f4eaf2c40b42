use {
    alloy::primitives::{Address, TxHash},
    number::Amount,
};

/// Everything that can make a deployment fail. None of these are recovered
/// from, they all end the process with a failure exit code.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("artifact not found: {0}")]
    ArtifactNotFound(contracts::Error),

    #[error("ambiguous contract name: {0}")]
    AmbiguousArtifact(contracts::Error),

    #[error("invalid artifact: {0:#}")]
    InvalidArtifact(anyhow::Error),

    #[error("constructor argument mismatch: {0:#}")]
    ConstructorArgumentMismatch(anyhow::Error),

    #[error("{0}, no value can be attached to the deployment")]
    NonPayableConstructor(contracts::Error),

    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("no signing account available")]
    NoSigner,

    #[error(
        "deployment reverted{}: {reason}",
        .tx_hash.map(|hash| format!(" in {hash}")).unwrap_or_default()
    )]
    Reverted {
        tx_hash: Option<TxHash>,
        reason: String,
    },

    #[error("network failure: {0:#}")]
    NetworkFailure(anyhow::Error),
}

impl DeployError {
    pub fn insufficient_balance(account: Address, available: Amount, required: Amount) -> Self {
        Self::InsufficientBalance(format!(
            "account {account} holds {available} but {required} is attached"
        ))
    }
}

impl From<contracts::Error> for DeployError {
    fn from(err: contracts::Error) -> Self {
        use contracts::Error;
        match err {
            Error::NotFound(_) | Error::NotDeployable(_) | Error::UnlinkedLibraries(_) => {
                Self::ArtifactNotFound(err)
            }
            Error::Ambiguous { .. } => Self::AmbiguousArtifact(err),
            Error::Invalid { .. } => Self::InvalidArtifact(err.into()),
            Error::ArgumentCount { .. } | Error::ArgumentType { .. } => {
                Self::ConstructorArgumentMismatch(err.into())
            }
            Error::NonPayable(_) => Self::NonPayableConstructor(err),
        }
    }
}
