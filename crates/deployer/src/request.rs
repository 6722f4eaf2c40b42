use {
    alloy::primitives::{Address, Bytes, TxHash, U256},
    number::Amount,
};

/// What to deploy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Name of the compiled contract, bare (`Project`) or fully qualified
    /// (`contracts/Project.sol:Project`).
    pub contract_name: String,
    /// Human readable purpose used in the report, e.g. "Community Insurance
    /// Pool".
    pub label: Option<String>,
    /// Constructor arguments in their Solidity literal form.
    pub constructor_args: Vec<String>,
    /// Value transferred into the new contract.
    pub attached_value: Option<Amount>,
}

impl DeploymentRequest {
    pub fn new(contract_name: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constructor_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value(mut self, value: Amount) -> Self {
        self.attached_value = Some(value);
        self
    }

    /// The label if there is one, the contract name otherwise.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.contract_name)
    }

    /// The attached value, zero if none.
    pub fn value(&self) -> Amount {
        self.attached_value.unwrap_or_default()
    }
}

/// The contract creation transaction handed to the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentTransaction {
    pub from: Address,
    /// Creation code followed by the encoded constructor arguments.
    pub code: Bytes,
    pub value: U256,
}

/// What the node reports once a transaction is final.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub contract_address: Option<Address>,
    pub succeeded: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// A confirmed deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_name: String,
    pub label: Option<String>,
    pub address: Address,
    pub deployer: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub attached_value: Amount,
    /// Balance of the contract read back after confirmation.
    pub contract_balance: Amount,
    pub transaction_confirmed: bool,
}

impl DeploymentResult {
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.contract_name)
    }
}
