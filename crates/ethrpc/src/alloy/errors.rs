use alloy::{rpc::json_rpc::ErrorPayload, transports::TransportError};

/// JSON-RPC error code nodes use for failed EVM execution.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Messages nodes return when the sender cannot pay for value plus gas.
const INSUFFICIENT_FUNDS: &[&str] = &[
    // geth, anvil, reth
    "insufficient funds",
    // hardhat
    "doesn't have enough funds",
];

/// How a failed RPC call should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeErrorKind {
    /// The sending account cannot cover the transaction value and fees.
    InsufficientFunds,
    /// The EVM reverted while executing the transaction.
    Reverted,
    /// Anything else: connection problems, rejected requests, timeouts.
    Other,
}

pub trait TransportErrorExt {
    /// Classifies the error by what went wrong on the node.
    fn kind(&self) -> NodeErrorKind;
}

impl TransportErrorExt for TransportError {
    fn kind(&self) -> NodeErrorKind {
        match self {
            TransportError::ErrorResp(payload) => classify(payload),
            _ => NodeErrorKind::Other,
        }
    }
}

fn classify(payload: &ErrorPayload) -> NodeErrorKind {
    let message = payload.message.to_lowercase();
    if INSUFFICIENT_FUNDS.iter().any(|msg| message.contains(msg)) {
        return NodeErrorKind::InsufficientFunds;
    }
    // Revert data can be empty (e.g. a bare `revert()` in a constructor) in
    // which case alloy's decoding reports no revert data at all, so the code
    // and message are checked as well.
    if payload.code == EXECUTION_REVERTED_CODE
        || message.contains("revert")
        || payload.as_revert_data().is_some()
    {
        return NodeErrorKind::Reverted;
    }
    NodeErrorKind::Other
}

/// Creates an error response the way a node reports it. Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_node_error(code: i64, message: &str) -> TransportError {
    TransportError::ErrorResp(ErrorPayload {
        code,
        message: message.to_string().into(),
        data: None,
    })
}
