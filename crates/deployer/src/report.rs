//! Human readable output of a finished deployment.

use crate::request::DeploymentResult;

const SEPARATOR: &str = "------------------------------------------";

/// Lines describing a confirmed deployment.
pub fn lines(result: &DeploymentResult) -> Vec<String> {
    let mut lines = vec![
        SEPARATOR.to_string(),
        format!("{} deployed to: {}", result.display_name(), result.address),
    ];
    if !result.attached_value.is_zero() {
        lines.push(format!(
            "Initial contract balance confirmed: {}",
            result.contract_balance
        ));
    }
    let block = result
        .block_number
        .map(|block| format!(" in block {block}"))
        .unwrap_or_default();
    lines.push(format!(
        "Transaction {} confirmed{block}, gas used: {}",
        result.tx_hash, result.gas_used
    ));
    lines.push(SEPARATOR.to_string());
    lines
}

/// Logs the report of a confirmed deployment.
pub fn log(result: &DeploymentResult) {
    for line in lines(result) {
        tracing::info!("{line}");
    }
}
