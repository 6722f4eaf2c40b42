pub mod arguments;
pub mod config;
pub mod error;
pub mod node;
pub mod report;
pub mod request;
pub mod runner;
pub mod traits;

use {
    crate::{
        arguments::Arguments,
        node::NodeClient,
        request::DeploymentResult,
        runner::DeploymentRunner,
    },
    anyhow::{Context, Result},
    std::process::ExitCode,
};

/// Runs the deployment described by `args` and maps the outcome to the
/// process exit code.
pub async fn run(args: Arguments) -> ExitCode {
    match start(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(?err, "deployment failed");
            ExitCode::FAILURE
        }
    }
}

pub async fn start(args: &Arguments) -> Result<DeploymentResult> {
    let config = config::load(args).await?;
    let registry = contracts::ArtifactRegistry::new(&args.artifacts);

    let client = match &args.private_key {
        Some(private_key) => {
            let signer = ethrpc::alloy::wallet::private_key_signer(private_key)?;
            let account = signer.address();
            NodeClient::new(
                ethrpc::alloy::provider_with_signer(&args.node_url, signer),
                Some(account),
                config.confirmation,
            )
        }
        None => NodeClient::new(
            ethrpc::alloy::provider(&args.node_url),
            None,
            config.confirmation,
        ),
    };

    let result = DeploymentRunner::new(&registry, &client, &client)
        .run(&config.request)
        .await
        .with_context(|| format!("failed to deploy {}", config.request.display_name()))?;
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn arguments(dir: &tempfile::TempDir, extra: &[&str]) -> Arguments {
        let config = dir.path().join("deployment.toml");
        let artifacts = dir.path().join("artifacts");
        std::fs::create_dir_all(&artifacts).unwrap();
        let base = [
            "deployer",
            "--config",
            config.to_str().unwrap(),
            "--artifacts",
            artifacts.to_str().unwrap(),
            // Nothing listens on the discard port.
            "--node-url",
            "http://127.0.0.1:9",
        ];
        Arguments::from_command_line(base.iter().chain(extra)).unwrap()
    }

    #[tokio::test]
    async fn missing_deployment_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run(arguments(&dir, &[])).await, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn unknown_contract_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            run(arguments(&dir, &["--contract", "Missing"])).await,
            ExitCode::FAILURE
        );
    }
}
