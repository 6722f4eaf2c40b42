//! The deployment file, `deployment.toml` by default.
//!
//! ```toml
//! contract = "CommunityInsurancePool"
//! label = "Community Insurance Pool"
//! constructor-args = []
//! value = "0.5"
//! confirmations = 1
//! confirmation-timeout = "2m"
//! ```

use {
    crate::{arguments::Arguments, node::ConfirmationConfig, request::DeploymentRequest},
    anyhow::{Context, Result, bail, ensure},
    number::Amount,
    serde::Deserialize,
    std::{path::Path, time::Duration},
    tokio::fs,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct File {
    contract: Option<String>,

    label: Option<String>,

    /// Strings are passed through as they are, other TOML values are turned
    /// into their Solidity literal form.
    #[serde(default)]
    constructor_args: Vec<toml::Value>,

    value: Option<Amount>,

    confirmations: Option<u64>,

    #[serde(default, with = "humantime_serde")]
    confirmation_timeout: Option<Duration>,
}

/// Everything needed to run a deployment.
#[derive(Debug)]
pub struct Config {
    pub request: DeploymentRequest,
    pub confirmation: ConfirmationConfig,
}

/// Reads the deployment file and applies the command line overrides.
///
/// A missing deployment file is fine as long as the contract is named on the
/// command line.
pub async fn load(args: &Arguments) -> Result<Config> {
    let file = if args.contract.is_some() && !fs::try_exists(&args.config).await.unwrap_or(false)
    {
        File::default()
    } else {
        read(&args.config).await?
    };
    merge(args, file).with_context(|| format!("invalid deployment {:?}", args.config))
}

async fn read(path: &Path) -> Result<File> {
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    toml::from_str(&data).with_context(|| format!("TOML error while reading {path:?}"))
}

fn merge(args: &Arguments, mut file: File) -> Result<Config> {
    // The label, value and arguments in the file belong to its contract.
    if let (Some(requested), Some(described)) = (&args.contract, &file.contract) {
        if requested != described {
            tracing::debug!(
                %requested,
                %described,
                "ignoring contract specific settings of the deployment file"
            );
            file.label = None;
            file.value = None;
            file.constructor_args.clear();
        }
    }

    let contract_name = args
        .contract
        .clone()
        .or(file.contract)
        .context("no contract to deploy, pass --contract or set `contract`")?;
    let constructor_args = if args.constructor_args.is_empty() {
        file.constructor_args
            .iter()
            .map(solidity_literal)
            .collect::<Result<_>>()?
    } else {
        args.constructor_args.clone()
    };
    let confirmations = args.confirmations.or(file.confirmations).unwrap_or(1);
    ensure!(confirmations > 0, "at least one confirmation is required");

    Ok(Config {
        request: DeploymentRequest {
            contract_name,
            label: args.label.clone().or(file.label),
            constructor_args,
            attached_value: args.value.or(file.value),
        },
        confirmation: ConfirmationConfig {
            confirmations,
            timeout: args.confirmation_timeout.or(file.confirmation_timeout),
        },
    })
}

fn solidity_literal(value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(value) => Ok(value.clone()),
        value => nested_literal(value),
    }
}

/// Literal of a value inside an array. Strings that would be split or
/// trimmed by the array syntax get quoted. Strings starting with `(` or `[`
/// are nested tuple or array literals and stay as they are.
fn nested_literal(value: &toml::Value) -> Result<String> {
    Ok(match value {
        toml::Value::String(value) => {
            let needs_quotes = !value.starts_with(['(', '['])
                && (value.is_empty()
                    || value.trim() != value
                    || value.contains([',', ']', ')', '"', '\'']));
            if !needs_quotes {
                value.clone()
            } else if !value.contains('"') {
                format!("\"{value}\"")
            } else if !value.contains('\'') {
                format!("'{value}'")
            } else {
                bail!("string argument {value:?} contains both quote characters")
            }
        }
        toml::Value::Integer(value) => value.to_string(),
        toml::Value::Boolean(value) => value.to_string(),
        toml::Value::Array(values) => format!(
            "[{}]",
            values
                .iter()
                .map(nested_literal)
                .collect::<Result<Vec<_>>>()?
                .join(",")
        ),
        toml::Value::Float(_) | toml::Value::Datetime(_) | toml::Value::Table(_) => {
            bail!("unsupported constructor argument {value}")
        }
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::dyn_abi::{DynSolType, DynSolValue},
        clap::Parser,
        std::io::Write,
    };

    fn args(config: &Path, extra: &[&str]) -> Arguments {
        let config = config.to_str().unwrap();
        Arguments::try_parse_from(["deployer", "--config", config].iter().chain(extra)).unwrap()
    }

    fn deployment_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_deployment_file() {
        let file = deployment_file(
            r#"
            contract = "CommunityInsurancePool"
            label = "Community Insurance Pool"
            constructor-args = ["0x5FbDB2315678afecb367f032d93F642f64180aa3", 100, true, [1, 2]]
            value = "0.5"
            confirmations = 2
            confirmation-timeout = "30s"
            "#,
        );
        let config = load(&args(file.path(), &[])).await.unwrap();

        assert_eq!(config.request.contract_name, "CommunityInsurancePool");
        assert_eq!(config.request.display_name(), "Community Insurance Pool");
        assert_eq!(
            config.request.constructor_args,
            [
                "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "100",
                "true",
                "[1,2]"
            ]
        );
        assert_eq!(config.request.value().to_eth_string(), "0.5");
        assert_eq!(
            config.confirmation,
            ConfirmationConfig {
                confirmations: 2,
                timeout: Some(Duration::from_secs(30)),
            }
        );
    }

    #[tokio::test]
    async fn command_line_overrides_file() {
        let file = deployment_file(
            r#"
            contract = "Project"
            constructor-args = [100]
            value = "1"
            "#,
        );
        let config = load(&args(
            file.path(),
            &["--contract", "TippingSystem", "--arg", "7", "--value", "500 gwei"],
        ))
        .await
        .unwrap();

        assert_eq!(config.request.contract_name, "TippingSystem");
        assert_eq!(config.request.constructor_args, ["7"]);
        assert_eq!(config.request.value(), "500 gwei".parse().unwrap());
        assert_eq!(config.confirmation, ConfirmationConfig::default());
    }

    #[tokio::test]
    async fn missing_file_needs_contract_flag() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("deployment.toml");

        assert!(load(&args(&missing, &[])).await.is_err());

        let config = load(&args(&missing, &["--contract", "TippingSystem"]))
            .await
            .unwrap();
        assert_eq!(config.request, DeploymentRequest::new("TippingSystem"));
    }

    #[tokio::test]
    async fn rejects_unknown_fields() {
        let file = deployment_file(
            r#"
            contract = "Project"
            gas-price = 1
            "#,
        );
        assert!(load(&args(file.path(), &[])).await.is_err());
    }

    #[tokio::test]
    async fn rejects_zero_confirmations() {
        let file = deployment_file(
            r#"
            contract = "Project"
            confirmations = 0
            "#,
        );
        assert!(load(&args(file.path(), &[])).await.is_err());
    }

    #[tokio::test]
    async fn other_contract_does_not_inherit_file_settings() {
        let file = deployment_file(include_str!("../../../deployment.toml"));

        let config = load(&args(file.path(), &["--contract", "TippingSystem"]))
            .await
            .unwrap();
        assert_eq!(config.request, DeploymentRequest::new("TippingSystem"));
        assert_eq!(config.confirmation.timeout, Some(Duration::from_secs(120)));

        let config = load(&args(
            file.path(),
            &["--contract", "CommunityInsurancePool"],
        ))
        .await
        .unwrap();
        assert_eq!(config.request.display_name(), "Community Insurance Pool");
        assert_eq!(config.request.value().to_eth_string(), "0.5");
    }

    #[test]
    fn array_strings_keep_their_delimiters() {
        let value: toml::Value = toml::from_str::<toml::Table>(
            r#"args = [["hello, world", "plain", "say \"hi\"", ""]]"#,
        )
        .unwrap()["args"][0]
            .clone();
        let literal = solidity_literal(&value).unwrap();
        assert_eq!(literal, r#"["hello, world",plain,'say "hi"',""]"#);

        let ty = DynSolType::parse("string[]").unwrap();
        assert_eq!(
            ty.coerce_str(&literal).unwrap(),
            DynSolValue::Array(
                ["hello, world", "plain", "say \"hi\"", ""]
                    .into_iter()
                    .map(|s| DynSolValue::String(s.to_string()))
                    .collect()
            )
        );
    }

    #[test]
    fn array_addresses_stay_unquoted() {
        let value = toml::Value::Array(vec![
            toml::Value::String("0x5FbDB2315678afecb367f032d93F642f64180aa3".into()),
            toml::Value::String("(1,two)".into()),
        ]);
        assert_eq!(
            solidity_literal(&value).unwrap(),
            "[0x5FbDB2315678afecb367f032d93F642f64180aa3,(1,two)]"
        );
        let ty = DynSolType::parse("address[]").unwrap();
        assert!(
            ty.coerce_str("[0x5FbDB2315678afecb367f032d93F642f64180aa3]")
                .is_ok()
        );
    }

    #[test]
    fn float_arguments_are_ambiguous() {
        assert!(solidity_literal(&toml::Value::Float(0.5)).is_err());
    }
}
