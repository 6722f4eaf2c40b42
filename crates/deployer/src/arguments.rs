use {
    number::Amount,
    std::{
        fmt::{self, Display, Formatter},
        ffi::OsString,
        path::PathBuf,
        process::ExitCode,
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,deployer=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        Ok(())
    }
}

/// Deploys a compiled contract. Values given on the command line take
/// precedence over the deployment file.
#[derive(clap::Parser)]
#[clap(version)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// Deployment file describing what to deploy.
    #[clap(long, env, default_value = "deployment.toml")]
    pub config: PathBuf,

    /// Name of the contract to deploy, either bare (`Project`) or fully
    /// qualified (`contracts/Project.sol:Project`).
    #[clap(long, env)]
    pub contract: Option<String>,

    /// Human readable name used when reporting the deployment.
    #[clap(long, env)]
    pub label: Option<String>,

    /// Constructor arguments in Solidity literal syntax. Either repeat the
    /// flag or separate the arguments with commas.
    #[clap(long = "arg", env = "CONSTRUCTOR_ARGS", value_delimiter = ',')]
    pub constructor_args: Vec<String>,

    /// Value to send along with the deployment, e.g. `0.5` (ether) or `500
    /// gwei`. Only allowed for contracts with a payable constructor.
    #[clap(long, env)]
    pub value: Option<Amount>,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Directory containing the compiled Hardhat artifacts.
    #[clap(long, env, default_value = contracts::DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Hex encoded private key to sign the deployment with. Without it the
    /// node's first account is used.
    #[clap(long, env)]
    pub private_key: Option<String>,

    /// Number of confirmations to wait for [default: 1].
    #[clap(long, env)]
    pub confirmations: Option<u64>,

    /// Stop waiting for the confirmation after this long, e.g. `2m`.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,
}

impl Arguments {
    /// Parses the command line. Usage errors are printed and mapped to the
    /// failure exit code, `--help` and `--version` to success.
    pub fn from_command_line<I, T>(args: I) -> Result<Self, ExitCode>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as clap::Parser>::try_parse_from(args).map_err(|err| {
            // Nothing sensible is left to do if the terminal is gone.
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        })
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            config,
            contract,
            label,
            constructor_args,
            value,
            node_url,
            artifacts,
            private_key,
            confirmations,
            confirmation_timeout,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "config: {}", config.display())?;
        display_option(f, "contract", contract)?;
        display_option(f, "label", label)?;
        writeln!(f, "constructor_args: {constructor_args:?}")?;
        display_option(f, "value", value)?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        display_secret_option(f, "private_key", private_key)?;
        display_option(f, "confirmations", confirmations)?;
        display_option(
            f,
            "confirmation_timeout",
            &confirmation_timeout.map(humantime::format_duration),
        )?;
        Ok(())
    }
}

pub fn display_secret_option<T>(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<T>,
) -> fmt::Result {
    display_option(f, name, &option.as_ref().map(|_| "SECRET"))
}

pub fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from(["deployer"]).unwrap();
        assert_eq!(args.config, PathBuf::from("deployment.toml"));
        assert_eq!(args.node_url.as_str(), "http://localhost:8545/");
        assert_eq!(args.artifacts, PathBuf::from("artifacts"));
        assert!(args.contract.is_none());
        assert!(args.constructor_args.is_empty());
        assert_eq!(args.logging.log_stderr_threshold, LevelFilter::ERROR);
    }

    #[test]
    fn parses_deployment_flags() {
        let args = Arguments::try_parse_from([
            "deployer",
            "--contract",
            "Project",
            "--arg",
            "100,0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "--arg",
            "true",
            "--value",
            "0.5",
            "--confirmation-timeout",
            "2m",
        ])
        .unwrap();
        assert_eq!(args.contract.as_deref(), Some("Project"));
        assert_eq!(
            args.constructor_args,
            ["100", "0x5FbDB2315678afecb367f032d93F642f64180aa3", "true"]
        );
        assert_eq!(args.value.unwrap().to_eth_string(), "0.5");
        assert_eq!(args.confirmation_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn rejects_negative_value() {
        assert!(Arguments::try_parse_from(["deployer", "--value", "-1"]).is_err());
    }

    #[test]
    fn usage_errors_exit_with_failure() {
        for args in [
            &["deployer", "--value", "abc"][..],
            &["deployer", "--node-url", "not a url"],
            &["deployer", "--unknown-flag"],
        ] {
            assert_eq!(
                Arguments::from_command_line(args).err(),
                Some(ExitCode::FAILURE),
                "{args:?}"
            );
        }
        assert_eq!(
            Arguments::from_command_line(["deployer", "--help"]).err(),
            Some(ExitCode::SUCCESS)
        );
        assert!(Arguments::from_command_line(["deployer", "--contract", "Project"]).is_ok());
    }

    #[test]
    fn display_hides_private_key() {
        let args = Arguments::try_parse_from([
            "deployer",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ])
        .unwrap();
        let display = args.to_string();
        assert!(display.contains("private_key: SECRET"));
        assert!(!display.contains("ac0974"));
    }
}
