use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match deployer::arguments::Arguments::from_command_line(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    observe::tracing::initialize(&observe::config::Config::new(
        &args.logging.log_filter,
        args.logging.log_stderr_threshold,
    ));
    tracing::info!("running deployer with validated arguments:\n{}", args);
    deployer::run(args).await
}
