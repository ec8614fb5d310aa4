//! Entry point for the `roadlog` command-line interface.
#![forbid(unsafe_code)]

use eyre::WrapErr;
use roadlog_cli::CliError;

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn main() -> eyre::Result<()> {
    setup_logging();
    match roadlog_cli::run() {
        // Help, version and usage errors are rendered by clap itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => outcome.wrap_err("roadlog failed"),
    }
}
