//! Command-line interface for planning trips and printing duty-status logs.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod fs;
mod logsheets;
mod plan;
mod store;

pub use error::CliError;

use logsheets::{LogsheetsArgs, run_logsheets};
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request-path";
pub(crate) const ARG_DB: &str = "db";
pub(crate) const ARG_MAPS_BASE_URL: &str = "maps-base-url";
pub(crate) const ARG_MAPS_API_KEY: &str = "maps-api-key";
pub(crate) const ARG_LOOKUP_TIMEOUT_SECS: &str = "lookup-timeout-secs";
pub(crate) const ARG_TRIP: &str = "trip";
pub(crate) const ENV_PLAN_REQUEST: &str = "ROADLOG_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_LOGSHEETS_DB: &str = "ROADLOG_CMDS_LOGSHEETS_DB";
pub(crate) const ENV_LOGSHEETS_TRIP: &str = "ROADLOG_CMDS_LOGSHEETS_TRIP";
/// API key variable honoured when no layered configuration supplies one.
pub(crate) const ENV_GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";

/// Run the roadlog CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, planning or
/// output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Logsheets(args) => run_logsheets(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "roadlog",
    about = "Plan hours-of-service compliant trips and print their duty-status logs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip from a JSON request and store its log.
    Plan(PlanArgs),
    /// Print the stored duty-status log of a planned trip.
    Logsheets(LogsheetsArgs),
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
