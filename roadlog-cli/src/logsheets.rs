//! Logsheets command: print the stored duty-status log of a trip.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use roadlog_core::TripId;
use serde::{Deserialize, Serialize};

use crate::fs::require_file;
use crate::store::open_store;
use crate::{ARG_DB, ARG_TRIP, CliError, ENV_LOGSHEETS_DB, ENV_LOGSHEETS_TRIP, write_json};

/// CLI arguments for the `logsheets` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print the stored duty-status log of a planned trip")]
#[ortho_config(prefix = "ROADLOG")]
pub(crate) struct LogsheetsArgs {
    /// SQLite database written by `roadlog plan --db`.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Identifier of the trip to print.
    #[arg(long = ARG_TRIP, value_name = "id")]
    #[serde(default)]
    pub(crate) trip: Option<u64>,
}

impl LogsheetsArgs {
    pub(crate) fn into_config(self) -> Result<LogsheetsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LogsheetsConfig::try_from(merged)
    }
}

/// Resolved `logsheets` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogsheetsConfig {
    pub(crate) db: Utf8PathBuf,
    pub(crate) trip: TripId,
}

impl TryFrom<LogsheetsArgs> for LogsheetsConfig {
    type Error = CliError;

    fn try_from(args: LogsheetsArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_LOGSHEETS_DB,
        })?;
        let trip = args.trip.map(TripId).ok_or(CliError::MissingArgument {
            field: ARG_TRIP,
            env: ENV_LOGSHEETS_TRIP,
        })?;
        Ok(Self { db, trip })
    }
}

pub(crate) fn run_logsheets(args: LogsheetsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_logsheets_with(args, &mut stdout)
}

pub(crate) fn run_logsheets_with(
    args: LogsheetsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    // An absent file would otherwise be created empty by SQLite.
    require_file(&config.db, ARG_DB)?;
    let store = open_store(Some(&config.db))?;
    if store.trip(config.trip)?.is_none() {
        return Err(CliError::UnknownTrip { id: config.trip });
    }
    let entries = store.log_entries(config.trip)?;
    debug!("trip {} has {} stored log entries", config.trip, entries.len());
    write_json(writer, &entries)
}
