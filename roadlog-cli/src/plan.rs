//! Plan command implementation for the roadlog CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use roadlog_core::{DistanceProvider, LocationNamer, LogEntry, PlanningHints, Trip, TripDraft};
use roadlog_data::{HttpCollaboratorConfig, maps_collaborators};
use roadlog_planner::TripPlanner;
use serde::{Deserialize, Serialize};

use crate::fs::{open_utf8_file, require_file};
use crate::store::open_store;
use crate::{
    ARG_DB, ARG_LOOKUP_TIMEOUT_SECS, ARG_MAPS_API_KEY, ARG_MAPS_BASE_URL, ARG_PLAN_REQUEST,
    CliError, ENV_GOOGLE_MAPS_API_KEY, ENV_PLAN_REQUEST, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a trip described by a JSON request holding a trip and optional \
                 planning hints. The trip is stored, its duty-status log is generated \
                 and both are printed as JSON. Without a Maps API key every distance \
                 and place lookup falls back to estimates.",
    about = "Plan a trip and generate its duty-status log"
)]
#[ortho_config(prefix = "ROADLOG")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// SQLite database that keeps trips and their logs between runs.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Base URL of the Maps web services.
    #[arg(long = ARG_MAPS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) maps_base_url: Option<String>,
    /// API key for the Maps web services.
    #[arg(long = ARG_MAPS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) maps_api_key: Option<String>,
    /// Per-request timeout for Maps lookups, in seconds.
    #[arg(long = ARG_LOOKUP_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) lookup_timeout_secs: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        if merged.maps_api_key.is_none() {
            merged.maps_api_key = std::env::var(ENV_GOOGLE_MAPS_API_KEY).ok();
        }
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Trip database; `None` keeps the plan in memory.
    pub(crate) db: Option<Utf8PathBuf>,
    /// Maps collaborator settings.
    pub(crate) maps: HttpCollaboratorConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.request_path, ARG_PLAN_REQUEST)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut maps = args
            .maps_base_url
            .map_or_else(HttpCollaboratorConfig::default, HttpCollaboratorConfig::new);
        if let Some(key) = args.maps_api_key {
            maps = maps.with_api_key(key);
        }
        if let Some(secs) = args.lookup_timeout_secs {
            maps = maps.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            request_path,
            db: args.db,
            maps,
        })
    }
}

/// JSON document accepted by `roadlog plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanRequest {
    /// Trip to store and plan.
    pub(crate) trip: TripDraft,
    /// Optional route and start-time hints.
    #[serde(default)]
    pub(crate) hints: PlanningHints,
}

/// JSON document printed by `roadlog plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanOutput {
    /// Stored trip including its route result.
    pub(crate) trip: Trip,
    /// Generated duty-status log.
    pub(crate) log_entries: Vec<LogEntry>,
}

/// Distance and place-name lookups used by one plan invocation.
pub(crate) struct Collaborators {
    pub(crate) distances: Box<dyn DistanceProvider>,
    pub(crate) namer: Box<dyn LocationNamer>,
}

/// Builds the lookup collaborators for the current plan invocation.
pub(crate) trait CollaboratorBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Collaborators, CliError>;
}

pub(crate) struct HttpCollaboratorBuilder;

impl CollaboratorBuilder for HttpCollaboratorBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Collaborators, CliError> {
        if !config.maps.is_configured() {
            warn!("no Maps API key configured; distances and place names will be estimated");
        }
        let (distances, namer) = maps_collaborators(config.maps.clone()).map_err(|source| {
            CliError::BuildCollaborators {
                base_url: config.maps.base_url.clone(),
                source,
            }
        })?;
        Ok(Collaborators {
            distances: Box::new(distances),
            namer: Box::new(namer),
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &HttpCollaboratorBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn CollaboratorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let output = execute_plan(args, builder)?;
    write_json(writer, &output)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn CollaboratorBuilder,
) -> Result<PlanOutput, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_plan_request(&config.request_path)?;
    request
        .trip
        .validate()
        .map_err(|source| CliError::InvalidTrip {
            path: config.request_path.clone(),
            source,
        })?;
    request
        .hints
        .validate()
        .map_err(|source| CliError::InvalidHints {
            path: config.request_path.clone(),
            source,
        })?;

    let mut store = open_store(config.db.as_deref())?;
    let collaborators = builder.build(&config)?;
    let planner = TripPlanner::new(collaborators.distances, collaborators.namer);

    let today = Local::now().date_naive();
    let trip = planner.plan_and_insert(store.as_mut(), request.trip, &request.hints, today)?;
    let log_entries = store.log_entries(trip.id)?;
    info!("planned trip {} with {} log entries", trip.id, log_entries.len());
    Ok(PlanOutput { trip, log_entries })
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
