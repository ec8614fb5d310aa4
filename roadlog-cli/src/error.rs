//! Error types emitted by the roadlog CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use roadlog_core::{PlanningHintsError, TripId, TripStoreError, TripValidationError};
use roadlog_data::ProviderBuildError;
use roadlog_planner::PlanError;
use thiserror::Error;

/// Errors emitted by the roadlog CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature name.
        feature: &'static str,
        /// What was attempted.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The directory that should hold the trip database is missing.
    #[error("database directory for {path:?} is not accessible: {source}")]
    DatabaseDirectory {
        /// Database path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The trip in the plan request failed validation.
    #[error("trip in {path:?} failed validation: {source}")]
    InvalidTrip {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: TripValidationError,
    },
    /// The planning hints in the plan request failed validation.
    #[error("planning hints in {path:?} failed validation: {source}")]
    InvalidHints {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: PlanningHintsError,
    },
    /// Opening the trip database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open trip database at {path:?}: {source}")]
    OpenStore {
        /// Database path.
        path: Utf8PathBuf,
        /// Store error.
        #[source]
        source: roadlog_core::SqliteTripStoreError,
    },
    /// Reading or writing the trip store failed.
    #[error(transparent)]
    Store(#[from] TripStoreError),
    /// Constructing the Maps collaborators failed.
    #[error("failed to build maps collaborators for {base_url:?}: {source}")]
    BuildCollaborators {
        /// Configured base URL.
        base_url: String,
        /// Construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the trip.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// The requested trip is not in the database.
    #[error("trip {id} not found")]
    UnknownTrip {
        /// Requested identifier.
        id: TripId,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
