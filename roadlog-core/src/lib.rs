//! Core domain types for roadlog.
//!
//! This crate defines the records a trip plan is built from and written to:
//! submitted trips, planning hints, route milestones, duty-status log
//! entries and the per-day progress report. It also defines the narrow
//! interfaces the planner consumes ([`DistanceProvider`], [`LocationNamer`])
//! and the [`TripStore`] persistence trait.
//!
//! Validators return `Result` so invalid input is rejected before planning
//! starts.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod collaborator;
pub mod hints;
pub mod log_entry;
pub mod milestone;
pub mod report;
pub mod store;
pub mod trip;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use collaborator::{
    DistanceLookup, DistanceProvider, FALLBACK_DISTANCE_MILES, FallbackDistance,
    FallbackLocationNamer, LocationNamer, LookupError, RouteContext, Unconfigured,
    generic_location_label,
};
pub use hints::{DEFAULT_START_HOUR, PlanningHints, PlanningHintsError, default_start_time};
pub use log_entry::{DutyStatus, LogEntry, UnknownDutyStatus};
pub use milestone::{Milestone, MilestoneKind};
pub use report::{DailyProgress, RouteResult, RouteSummary};
pub use store::{MemoryTripStore, TripStore, TripStoreError};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteTripStore, SqliteTripStoreError};
pub use trip::{
    DEFAULT_FUEL_INTERVAL_MILES, DEFAULT_SERVICE_TIME_MINUTES, MAX_CYCLE_HOURS, Trip, TripDraft,
    TripId, TripValidationError,
};
