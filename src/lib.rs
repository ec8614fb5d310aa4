//! Facade crate for the roadlog hours-of-service trip planner.
//!
//! This crate re-exports the core domain types and the planner, and exposes
//! the optional Maps collaborators and SQLite store behind feature flags.

#![forbid(unsafe_code)]

pub use roadlog_core::{
    DailyProgress, DistanceProvider, DutyStatus, LocationNamer, LogEntry, LookupError,
    MemoryTripStore, Milestone, MilestoneKind, PlanningHints, RouteContext, RouteResult,
    RouteSummary, Trip, TripDraft, TripId, TripStore, TripStoreError, Unconfigured,
};
pub use roadlog_planner::{PlanError, PlanningPolicy, TripPlan, TripPlanner};

#[cfg(feature = "store-sqlite")]
pub use roadlog_core::{SqliteTripStore, SqliteTripStoreError};

#[cfg(feature = "http")]
pub use roadlog_data::{
    HttpCollaboratorConfig, HttpDistanceProvider, HttpLocationNamer, ProviderBuildError,
    maps_collaborators,
};
