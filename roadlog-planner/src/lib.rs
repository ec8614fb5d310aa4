//! Hours-of-service trip planning for roadlog.
//!
//! Planning runs in four stages:
//!
//! 1. [`resolve_route`] establishes the route length from explicit hints or
//!    the distance provider, falling back to a fixed mileage per failed leg.
//! 2. [`plan_milestones`] merges the pickup, fuel and dropoff stops into one
//!    ascending list.
//! 3. [`DailySegmenter`] walks the milestones day by day, emitting off-duty,
//!    driving and on-duty segments that tile each log sheet from 00:00 to
//!    23:59 without exceeding the daily duty budget.
//! 4. [`TripPlanner`] wraps the stages, builds the route summary and writes
//!    the log to a [`TripStore`](roadlog_core::TripStore), replacing any
//!    earlier plan for the same trip.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![expect(
    clippy::float_arithmetic,
    reason = "mileage and duty hours are fractional quantities"
)]

mod compiler;
mod milestones;
mod policy;
mod route;
mod segmenter;

pub use compiler::{PlanError, TripPlan, TripPlanner};
pub use milestones::{MilestoneInputs, plan_milestones};
pub use policy::{
    AVERAGE_SPEED_MPH, DAILY_DUTY_HOURS, FUEL_STOP_HOURS, MAX_PLAN_DAYS, MILES_PER_METER,
    PlanningPolicy, PolicyError,
};
pub use route::{NormalisedHints, ResolvedRoute, resolve_route};
pub use segmenter::{DailySegmenter, DayTotals, SegmentedLog, SegmenterError, SegmenterState, Step};
