//! Plan summaries and per-day progress snapshots.
//!
//! These values are for reporting only; the log entries are the
//! authoritative record of a plan.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Distance progress for a single log sheet date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Log sheet date.
    pub date: NaiveDate,
    /// Place name at the day's starting mileage.
    pub start_location: String,
    /// Place name at the day's ending mileage.
    pub end_location: String,
    /// Miles driven that day.
    #[serde(rename = "daily_distance")]
    pub daily_distance_miles: f64,
    /// Miles driven since the trip started, at the end of the day.
    #[serde(rename = "cumulative_distance")]
    pub cumulative_distance_miles: f64,
    /// Hours spent driving that day.
    pub driving_hours: f64,
}

/// Headline figures for a planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Rounded total distance, e.g. `"2500 mi"`.
    pub distance: String,
    /// Rounded duration estimate, e.g. `"45h"`.
    pub duration: String,
    /// Fuel stops scheduled along the route.
    pub stops: u32,
    /// Estimated arrival: trip start plus the duration estimate.
    pub arrival: NaiveDateTime,
    /// Calendar days covered by the log.
    #[serde(default)]
    pub days: u32,
    /// Whether any route leg fell back to the approximate distance.
    #[serde(default)]
    pub estimated_legs: bool,
}

/// Result blob attached to a trip once it has been planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Headline figures.
    pub summary: RouteSummary,
    /// One snapshot per log sheet date, in date order.
    pub daily_progress: Vec<DailyProgress>,
}
