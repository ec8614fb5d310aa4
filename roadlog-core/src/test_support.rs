//! Deterministic collaborators and fixtures used by unit and behaviour tests.

use std::{cell::Cell, collections::HashMap};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    DailyProgress, DistanceProvider, DutyStatus, LocationNamer, LogEntry, LookupError,
    RouteContext, RouteResult, RouteSummary, TripId,
};

/// `DistanceProvider` returning the same mileage for every pair.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistanceProvider {
    miles: f64,
}

impl FixedDistanceProvider {
    /// Return `miles` for every lookup.
    pub const fn new(miles: f64) -> Self {
        Self { miles }
    }
}

impl DistanceProvider for FixedDistanceProvider {
    fn distance_miles(&self, _origin: &str, _destination: &str) -> Result<f64, LookupError> {
        Ok(self.miles)
    }
}

/// `DistanceProvider` backed by a table of known legs.
///
/// Unknown legs fail with [`LookupError::NoResult`]. Every call is counted.
#[derive(Debug, Default)]
pub struct RouteTableDistanceProvider {
    legs: HashMap<(String, String), f64>,
    calls: Cell<usize>,
}

impl RouteTableDistanceProvider {
    /// Add a leg to the table.
    #[must_use]
    pub fn with_leg(mut self, origin: &str, destination: &str, miles: f64) -> Self {
        self.legs
            .insert((origin.to_owned(), destination.to_owned()), miles);
        self
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DistanceProvider for RouteTableDistanceProvider {
    fn distance_miles(&self, origin: &str, destination: &str) -> Result<f64, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.legs
            .get(&(origin.to_owned(), destination.to_owned()))
            .copied()
            .ok_or_else(|| LookupError::NoResult {
                query: format!("{origin} -> {destination}"),
            })
    }
}

/// `DistanceProvider` whose lookups always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingDistanceProvider;

impl DistanceProvider for FailingDistanceProvider {
    fn distance_miles(&self, origin: &str, _destination: &str) -> Result<f64, LookupError> {
        Err(LookupError::NetworkError {
            url: format!("stub://distance/{origin}"),
            message: "connection refused".to_owned(),
        })
    }
}

/// `LocationNamer` labelling places as `Mile <n>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MileMarkerNamer;

impl LocationNamer for MileMarkerNamer {
    fn location_name(&self, miles: f64, _route: &RouteContext) -> Result<String, LookupError> {
        Ok(format!("Mile {miles:.0}"))
    }
}

/// `LocationNamer` whose lookups always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingLocationNamer;

impl LocationNamer for FailingLocationNamer {
    fn location_name(&self, _miles: f64, _route: &RouteContext) -> Result<String, LookupError> {
        Err(LookupError::Timeout {
            url: "stub://geocode".to_owned(),
            timeout_secs: 10,
        })
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap_or_default()
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// One day's log for a 100 mile trip, in log-sheet order.
pub fn sample_entries(trip_id: TripId) -> Vec<LogEntry> {
    let entry = |status, start: NaiveTime, end: NaiveTime, miles, remarks: &str| LogEntry {
        trip_id,
        log_date: date(),
        status,
        start_time: start,
        end_time: end,
        location: None,
        distance_miles: miles,
        remarks: remarks.to_owned(),
    };
    vec![
        entry(DutyStatus::OffDuty, clock(0, 0), clock(8, 0), 0.0, ""),
        entry(DutyStatus::Driving, clock(8, 0), clock(9, 49), 100.0, ""),
        LogEntry {
            location: Some("Denver, CO".to_owned()),
            ..entry(
                DutyStatus::OnDuty,
                clock(9, 49),
                clock(10, 49),
                0.0,
                "Dropoff service",
            )
        },
        entry(DutyStatus::OffDuty, clock(10, 49), clock(23, 59), 0.0, ""),
    ]
}

/// Route result matching [`sample_entries`].
pub fn sample_result() -> RouteResult {
    RouteResult {
        summary: RouteSummary {
            distance: "100 mi".to_owned(),
            duration: "2h".to_owned(),
            stops: 0,
            arrival: NaiveDateTime::new(date(), clock(9, 49)),
            days: 1,
            estimated_legs: false,
        },
        daily_progress: vec![DailyProgress {
            date: date(),
            start_location: "Chicago, IL".to_owned(),
            end_location: "Denver, CO".to_owned(),
            daily_distance_miles: 100.0,
            cumulative_distance_miles: 100.0,
            driving_hours: 1.82,
        }],
    }
}
