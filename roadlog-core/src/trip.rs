//! Trip submissions and stored trip records.
//!
//! A [`TripDraft`] is what a dispatcher submits. Once accepted by a
//! [`TripStore`](crate::TripStore) it becomes a [`Trip`] with an identifier and,
//! after planning, an attached [`RouteResult`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RouteResult;

/// Default fuel stop spacing in miles.
pub const DEFAULT_FUEL_INTERVAL_MILES: u32 = 1000;

/// Default on-duty service time for pickup and dropoff, in minutes.
pub const DEFAULT_SERVICE_TIME_MINUTES: u32 = 60;

/// Upper bound accepted for the driver's rolling cycle hours (70-hour/8-day rule).
pub const MAX_CYCLE_HOURS: f64 = 70.0;

/// Identifier assigned to a trip by its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub u64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trip parameters as submitted, before a store assigns an identifier.
///
/// # Examples
/// ```
/// use roadlog_core::TripDraft;
///
/// let draft = TripDraft::new("Chicago, IL", "Denver, CO").with_pickup("Omaha, NE");
/// assert!(draft.validate().is_ok());
/// assert_eq!(draft.pickup(), Some("Omaha, NE"));
/// assert_eq!(draft.fuel_interval_miles, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    /// Where the driver starts the trip.
    pub start_location: String,
    /// Optional pickup point between start and dropoff.
    #[serde(default)]
    pub pickup_location: Option<String>,
    /// Final delivery point.
    pub dropoff_location: String,
    /// Hours already used in the driver's current cycle.
    #[serde(default)]
    pub current_cycle_hours: f64,
    /// Whether the carrier hauls property (as opposed to passengers).
    #[serde(default = "default_property_carrying", alias = "is_property_carrying")]
    pub property_carrying: bool,
    /// Whether adverse driving conditions were declared.
    #[serde(default)]
    pub adverse_conditions: bool,
    /// Miles between fuel stops.
    #[serde(default = "default_fuel_interval_miles")]
    pub fuel_interval_miles: u32,
    /// Minutes spent on duty at pickup and at dropoff.
    #[serde(default = "default_service_time_minutes")]
    pub service_time_minutes: u32,
}

const fn default_property_carrying() -> bool {
    true
}

const fn default_fuel_interval_miles() -> u32 {
    DEFAULT_FUEL_INTERVAL_MILES
}

const fn default_service_time_minutes() -> u32 {
    DEFAULT_SERVICE_TIME_MINUTES
}

/// Errors returned by [`TripDraft::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripValidationError {
    /// The start location was empty or whitespace.
    #[error("start location must not be empty")]
    MissingStart,
    /// The dropoff location was empty or whitespace.
    #[error("dropoff location must not be empty")]
    MissingDropoff,
    /// Cycle hours were negative, non-finite or above the cycle ceiling.
    #[error("current cycle hours must be between 0 and {max}, got {value}")]
    CycleHoursOutOfRange {
        /// Rejected value.
        value: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// Fuel stops cannot be spaced zero miles apart.
    #[error("fuel interval must be at least one mile")]
    ZeroFuelInterval,
}

impl TripDraft {
    /// Create a draft between two locations using default assumptions.
    pub fn new(start_location: impl Into<String>, dropoff_location: impl Into<String>) -> Self {
        Self {
            start_location: start_location.into(),
            pickup_location: None,
            dropoff_location: dropoff_location.into(),
            current_cycle_hours: 0.0,
            property_carrying: true,
            adverse_conditions: false,
            fuel_interval_miles: DEFAULT_FUEL_INTERVAL_MILES,
            service_time_minutes: DEFAULT_SERVICE_TIME_MINUTES,
        }
    }

    /// Set the pickup location.
    #[must_use]
    pub fn with_pickup(mut self, pickup_location: impl Into<String>) -> Self {
        self.pickup_location = Some(pickup_location.into());
        self
    }

    /// Set the hours already used in the current cycle.
    #[must_use]
    pub const fn with_cycle_hours(mut self, hours: f64) -> Self {
        self.current_cycle_hours = hours;
        self
    }

    /// Set the fuel stop spacing.
    #[must_use]
    pub const fn with_fuel_interval(mut self, miles: u32) -> Self {
        self.fuel_interval_miles = miles;
        self
    }

    /// Set the pickup/dropoff service time.
    #[must_use]
    pub const fn with_service_time(mut self, minutes: u32) -> Self {
        self.service_time_minutes = minutes;
        self
    }

    /// Set the carrier and road-condition flags.
    #[must_use]
    pub const fn with_conditions(mut self, property_carrying: bool, adverse: bool) -> Self {
        self.property_carrying = property_carrying;
        self.adverse_conditions = adverse;
        self
    }

    /// Return the pickup location when one is present and non-blank.
    pub fn pickup(&self) -> Option<&str> {
        non_blank(self.pickup_location.as_deref())
    }

    /// Check the draft before it is stored or planned.
    ///
    /// # Errors
    ///
    /// Returns the first [`TripValidationError`] encountered.
    pub fn validate(&self) -> Result<(), TripValidationError> {
        if non_blank(Some(&self.start_location)).is_none() {
            return Err(TripValidationError::MissingStart);
        }
        if non_blank(Some(&self.dropoff_location)).is_none() {
            return Err(TripValidationError::MissingDropoff);
        }
        let hours = self.current_cycle_hours;
        if !hours.is_finite() || !(0.0..=MAX_CYCLE_HOURS).contains(&hours) {
            return Err(TripValidationError::CycleHoursOutOfRange {
                value: hours,
                max: MAX_CYCLE_HOURS,
            });
        }
        if self.fuel_interval_miles == 0 {
            return Err(TripValidationError::ZeroFuelInterval);
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// A stored trip.
///
/// `route_result` stays `None` until the trip has been planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Store-assigned identifier.
    pub id: TripId,
    /// Submitted parameters.
    #[serde(flatten)]
    pub details: TripDraft,
    /// Summary and daily progress written by the trip compiler.
    #[serde(default, rename = "calculated_route")]
    pub route_result: Option<RouteResult>,
}

impl Trip {
    /// Wrap validated parameters in a stored trip record.
    pub const fn new(id: TripId, details: TripDraft) -> Self {
        Self {
            id,
            details,
            route_result: None,
        }
    }

    /// Pickup location, when present.
    pub fn pickup(&self) -> Option<&str> {
        self.details.pickup()
    }
}
