//! Optional timing and distance hints supplied alongside a trip.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hour of the local clock time used when no start time hint is given.
pub const DEFAULT_START_HOUR: u32 = 8;

/// Local clock time used when no start time hint is given (08:00).
pub fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or_default()
}

/// Caller-supplied planning hints.
///
/// Every field is optional. Zero-valued duration and distance hints are
/// treated as absent.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use roadlog_core::PlanningHints;
///
/// let hints = PlanningHints {
///     start_time_local: Some("06:30".into()),
///     ..PlanningHints::default()
/// };
/// assert_eq!(hints.start_time()?, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
/// # Ok::<(), roadlog_core::PlanningHintsError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningHints {
    /// Estimated trip duration in seconds.
    #[serde(default, alias = "durationSeconds")]
    pub duration_seconds: Option<u64>,
    /// Estimated trip distance in meters.
    #[serde(default, alias = "distanceMeters")]
    pub distance_meters: Option<u64>,
    /// Calendar date the trip starts on.
    #[serde(default, alias = "start_date_iso", alias = "startDateISO")]
    pub start_date: Option<NaiveDate>,
    /// Local start time formatted as `HH:MM`.
    #[serde(default)]
    pub start_time_local: Option<String>,
    /// Authoritative start-to-pickup leg, bypassing the distance lookup.
    #[serde(default)]
    pub start_to_pickup_miles: Option<f64>,
    /// Authoritative pickup-to-dropoff leg, bypassing the distance lookup.
    #[serde(default)]
    pub pickup_to_dropoff_miles: Option<f64>,
}

/// Errors returned by [`PlanningHints::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningHintsError {
    /// The start time was not a 24-hour `HH:MM` value.
    #[error("start time {value:?} is not a valid HH:MM time")]
    InvalidStartTime {
        /// Rejected text.
        value: String,
    },
    /// A leg distance hint was negative or not finite.
    #[error("{field} must be a finite, non-negative mileage, got {value}")]
    InvalidLegDistance {
        /// Name of the offending hint.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl PlanningHints {
    /// Duration hint, with zero treated as absent.
    pub fn duration_seconds(&self) -> Option<u64> {
        self.duration_seconds.filter(|secs| *secs > 0)
    }

    /// Distance hint, with zero treated as absent.
    pub fn distance_meters(&self) -> Option<u64> {
        self.distance_meters.filter(|meters| *meters > 0)
    }

    /// Resolve the local start time, defaulting to 08:00.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningHintsError::InvalidStartTime`] for malformed input.
    pub fn start_time(&self) -> Result<NaiveTime, PlanningHintsError> {
        let Some(raw) = self.start_time_local.as_deref().map(str::trim) else {
            return Ok(default_start_time());
        };
        if raw.is_empty() {
            return Ok(default_start_time());
        }
        NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| PlanningHintsError::InvalidStartTime {
            value: raw.to_owned(),
        })
    }

    /// Resolve the start date, defaulting to `today`.
    pub fn start_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.unwrap_or(today)
    }

    /// Check the hints before planning.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanningHintsError`] encountered.
    pub fn validate(&self) -> Result<(), PlanningHintsError> {
        self.start_time()?;
        check_leg("start_to_pickup_miles", self.start_to_pickup_miles)?;
        check_leg("pickup_to_dropoff_miles", self.pickup_to_dropoff_miles)?;
        Ok(())
    }
}

fn check_leg(field: &'static str, value: Option<f64>) -> Result<(), PlanningHintsError> {
    match value {
        Some(miles) if !miles.is_finite() || miles < 0.0 => {
            Err(PlanningHintsError::InvalidLegDistance { field, value: miles })
        }
        _ => Ok(()),
    }
}
