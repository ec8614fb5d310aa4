//! Constants that shape every generated log.

use chrono::{NaiveTime, Timelike};
use roadlog_core::FALLBACK_DISTANCE_MILES;
use thiserror::Error;

/// Average driving speed assumed for every leg.
pub const AVERAGE_SPEED_MPH: f64 = 55.0;

/// On-duty hours (driving plus on-duty-not-driving) allowed per day.
pub const DAILY_DUTY_HOURS: f64 = 8.75;

/// On-duty time spent at each fuel stop.
pub const FUEL_STOP_HOURS: f64 = 0.25;

/// Meters to statute miles.
pub const MILES_PER_METER: f64 = 0.000_621_371;

/// Longest plan, in calendar days, the segmenter will generate.
pub const MAX_PLAN_DAYS: u32 = 365;

/// Planner constants.
///
/// Every day starts with an off-duty rest from midnight to `rest_end`, then
/// the driver works until the duty budget is spent and rests until
/// `day_end`. The policy is the same for every carrier type and road
/// condition.
///
/// # Examples
/// ```
/// use roadlog_planner::PlanningPolicy;
///
/// let policy = PlanningPolicy::default();
/// assert_eq!(policy.average_speed_mph, 55.0);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningPolicy {
    /// Average driving speed in miles per hour.
    pub average_speed_mph: f64,
    /// Daily on-duty budget in hours.
    pub daily_duty_hours: f64,
    /// End of the daily off-duty rest that starts at midnight.
    pub rest_end: NaiveTime,
    /// Last minute covered by each day's log sheet.
    pub day_end: NaiveTime,
    /// On-duty hours spent at each fuel stop.
    pub fuel_stop_hours: f64,
    /// Leg mileage assumed when a distance lookup fails.
    pub fallback_distance_miles: f64,
    /// Longest plan, in calendar days, before planning gives up.
    pub max_days: u32,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            average_speed_mph: AVERAGE_SPEED_MPH,
            daily_duty_hours: DAILY_DUTY_HOURS,
            rest_end: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            day_end: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default(),
            fuel_stop_hours: FUEL_STOP_HOURS,
            fallback_distance_miles: FALLBACK_DISTANCE_MILES,
            max_days: MAX_PLAN_DAYS,
        }
    }
}

/// Errors returned by [`PlanningPolicy::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// The average speed was zero, negative or not finite.
    #[error("average speed must be positive, got {value}")]
    NonPositiveSpeed {
        /// Rejected speed.
        value: f64,
    },
    /// The daily duty budget was zero, negative or not finite.
    #[error("daily duty budget must be positive, got {value}")]
    NonPositiveBudget {
        /// Rejected budget.
        value: f64,
    },
    /// Rest plus duty budget would run past the end of the log sheet.
    #[error("rest until {rest_end} plus {budget_hours}h on duty overruns the day end at {day_end}")]
    DutyWindowOverrunsDay {
        /// Rest window end.
        rest_end: NaiveTime,
        /// Duty budget in hours.
        budget_hours: f64,
        /// Day end.
        day_end: NaiveTime,
    },
    /// A fuel stop could never fit inside one day's budget.
    #[error("fuel stop of {stop_hours}h does not fit the {budget_hours}h duty budget")]
    FuelStopExceedsBudget {
        /// Fuel stop duration.
        stop_hours: f64,
        /// Duty budget in hours.
        budget_hours: f64,
    },
    /// The day limit was zero.
    #[error("plans must be allowed at least one day")]
    ZeroMaxDays,
}

impl PlanningPolicy {
    /// Check that the policy can always make progress.
    ///
    /// # Errors
    ///
    /// Returns the first [`PolicyError`] encountered.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(self.average_speed_mph.is_finite() && self.average_speed_mph > 0.0) {
            return Err(PolicyError::NonPositiveSpeed {
                value: self.average_speed_mph,
            });
        }
        if !(self.daily_duty_hours.is_finite() && self.daily_duty_hours > 0.0) {
            return Err(PolicyError::NonPositiveBudget {
                value: self.daily_duty_hours,
            });
        }
        if self.rest_end_hours() + self.daily_duty_hours > self.day_end_hours() {
            return Err(PolicyError::DutyWindowOverrunsDay {
                rest_end: self.rest_end,
                budget_hours: self.daily_duty_hours,
                day_end: self.day_end,
            });
        }
        if !(0.0..=self.daily_duty_hours).contains(&self.fuel_stop_hours) {
            return Err(PolicyError::FuelStopExceedsBudget {
                stop_hours: self.fuel_stop_hours,
                budget_hours: self.daily_duty_hours,
            });
        }
        if self.max_days == 0 {
            return Err(PolicyError::ZeroMaxDays);
        }
        Ok(())
    }

    /// Hours needed to drive `miles` at the average speed.
    #[must_use]
    pub fn drive_hours(&self, miles: f64) -> f64 {
        miles / self.average_speed_mph
    }

    /// Longest route that fits in `max_days` of driving at the daily duty budget.
    #[must_use]
    pub fn max_route_miles(&self) -> f64 {
        f64::from(self.max_days) * self.daily_duty_hours * self.average_speed_mph
    }

    pub(crate) fn rest_end_hours(&self) -> f64 {
        hours_since_midnight(self.rest_end)
    }

    pub(crate) fn day_end_hours(&self) -> f64 {
        hours_since_midnight(self.day_end)
    }
}

fn hours_since_midnight(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 3600.0
}
