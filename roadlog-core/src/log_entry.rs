//! Duty-status log entries.

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TripId;

/// Driver duty status as recorded on a daily log sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyStatus {
    /// Off duty.
    #[serde(rename = "OFF")]
    OffDuty,
    /// Resting in the sleeper berth.
    #[serde(rename = "SB")]
    SleeperBerth,
    /// Driving.
    #[serde(rename = "DR")]
    Driving,
    /// On duty, not driving.
    #[serde(rename = "ON")]
    OnDuty,
}

impl DutyStatus {
    /// Short code used on log sheets (`OFF`, `SB`, `DR`, `ON`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::OffDuty => "OFF",
            Self::SleeperBerth => "SB",
            Self::Driving => "DR",
            Self::OnDuty => "ON",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OffDuty => "Off Duty",
            Self::SleeperBerth => "Sleeper Berth",
            Self::Driving => "Driving",
            Self::OnDuty => "On Duty",
        }
    }

    /// Whether time in this status counts against the daily duty budget.
    pub const fn counts_as_duty(self) -> bool {
        matches!(self, Self::Driving | Self::OnDuty)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown duty status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown duty status {0:?}")]
pub struct UnknownDutyStatus(pub String);

impl FromStr for DutyStatus {
    type Err = UnknownDutyStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OFF" => Ok(Self::OffDuty),
            "SB" => Ok(Self::SleeperBerth),
            "DR" => Ok(Self::Driving),
            "ON" => Ok(Self::OnDuty),
            other => Err(UnknownDutyStatus(other.to_owned())),
        }
    }
}

/// One contiguous duty segment on a single log sheet date.
///
/// Entries order by `(log_date, start_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Trip the segment belongs to.
    #[serde(rename = "trip")]
    pub trip_id: TripId,
    /// Calendar date of the log sheet.
    #[serde(rename = "log_sheet_date")]
    pub log_date: NaiveDate,
    /// Duty status for the whole segment.
    #[serde(rename = "duty_status")]
    pub status: DutyStatus,
    /// Segment start, whole minutes.
    pub start_time: NaiveTime,
    /// Segment end, whole minutes.
    pub end_time: NaiveTime,
    /// Place the segment happened at, when known.
    #[serde(default, rename = "location_text")]
    pub location: Option<String>,
    /// Miles driven during the segment; zero unless driving.
    #[serde(rename = "distance_driven")]
    pub distance_miles: f64,
    /// Free-text remarks.
    #[serde(default)]
    pub remarks: String,
}

impl LogEntry {
    /// Length of the segment in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Key entries are ordered by.
    pub const fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.log_date, self.start_time)
    }
}
