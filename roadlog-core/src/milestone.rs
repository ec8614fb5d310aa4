//! Route points that require a scheduled stop.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why the driver stops at a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    /// Load pickup.
    Pickup,
    /// Refuelling stop.
    Fuel,
    /// Final delivery.
    Dropoff,
}

impl MilestoneKind {
    /// Lowercase identifier used in logs and serialised output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Fuel => "fuel",
            Self::Dropoff => "dropoff",
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stop at a fixed distance from the trip start.
///
/// # Examples
/// ```
/// use roadlog_core::{Milestone, MilestoneKind};
///
/// let fuel = Milestone::new(MilestoneKind::Fuel, 1000.0, 0.25);
/// assert_eq!(fuel.remarks(), "Fuel stop at 1000 miles");
/// assert_eq!(Milestone::new(MilestoneKind::Pickup, 50.0, 1.0).remarks(), "Pickup service");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Stop category.
    pub kind: MilestoneKind,
    /// Miles from the trip start.
    pub distance_miles: f64,
    /// On-duty time spent at the stop, in hours.
    pub stop_hours: f64,
}

impl Milestone {
    /// Construct a milestone.
    pub const fn new(kind: MilestoneKind, distance_miles: f64, stop_hours: f64) -> Self {
        Self {
            kind,
            distance_miles,
            stop_hours,
        }
    }

    /// Whether reaching this milestone ends the trip.
    pub const fn is_dropoff(&self) -> bool {
        matches!(self.kind, MilestoneKind::Dropoff)
    }

    /// Remarks written on the on-duty segment spent at this stop.
    pub fn remarks(&self) -> String {
        match self.kind {
            MilestoneKind::Pickup => "Pickup service".to_owned(),
            MilestoneKind::Dropoff => "Dropoff service".to_owned(),
            MilestoneKind::Fuel => format!("Fuel stop at {} miles", format_miles(self.distance_miles)),
        }
    }
}

/// Whole miles print without a fraction; anything else keeps one decimal.
fn format_miles(miles: f64) -> String {
    if miles.fract() == 0.0 {
        format!("{miles:.0}")
    } else {
        format!("{miles:.1}")
    }
}
