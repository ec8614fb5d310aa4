//! Resolve the route length and duration estimate for a trip.

use log::debug;
use roadlog_core::{DistanceProvider, FallbackDistance, PlanningHints, RouteContext, TripDraft};

use crate::{MILES_PER_METER, PlanError, PlanningPolicy};

/// Duration and distance hints after zero values are dropped and each
/// missing figure is derived from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalisedHints {
    /// Estimated duration in whole seconds.
    pub duration_seconds: Option<u64>,
    /// Estimated distance in whole meters.
    pub distance_meters: Option<u64>,
}

impl NormalisedHints {
    /// Fill in whichever of duration and distance is missing at the
    /// policy's average speed.
    ///
    /// # Examples
    /// ```
    /// use roadlog_core::PlanningHints;
    /// use roadlog_planner::{NormalisedHints, PlanningPolicy};
    ///
    /// let hints = PlanningHints { duration_seconds: Some(3600), ..PlanningHints::default() };
    /// let normalised = NormalisedHints::from_hints(&hints, &PlanningPolicy::default());
    /// assert_eq!(normalised.duration_seconds, Some(3600));
    /// assert_eq!(normalised.distance_meters, Some(88_513));
    /// ```
    #[must_use]
    pub fn from_hints(hints: &PlanningHints, policy: &PlanningPolicy) -> Self {
        let duration = hints.duration_seconds();
        let distance = hints.distance_meters();
        match (duration, distance) {
            (None, Some(meters)) => {
                let miles = meters_to_miles(meters);
                Self {
                    duration_seconds: Some(whole(policy.drive_hours(miles) * 3600.0)),
                    distance_meters: Some(meters),
                }
            }
            (Some(seconds), None) => {
                let miles = seconds_to_hours(seconds) * policy.average_speed_mph;
                Self {
                    duration_seconds: Some(seconds),
                    distance_meters: Some(whole(miles / MILES_PER_METER)),
                }
            }
            _ => Self {
                duration_seconds: duration,
                distance_meters: distance,
            },
        }
    }

    /// Distance hint in miles.
    #[must_use]
    pub fn distance_miles(&self) -> Option<f64> {
        self.distance_meters.map(meters_to_miles)
    }
}

/// Route lengths used for planning.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    /// Mileage from the start to the pickup; zero without a pickup.
    pub start_to_pickup_miles: f64,
    /// Mileage from the pickup (or start) to the dropoff.
    pub pickup_to_dropoff_miles: f64,
    /// Total route mileage.
    pub total_miles: f64,
    /// Whether any leg used the fallback distance.
    pub estimated_legs: bool,
    /// Duration estimate reported in the summary, in seconds.
    pub duration_seconds: u64,
}

impl ResolvedRoute {
    /// Route descriptors for location lookups.
    #[must_use]
    pub fn context(&self, trip: &TripDraft) -> RouteContext {
        RouteContext {
            start_location: trip.start_location.trim().to_owned(),
            pickup_location: trip.pickup().map(str::to_owned),
            dropoff_location: trip.dropoff_location.trim().to_owned(),
            start_to_pickup_miles: self.start_to_pickup_miles,
            total_miles: self.total_miles,
        }
    }
}

/// Work out the route length for `trip`.
///
/// With a pickup, each leg comes from its explicit hint when given and from
/// `distances` otherwise. Without a pickup the total comes from the distance
/// hint, or from the duration hint at the average speed.
///
/// # Errors
///
/// Returns [`PlanError::MissingRouteDistance`] when a trip without a pickup
/// carries neither hint, and [`PlanError::InvalidRouteDistance`] when the
/// resolved total is zero or not finite. Returns [`PlanError::RouteTooLong`]
/// when the total cannot be driven within the policy's day limit.
pub fn resolve_route<P: DistanceProvider>(
    trip: &TripDraft,
    hints: &PlanningHints,
    distances: &FallbackDistance<P>,
    policy: &PlanningPolicy,
) -> Result<ResolvedRoute, PlanError> {
    let normalised = NormalisedHints::from_hints(hints, policy);
    let start = trip.start_location.trim();
    let dropoff = trip.dropoff_location.trim();

    let (start_to_pickup_miles, pickup_to_dropoff_miles, estimated_legs) =
        if let Some(pickup) = trip.pickup() {
            let (first, first_estimated) = leg(distances, hints.start_to_pickup_miles, start, pickup);
            let (second, second_estimated) =
                leg(distances, hints.pickup_to_dropoff_miles, pickup, dropoff);
            (first, second, first_estimated || second_estimated)
        } else {
            let direct = normalised
                .distance_miles()
                .ok_or(PlanError::MissingRouteDistance)?;
            (0.0, direct, false)
        };

    let total_miles = start_to_pickup_miles + pickup_to_dropoff_miles;
    if !(total_miles.is_finite() && total_miles > 0.0) {
        return Err(PlanError::InvalidRouteDistance { miles: total_miles });
    }
    let max_miles = policy.max_route_miles();
    if total_miles > max_miles {
        return Err(PlanError::RouteTooLong {
            miles: total_miles,
            max_miles,
        });
    }
    let duration_seconds = normalised
        .duration_seconds
        .unwrap_or_else(|| whole(policy.drive_hours(total_miles) * 3600.0));
    debug!(
        "resolved route: {start_to_pickup_miles:.1} + {pickup_to_dropoff_miles:.1} = {total_miles:.1} miles"
    );
    Ok(ResolvedRoute {
        start_to_pickup_miles,
        pickup_to_dropoff_miles,
        total_miles,
        estimated_legs,
        duration_seconds,
    })
}

fn leg<P: DistanceProvider>(
    distances: &FallbackDistance<P>,
    hint: Option<f64>,
    origin: &str,
    destination: &str,
) -> (f64, bool) {
    hint.map_or_else(
        || {
            let lookup = distances.lookup(origin, destination);
            (lookup.miles, lookup.fallback)
        },
        |miles| (miles, false),
    )
}

fn meters_to_miles(meters: u64) -> f64 {
    u64_to_f64(meters) * MILES_PER_METER
}

fn seconds_to_hours(seconds: u64) -> f64 {
    u64_to_f64(seconds) / 3600.0
}

#[expect(
    clippy::cast_precision_loss,
    reason = "hint values are far below 2^53"
)]
const fn u64_to_f64(value: u64) -> f64 {
    value as f64
}

/// Truncate to whole units, treating negative and non-finite values as zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked to be finite and non-negative; the cast saturates"
)]
fn whole(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}
