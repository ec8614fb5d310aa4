//! Turn a trip into a stored duty-status log and route summary.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use log::info;
use roadlog_core::{
    DistanceProvider, FallbackDistance, FallbackLocationNamer, LocationNamer, LogEntry, Milestone,
    PlanningHints, PlanningHintsError, RouteResult, RouteSummary, Trip, TripDraft, TripId,
    TripStore, TripStoreError, TripValidationError,
};
use thiserror::Error;

use crate::{
    DailySegmenter, MilestoneInputs, PlanningPolicy, PolicyError, ResolvedRoute, SegmenterError,
    plan_milestones, resolve_route,
};

/// Errors raised while planning a trip.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The trip failed validation.
    #[error("invalid trip: {0}")]
    InvalidTrip(#[from] TripValidationError),
    /// The planning hints failed validation.
    #[error("invalid planning hints: {0}")]
    InvalidHints(#[from] PlanningHintsError),
    /// The planning policy cannot make progress.
    #[error("invalid planning policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
    /// Pickup or dropoff service cannot fit inside one day's duty budget.
    #[error("service time of {minutes} minutes exceeds the {budget_hours}h daily duty budget")]
    ServiceTimeExceedsBudget {
        /// Requested service time.
        minutes: u32,
        /// Daily duty budget.
        budget_hours: f64,
    },
    /// A trip without a pickup carried no distance or duration hint.
    #[error("route distance is unknown: supply a distance or duration hint")]
    MissingRouteDistance,
    /// The resolved route length was zero or not finite.
    #[error("route distance must be positive, got {miles} miles")]
    InvalidRouteDistance {
        /// Resolved total.
        miles: f64,
    },
    /// The route cannot be driven within the policy's day limit.
    #[error("route of {miles:.0} miles exceeds the {max_miles:.0} mile planning limit")]
    RouteTooLong {
        /// Resolved total.
        miles: f64,
        /// Longest route the policy can plan.
        max_miles: f64,
    },
    /// The estimated arrival fell outside the supported calendar.
    #[error("estimated arrival is out of range")]
    ArrivalOutOfRange,
    /// The segmenter could not finish the log.
    #[error(transparent)]
    Segmenter(#[from] SegmenterError),
    /// No trip exists with the given identifier.
    #[error("trip {id} does not exist")]
    TripNotFound {
        /// Requested identifier.
        id: TripId,
    },
    /// Reading or writing the trip store failed.
    #[error("trip store failed: {0}")]
    Store(#[from] TripStoreError),
}

/// A complete plan for one trip, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    /// Trip the plan belongs to.
    pub trip_id: TripId,
    /// Route lengths the plan was built from.
    pub route: ResolvedRoute,
    /// Stops in the order they were scheduled.
    pub milestones: Vec<Milestone>,
    /// Log entries in `(date, start_time)` order.
    pub entries: Vec<LogEntry>,
    /// Summary and per-day progress.
    pub result: RouteResult,
}

/// Plans trips against a distance provider and a location namer.
///
/// Both collaborators are wrapped in their fallbacks, so lookups never fail
/// a plan.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use roadlog_core::{PlanningHints, Trip, TripDraft, TripId, Unconfigured};
/// use roadlog_planner::TripPlanner;
///
/// # fn main() -> Result<(), roadlog_planner::PlanError> {
/// let planner = TripPlanner::new(Unconfigured, Unconfigured);
/// let trip = Trip::new(TripId(1), TripDraft::new("Reno, NV", "Elko, NV"));
/// let hints = PlanningHints { distance_meters: Some(160_934), ..PlanningHints::default() };
/// let plan = planner.plan(&trip, &hints, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())?;
/// assert_eq!(plan.result.summary.distance, "100 mi");
/// assert_eq!(plan.result.daily_progress.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TripPlanner<D, N> {
    distances: FallbackDistance<D>,
    namer: FallbackLocationNamer<N>,
    policy: PlanningPolicy,
}

impl<D, N> TripPlanner<D, N>
where
    D: DistanceProvider,
    N: LocationNamer,
{
    /// Construct a planner using the default policy.
    pub fn new(distance_provider: D, location_namer: N) -> Self {
        Self::with_policy(distance_provider, location_namer, PlanningPolicy::default())
    }

    /// Construct a planner with an explicit policy.
    pub const fn with_policy(
        distance_provider: D,
        location_namer: N,
        policy: PlanningPolicy,
    ) -> Self {
        Self {
            distances: FallbackDistance::with_fallback(
                distance_provider,
                policy.fallback_distance_miles,
            ),
            namer: FallbackLocationNamer::new(location_namer),
            policy,
        }
    }

    /// Policy the planner schedules with.
    #[must_use]
    pub const fn policy(&self) -> &PlanningPolicy {
        &self.policy
    }

    /// Build the log for `trip` without persisting it.
    ///
    /// `today` is used when the hints carry no start date.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when the trip, hints or policy are invalid, the
    /// route length cannot be established or the log cannot be finished.
    pub fn plan(
        &self,
        trip: &Trip,
        hints: &PlanningHints,
        today: NaiveDate,
    ) -> Result<TripPlan, PlanError> {
        let details = &trip.details;
        details.validate()?;
        hints.validate()?;
        self.policy.validate()?;
        let service_hours = f64::from(details.service_time_minutes) / 60.0;
        if service_hours > self.policy.daily_duty_hours {
            return Err(PlanError::ServiceTimeExceedsBudget {
                minutes: details.service_time_minutes,
                budget_hours: self.policy.daily_duty_hours,
            });
        }

        let route = resolve_route(details, hints, &self.distances, &self.policy)?;
        let milestones = plan_milestones(&MilestoneInputs {
            start_to_pickup_miles: route.start_to_pickup_miles,
            total_miles: route.total_miles,
            fuel_interval_miles: details.fuel_interval_miles,
            service_hours,
            fuel_stop_hours: self.policy.fuel_stop_hours,
        });
        let context = route.context(details);
        let start_date = hints.start_date_or(today);
        let log = DailySegmenter::new(&self.policy, &milestones, &context, trip.id)
            .run(start_date, &self.namer)?;

        let departure = NaiveDateTime::new(start_date, hints.start_time()?);
        let arrival = i64::try_from(route.duration_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| departure.checked_add_signed(delta))
            .ok_or(PlanError::ArrivalOutOfRange)?;
        let summary = RouteSummary {
            distance: format!("{:.0} mi", route.total_miles.round()),
            duration: format!("{:.0}h", (seconds_as_hours(route.duration_seconds)).round()),
            stops: log.fuel_stops,
            arrival,
            days: u32::try_from(log.days()).unwrap_or(u32::MAX),
            estimated_legs: route.estimated_legs,
        };
        info!(
            "planned trip {}: {} over {} days, {} log entries",
            trip.id,
            summary.distance,
            summary.days,
            log.entries.len()
        );
        Ok(TripPlan {
            trip_id: trip.id,
            route,
            milestones,
            entries: log.entries,
            result: RouteResult {
                summary,
                daily_progress: log.daily_progress,
            },
        })
    }

    /// Plan `trip` using the local calendar date as the default start date.
    ///
    /// # Errors
    ///
    /// See [`TripPlanner::plan`].
    pub fn plan_today(&self, trip: &Trip, hints: &PlanningHints) -> Result<TripPlan, PlanError> {
        self.plan(trip, hints, Local::now().date_naive())
    }

    /// Plan a stored trip and replace any plan it already has.
    ///
    /// Returns the trip with its new route result attached.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::TripNotFound`] for unknown trips, any planning
    /// error from [`TripPlanner::plan`], or a wrapped [`TripStoreError`].
    pub fn plan_and_store<S: TripStore + ?Sized>(
        &self,
        store: &mut S,
        id: TripId,
        hints: &PlanningHints,
        today: NaiveDate,
    ) -> Result<Trip, PlanError> {
        let mut trip = store.trip(id)?.ok_or(PlanError::TripNotFound { id })?;
        let plan = self.plan(&trip, hints, today)?;
        store.replace_plan(id, &plan.entries, &plan.result)?;
        trip.route_result = Some(plan.result);
        Ok(trip)
    }

    /// Plan a new trip and insert it with its log.
    ///
    /// Nothing is written unless planning succeeds.
    ///
    /// # Errors
    ///
    /// Returns any planning error from [`TripPlanner::plan`], or a wrapped
    /// [`TripStoreError`].
    pub fn plan_and_insert<S: TripStore + ?Sized>(
        &self,
        store: &mut S,
        draft: TripDraft,
        hints: &PlanningHints,
        today: NaiveDate,
    ) -> Result<Trip, PlanError> {
        let pending = Trip::new(TripId(0), draft);
        let mut plan = self.plan(&pending, hints, today)?;
        let mut trip = store.insert_trip(pending.details)?;
        for entry in &mut plan.entries {
            entry.trip_id = trip.id;
        }
        store.replace_plan(trip.id, &plan.entries, &plan.result)?;
        trip.route_result = Some(plan.result);
        Ok(trip)
    }
}

#[expect(clippy::cast_precision_loss, reason = "durations are far below 2^53 seconds")]
fn seconds_as_hours(seconds: u64) -> f64 {
    seconds as f64 / 3600.0
}
