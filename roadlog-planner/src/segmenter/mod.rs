//! Day-by-day duty segment generation.
//!
//! [`DailySegmenter::step`] advances a [`SegmenterState`] by one action:
//! opening a day with the morning rest, driving toward or servicing the next
//! milestone, or closing the day with the evening rest. [`DailySegmenter::run`]
//! drives the steps until the dropoff has been serviced and the final day is
//! closed, naming each day's start and end points along the way.

mod clock;
mod state;

use chrono::{Days, NaiveDate};
use log::debug;
use roadlog_core::{
    DailyProgress, DutyStatus, FallbackLocationNamer, LocationNamer, LogEntry, Milestone,
    MilestoneKind, RouteContext, TripId,
};
use thiserror::Error;

use crate::PlanningPolicy;

use clock::{clock_time, minute_of_day};
pub use state::{DayTotals, SegmenterState, Step};
use state::Phase;

/// Slack allowed when comparing hours against the remaining budget.
const TIME_EPSILON: f64 = 1e-9;

/// Slack allowed when comparing cumulative mileage against a milestone.
const DISTANCE_TOLERANCE: f64 = 1e-6;

/// Errors raised while segmenting a trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmenterError {
    /// The trip needs more days than the policy allows.
    #[error("trip could not be completed within {max_days} days")]
    DayLimitExceeded {
        /// Policy day limit.
        max_days: u32,
    },
    /// The next log sheet date is outside the supported calendar.
    #[error("log sheet date after {date} is out of range")]
    CalendarOverflow {
        /// Last representable date reached.
        date: NaiveDate,
    },
}

/// Output of a complete segmenter run.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedLog {
    /// Every log entry, in `(date, start_time)` order.
    pub entries: Vec<LogEntry>,
    /// One progress snapshot per log sheet date.
    pub daily_progress: Vec<DailyProgress>,
    /// Fuel stops serviced.
    pub fuel_stops: u32,
}

impl SegmentedLog {
    /// Number of calendar days the log spans.
    #[must_use]
    pub const fn days(&self) -> usize {
        self.daily_progress.len()
    }
}

/// A duty interval before it is pinned to clock minutes.
struct Span {
    status: DutyStatus,
    start_hours: f64,
    end_hours: f64,
    miles: f64,
    location: Option<String>,
    remarks: String,
}

impl Span {
    const fn off_duty(start_hours: f64, end_hours: f64) -> Self {
        Self {
            status: DutyStatus::OffDuty,
            start_hours,
            end_hours,
            miles: 0.0,
            location: None,
            remarks: String::new(),
        }
    }
}

/// Generates duty segments for one trip.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use roadlog_core::{FallbackLocationNamer, Milestone, MilestoneKind, RouteContext, TripId, Unconfigured};
/// use roadlog_planner::{DailySegmenter, PlanningPolicy};
///
/// let policy = PlanningPolicy::default();
/// let milestones = [Milestone::new(MilestoneKind::Dropoff, 100.0, 1.0)];
/// let route = RouteContext::direct("Reno, NV", "Elko, NV", 100.0);
/// let segmenter = DailySegmenter::new(&policy, &milestones, &route, TripId(1));
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let log = segmenter.run(date, &FallbackLocationNamer::new(Unconfigured)).unwrap();
/// assert_eq!(log.days(), 1);
/// assert_eq!(log.entries.len(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DailySegmenter<'a> {
    policy: &'a PlanningPolicy,
    milestones: &'a [Milestone],
    route: &'a RouteContext,
    trip_id: TripId,
}

impl<'a> DailySegmenter<'a> {
    /// Create a segmenter over an ascending milestone list.
    ///
    /// The route's `total_miles` is the distance the log must cover.
    #[must_use]
    pub const fn new(
        policy: &'a PlanningPolicy,
        milestones: &'a [Milestone],
        route: &'a RouteContext,
        trip_id: TripId,
    ) -> Self {
        Self {
            policy,
            milestones,
            route,
            trip_id,
        }
    }

    /// Run every step from `start_date` until the trip is complete.
    ///
    /// # Errors
    ///
    /// Returns [`SegmenterError`] when the trip cannot be finished within the
    /// policy's day limit or the calendar runs out.
    pub fn run<N: LocationNamer>(
        &self,
        start_date: NaiveDate,
        namer: &FallbackLocationNamer<N>,
    ) -> Result<SegmentedLog, SegmenterError> {
        let mut state = SegmenterState::new(start_date);
        let mut entries = Vec::new();
        let mut daily_progress = Vec::new();
        loop {
            let step = self.step(state)?;
            entries.extend(step.segments);
            if let Some(day) = step.closed_day {
                daily_progress.push(self.progress(day, namer));
            }
            state = step.state;
            if state.is_finished() {
                break;
            }
        }
        Ok(SegmentedLog {
            entries,
            daily_progress,
            fuel_stops: state.fuel_stops,
        })
    }

    /// Advance `state` by one action.
    ///
    /// Stepping a finished state yields no segments and leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SegmenterError`] when opening a day beyond the policy's day
    /// limit or past the end of the calendar.
    pub fn step(&self, state: SegmenterState) -> Result<Step, SegmenterError> {
        match state.phase {
            Phase::OpenDay => self.open_day(state),
            Phase::Working => Ok(self.work(state)),
            Phase::CloseDay => self.close_day(state),
            Phase::Finished => Ok(Step::new(state, Vec::new())),
        }
    }

    fn open_day(&self, mut state: SegmenterState) -> Result<Step, SegmenterError> {
        if state.day_index >= self.policy.max_days {
            return Err(SegmenterError::DayLimitExceeded {
                max_days: self.policy.max_days,
            });
        }
        let rest_end = self.policy.rest_end_hours();
        let mut segments = Vec::new();
        self.emit(&mut segments, state.date, Span::off_duty(0.0, rest_end));
        state.cursor_hours = rest_end;
        state.remaining_budget = self.policy.daily_duty_hours;
        state.day_start_miles = state.covered_miles;
        state.day_driving_hours = 0.0;
        state.phase = Phase::Working;
        Ok(Step::new(state, segments))
    }

    fn work(&self, mut state: SegmenterState) -> Step {
        let mut segments = Vec::new();
        if state.remaining_budget <= TIME_EPSILON {
            state.phase = Phase::CloseDay;
        } else if let Some(milestone) = self.milestones.get(state.milestone_index) {
            self.approach(&mut state, milestone, &mut segments);
        } else {
            self.drive_remaining(&mut state, &mut segments);
        }
        Step::new(state, segments)
    }

    /// Drive to and service `milestone` if today's budget allows, otherwise
    /// get as close as the budget allows and defer it.
    fn approach(&self, state: &mut SegmenterState, milestone: &Milestone, segments: &mut Vec<LogEntry>) {
        let raw_gap = milestone.distance_miles - state.covered_miles;
        if raw_gap < -DISTANCE_TOLERANCE {
            debug!(
                "skipping {} milestone at {:.1} miles; already at {:.1}",
                milestone.kind, milestone.distance_miles, state.covered_miles
            );
            state.milestone_index += 1;
            return;
        }
        let gap = if raw_gap <= DISTANCE_TOLERANCE { 0.0 } else { raw_gap };
        let drive_hours = self.policy.drive_hours(gap);

        if drive_hours + milestone.stop_hours <= state.remaining_budget + TIME_EPSILON {
            self.drive(state, milestone.distance_miles, drive_hours, segments);
            self.service(state, milestone, segments);
            return;
        }

        if gap > 0.0 {
            let hours = drive_hours.min(state.remaining_budget);
            let target = if hours + TIME_EPSILON >= drive_hours {
                milestone.distance_miles
            } else {
                state.covered_miles + hours * self.policy.average_speed_mph
            };
            self.drive(state, target, hours, segments);
        }
        debug!(
            "deferring {} milestone at {:.1} miles to the next day",
            milestone.kind, milestone.distance_miles
        );
        state.phase = Phase::CloseDay;
    }

    /// Drive unlabelled toward the route end when no milestone remains.
    fn drive_remaining(&self, state: &mut SegmenterState, segments: &mut Vec<LogEntry>) {
        let total = self.route.total_miles;
        let remaining = total - state.covered_miles;
        if remaining > DISTANCE_TOLERANCE {
            let needed = self.policy.drive_hours(remaining);
            let hours = needed.min(state.remaining_budget);
            let target = if hours + TIME_EPSILON >= needed {
                total
            } else {
                state.covered_miles + hours * self.policy.average_speed_mph
            };
            self.drive(state, target, hours, segments);
        }
        if state.covered_miles + DISTANCE_TOLERANCE >= total {
            state.covered_miles = total;
            state.trip_complete = true;
        }
        state.phase = Phase::CloseDay;
    }

    fn drive(&self, state: &mut SegmenterState, target_miles: f64, hours: f64, segments: &mut Vec<LogEntry>) {
        let miles = target_miles - state.covered_miles;
        if miles <= 0.0 {
            state.covered_miles = state.covered_miles.max(target_miles);
            return;
        }
        let end = state.cursor_hours + hours;
        self.emit(
            segments,
            state.date,
            Span {
                status: DutyStatus::Driving,
                start_hours: state.cursor_hours,
                end_hours: end,
                miles,
                location: None,
                remarks: String::new(),
            },
        );
        state.cursor_hours = end;
        state.covered_miles = target_miles;
        state.remaining_budget = (state.remaining_budget - hours).max(0.0);
        state.day_driving_hours += hours;
    }

    fn service(&self, state: &mut SegmenterState, milestone: &Milestone, segments: &mut Vec<LogEntry>) {
        let end = state.cursor_hours + milestone.stop_hours;
        let location = match milestone.kind {
            MilestoneKind::Pickup => self.route.pickup_location.clone(),
            MilestoneKind::Dropoff => Some(self.route.dropoff_location.clone()),
            MilestoneKind::Fuel => None,
        };
        self.emit(
            segments,
            state.date,
            Span {
                status: DutyStatus::OnDuty,
                start_hours: state.cursor_hours,
                end_hours: end,
                miles: 0.0,
                location,
                remarks: milestone.remarks(),
            },
        );
        debug!(
            "serviced {} milestone at {:.1} miles",
            milestone.kind, milestone.distance_miles
        );
        state.cursor_hours = end;
        state.remaining_budget = (state.remaining_budget - milestone.stop_hours).max(0.0);
        state.milestone_index += 1;
        match milestone.kind {
            MilestoneKind::Fuel => state.fuel_stops += 1,
            MilestoneKind::Dropoff => {
                state.covered_miles = self.route.total_miles;
                state.trip_complete = true;
                state.phase = Phase::CloseDay;
            }
            MilestoneKind::Pickup => {}
        }
    }

    fn close_day(&self, mut state: SegmenterState) -> Result<Step, SegmenterError> {
        let mut segments = Vec::new();
        self.emit(
            &mut segments,
            state.date,
            Span::off_duty(state.cursor_hours, self.policy.day_end_hours()),
        );
        let day = DayTotals {
            date: state.date,
            start_miles: state.day_start_miles,
            end_miles: state.covered_miles,
            driving_hours: state.day_driving_hours,
        };
        if state.trip_complete {
            state.phase = Phase::Finished;
        } else {
            state.date = state
                .date
                .checked_add_days(Days::new(1))
                .ok_or(SegmenterError::CalendarOverflow { date: state.date })?;
            state.day_index += 1;
            state.cursor_hours = 0.0;
            state.phase = Phase::OpenDay;
        }
        Ok(Step::closing(state, segments, day))
    }

    /// Pin `span` to clock minutes and append it.
    ///
    /// Driving spans are always kept so no mileage is lost; other spans that
    /// round to zero minutes are dropped.
    fn emit(&self, segments: &mut Vec<LogEntry>, date: NaiveDate, span: Span) {
        let start = minute_of_day(span.start_hours);
        let end = minute_of_day(span.end_hours);
        if end <= start && span.status != DutyStatus::Driving {
            return;
        }
        segments.push(LogEntry {
            trip_id: self.trip_id,
            log_date: date,
            status: span.status,
            start_time: clock_time(start),
            end_time: clock_time(end),
            location: span.location,
            distance_miles: span.miles,
            remarks: span.remarks,
        });
    }

    fn progress<N: LocationNamer>(&self, day: DayTotals, namer: &FallbackLocationNamer<N>) -> DailyProgress {
        DailyProgress {
            date: day.date,
            start_location: namer.name(day.start_miles, self.route),
            end_location: namer.name(day.end_miles, self.route),
            daily_distance_miles: day.end_miles - day.start_miles,
            cumulative_distance_miles: day.end_miles,
            driving_hours: day.driving_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadlog_core::Unconfigured;
    use roadlog_core::test_support::MileMarkerNamer;
    use rstest::{fixture, rstest};

    #[fixture]
    fn policy() -> PlanningPolicy {
        PlanningPolicy::default()
    }

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    fn route(total: f64) -> RouteContext {
        RouteContext::direct("Chicago, IL", "Denver, CO", total)
    }

    fn run(policy: &PlanningPolicy, milestones: &[Milestone], total: f64) -> SegmentedLog {
        let route = route(total);
        DailySegmenter::new(policy, milestones, &route, TripId(1))
            .run(start_date(), &FallbackLocationNamer::new(MileMarkerNamer))
            .expect("segmentation succeeds")
    }

    fn codes(log: &SegmentedLog) -> Vec<&'static str> {
        log.entries.iter().map(|e| e.status.code()).collect()
    }

    #[rstest]
    fn short_trip_fits_one_day(policy: PlanningPolicy) {
        let log = run(&policy, &[Milestone::new(MilestoneKind::Dropoff, 100.0, 1.0)], 100.0);
        assert_eq!(codes(&log), vec!["OFF", "DR", "ON", "OFF"]);
        let drive = log.entries.get(1).expect("driving entry");
        assert_eq!(drive.duration_minutes(), 109);
        assert_eq!(drive.distance_miles, 100.0);
        let service = log.entries.get(2).expect("service entry");
        assert_eq!(service.remarks, "Dropoff service");
        assert_eq!(service.location.as_deref(), Some("Denver, CO"));
        assert_eq!(log.days(), 1);
    }

    #[rstest]
    fn dropoff_without_budget_for_service_waits_for_morning(policy: PlanningPolicy) {
        // 440 miles is exactly 8h of driving; the 1h service does not fit.
        let log = run(&policy, &[Milestone::new(MilestoneKind::Dropoff, 440.0, 1.0)], 440.0);
        assert_eq!(codes(&log), vec!["OFF", "DR", "OFF", "OFF", "ON", "OFF"]);
        let progress = log.daily_progress.first().expect("first day");
        assert_eq!(progress.cumulative_distance_miles, 440.0);
        assert_eq!(log.days(), 2);
    }

    #[rstest]
    fn stacked_stops_are_serviced_back_to_back(policy: PlanningPolicy) {
        let milestones = [
            Milestone::new(MilestoneKind::Pickup, 100.0, 1.0),
            Milestone::new(MilestoneKind::Fuel, 100.0, 0.25),
            Milestone::new(MilestoneKind::Dropoff, 200.0, 1.0),
        ];
        let log = run(&policy, &milestones, 200.0);
        assert_eq!(codes(&log), vec!["OFF", "DR", "ON", "ON", "DR", "ON", "OFF"]);
        assert_eq!(log.fuel_stops, 1);
    }

    #[rstest]
    fn partial_drive_stops_short_of_a_deferred_fuel_stop(policy: PlanningPolicy) {
        let milestones = [
            Milestone::new(MilestoneKind::Fuel, 1000.0, 0.25),
            Milestone::new(MilestoneKind::Dropoff, 1200.0, 1.0),
        ];
        let log = run(&policy, &milestones, 1200.0);
        let fuel = log
            .entries
            .iter()
            .find(|e| e.remarks == "Fuel stop at 1000 miles")
            .expect("fuel stop serviced");
        assert_eq!(fuel.status, DutyStatus::OnDuty);
        assert_eq!(log.fuel_stops, 1);
        let driven: f64 = log.entries.iter().map(|e| e.distance_miles).sum();
        assert!((driven - 1200.0).abs() < 1e-6);
    }

    #[rstest]
    fn unconfigured_namer_labels_progress_generically(policy: PlanningPolicy) {
        let milestones = [Milestone::new(MilestoneKind::Dropoff, 100.0, 1.0)];
        let route = route(100.0);
        let log = DailySegmenter::new(&policy, &milestones, &route, TripId(1))
            .run(start_date(), &FallbackLocationNamer::new(Unconfigured))
            .expect("segmentation succeeds");
        let day = log.daily_progress.first().expect("one day");
        assert_eq!(day.start_location, "Location at 0.0 miles");
        assert_eq!(day.end_location, "Location at 100.0 miles");
    }

    #[rstest]
    fn step_reports_day_and_trip_completion(policy: PlanningPolicy) {
        let milestones = [Milestone::new(MilestoneKind::Dropoff, 55.0, 0.5)];
        let route = route(55.0);
        let segmenter = DailySegmenter::new(&policy, &milestones, &route, TripId(1));

        let opened = segmenter.step(SegmenterState::new(start_date())).expect("open");
        assert!(!opened.day_complete);
        assert_eq!(opened.state.remaining_budget(), policy.daily_duty_hours);

        let worked = segmenter.step(opened.state).expect("work");
        assert!(worked.trip_complete);
        assert!(!worked.day_complete);
        assert_eq!(worked.segments.len(), 2);

        let closed = segmenter.step(worked.state).expect("close");
        assert!(closed.day_complete);
        assert!(closed.state.is_finished());
        let totals = closed.closed_day.expect("day totals");
        assert_eq!(totals.end_miles, 55.0);
        assert!((totals.driving_hours - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn day_limit_stops_runaway_plans() {
        let policy = PlanningPolicy {
            max_days: 2,
            ..PlanningPolicy::default()
        };
        let milestones = [Milestone::new(MilestoneKind::Dropoff, 2000.0, 1.0)];
        let route = route(2000.0);
        let err = DailySegmenter::new(&policy, &milestones, &route, TripId(1))
            .run(start_date(), &FallbackLocationNamer::new(Unconfigured))
            .expect_err("plan should exceed two days");
        assert_eq!(err, SegmenterError::DayLimitExceeded { max_days: 2 });
    }

    #[rstest]
    fn missing_dropoff_still_covers_the_route(policy: PlanningPolicy) {
        let log = run(&policy, &[], 600.0);
        let driven: f64 = log.entries.iter().map(|e| e.distance_miles).sum();
        assert!((driven - 600.0).abs() < 1e-6);
        assert_eq!(log.days(), 2);
    }
}
