//! State carried between segmenter steps.

use chrono::NaiveDate;
use roadlog_core::LogEntry;

/// Where the segmenter is within the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Next step emits the morning rest and resets the budget.
    OpenDay,
    /// Next step drives toward or services a milestone.
    Working,
    /// Next step emits the evening rest and closes the day.
    CloseDay,
    /// The trip is complete and every day is closed.
    Finished,
}

/// Progress through a trip, advanced one step at a time by
/// [`DailySegmenter::step`](super::DailySegmenter::step).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmenterState {
    pub(crate) date: NaiveDate,
    pub(crate) day_index: u32,
    pub(crate) cursor_hours: f64,
    pub(crate) covered_miles: f64,
    pub(crate) day_start_miles: f64,
    pub(crate) day_driving_hours: f64,
    pub(crate) milestone_index: usize,
    pub(crate) remaining_budget: f64,
    pub(crate) fuel_stops: u32,
    pub(crate) phase: Phase,
    pub(crate) trip_complete: bool,
}

impl SegmenterState {
    /// State at midnight on the first day of a trip.
    #[must_use]
    pub const fn new(start_date: NaiveDate) -> Self {
        Self {
            date: start_date,
            day_index: 0,
            cursor_hours: 0.0,
            covered_miles: 0.0,
            day_start_miles: 0.0,
            day_driving_hours: 0.0,
            milestone_index: 0,
            remaining_budget: 0.0,
            fuel_stops: 0,
            phase: Phase::OpenDay,
            trip_complete: false,
        }
    }

    /// Log sheet date currently being filled.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Zero-based index of the current day.
    #[must_use]
    pub const fn day_index(&self) -> u32 {
        self.day_index
    }

    /// Clock position on the current day, in hours past midnight.
    #[must_use]
    pub const fn cursor_hours(&self) -> f64 {
        self.cursor_hours
    }

    /// Miles driven since the trip started.
    #[must_use]
    pub const fn covered_miles(&self) -> f64 {
        self.covered_miles
    }

    /// Duty hours still available today.
    #[must_use]
    pub const fn remaining_budget(&self) -> f64 {
        self.remaining_budget
    }

    /// Index of the next milestone to consume.
    #[must_use]
    pub const fn milestone_index(&self) -> usize {
        self.milestone_index
    }

    /// Fuel stops serviced so far.
    #[must_use]
    pub const fn fuel_stops(&self) -> u32 {
        self.fuel_stops
    }

    /// Whether the dropoff has been serviced.
    #[must_use]
    pub const fn trip_complete(&self) -> bool {
        self.trip_complete
    }

    /// Whether every day of the trip has been closed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

/// Distance and driving figures for a closed day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTotals {
    /// Log sheet date.
    pub date: NaiveDate,
    /// Cumulative miles when the day started.
    pub start_miles: f64,
    /// Cumulative miles when the day ended.
    pub end_miles: f64,
    /// Hours spent driving.
    pub driving_hours: f64,
}

/// Result of one segmenter step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// State to feed into the next step.
    pub state: SegmenterState,
    /// Log entries produced by this step, in clock order.
    pub segments: Vec<LogEntry>,
    /// Totals for the day this step closed, if it closed one.
    pub closed_day: Option<DayTotals>,
    /// Whether this step closed a day.
    pub day_complete: bool,
    /// Whether the dropoff has been serviced.
    pub trip_complete: bool,
}

impl Step {
    pub(crate) const fn new(state: SegmenterState, segments: Vec<LogEntry>) -> Self {
        let trip_complete = state.trip_complete;
        Self {
            state,
            segments,
            closed_day: None,
            day_complete: false,
            trip_complete,
        }
    }

    pub(crate) fn closing(state: SegmenterState, segments: Vec<LogEntry>, day: DayTotals) -> Self {
        Self {
            closed_day: Some(day),
            day_complete: true,
            ..Self::new(state, segments)
        }
    }
}
