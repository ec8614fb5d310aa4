//! Behavioural tests for `TripPlanner` using rstest-bdd.


use std::cell::RefCell;

use chrono::NaiveDate;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use roadlog_core::test_support::{FailingDistanceProvider, MileMarkerNamer};
use roadlog_core::{
    DistanceProvider, DutyStatus, FALLBACK_DISTANCE_MILES, LookupError, MemoryTripStore,
    MilestoneKind, PlanningHints, Trip, TripDraft, TripId, TripStore, Unconfigured,
};
use roadlog_planner::{DAILY_DUTY_HOURS, PlanError, TripPlan, TripPlanner};

use log_invariants::{check_days_tile, check_duty_budget, check_mileage, check_stop_order};

/// Distance provider selected by a scenario.
#[derive(Debug, Clone, Copy, Default)]
enum Distances {
    #[default]
    Unconfigured,
    Failing,
}

impl DistanceProvider for Distances {
    fn distance_miles(&self, origin: &str, destination: &str) -> Result<f64, LookupError> {
        match self {
            Self::Unconfigured => Unconfigured.distance_miles(origin, destination),
            Self::Failing => FailingDistanceProvider.distance_miles(origin, destination),
        }
    }
}

#[derive(Default)]
struct PlannerWorld {
    trip: RefCell<Option<Trip>>,
    hints: RefCell<PlanningHints>,
    distances: RefCell<Distances>,
    outcome: RefCell<Option<Result<TripPlan, PlanError>>>,
    store: RefCell<MemoryTripStore>,
    stored_id: RefCell<Option<TripId>>,
    entries_after_first_plan: RefCell<usize>,
}

impl PlannerWorld {
    fn planner(&self) -> TripPlanner<Distances, MileMarkerNamer> {
        TripPlanner::new(*self.distances.borrow(), MileMarkerNamer)
    }

    fn plan(&self) -> std::cell::Ref<'_, TripPlan> {
        std::cell::Ref::map(self.outcome.borrow(), |outcome| {
            outcome
                .as_ref()
                .expect("the trip should have been planned")
                .as_ref()
                .expect("planning should succeed")
        })
    }

    fn stored_id(&self) -> TripId {
        self.stored_id.borrow().expect("a trip should be stored")
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

fn meters(miles: f64) -> u64 {
    format!("{:.0}", miles / 0.000_621_371)
        .parse()
        .expect("whole meters")
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the duty budget is a small whole number of minutes"
)]
fn budget_minutes() -> i64 {
    (DAILY_DUTY_HOURS * 60.0).round() as i64
}

#[given("a direct trip of 100 miles")]
fn given_direct_trip(world: &PlannerWorld) {
    world.trip.replace(Some(Trip::new(
        TripId(1),
        TripDraft::new("Chicago, IL", "Gary, IN").with_fuel_interval(5000),
    )));
    world.hints.replace(PlanningHints {
        distance_meters: Some(meters(100.0)),
        ..PlanningHints::default()
    });
}

#[given("a trip with a pickup 50 miles out and 2500 miles in total")]
fn given_long_trip(world: &PlannerWorld) {
    world.trip.replace(Some(Trip::new(
        TripId(2),
        TripDraft::new("Chicago, IL", "Los Angeles, CA").with_pickup("Joliet, IL"),
    )));
    world.hints.replace(PlanningHints {
        start_to_pickup_miles: Some(50.0),
        pickup_to_dropoff_miles: Some(2450.0),
        ..PlanningHints::default()
    });
}

#[given("a trip with a pickup whose distance lookups always fail")]
fn given_failing_lookups(world: &PlannerWorld) {
    world.trip.replace(Some(Trip::new(
        TripId(3),
        TripDraft::new("Chicago, IL", "Denver, CO").with_pickup("Omaha, NE"),
    )));
    world.distances.replace(Distances::Failing);
}

#[given("a stored direct trip of 100 miles")]
fn given_stored_trip(world: &PlannerWorld) {
    let trip = world
        .store
        .borrow_mut()
        .insert_trip(TripDraft::new("Chicago, IL", "Gary, IN"))
        .expect("insert trip");
    world.stored_id.replace(Some(trip.id));
    world.hints.replace(PlanningHints {
        distance_meters: Some(meters(100.0)),
        ..PlanningHints::default()
    });
}

#[when("the trip is planned")]
fn when_planned(world: &PlannerWorld) {
    let trip = world.trip.borrow().clone().expect("trip should be set");
    let outcome = world
        .planner()
        .plan(&trip, &world.hints.borrow(), start_date());
    world.outcome.replace(Some(outcome));
}

#[when("the stored trip is planned twice")]
fn when_planned_twice(world: &PlannerWorld) {
    let planner = world.planner();
    let id = world.stored_id();
    let hints = world.hints.borrow().clone();
    let mut store = world.store.borrow_mut();
    planner
        .plan_and_store(&mut *store, id, &hints, start_date())
        .expect("first plan");
    world
        .entries_after_first_plan
        .replace(store.log_entries(id).expect("entries").len());
    planner
        .plan_and_store(&mut *store, id, &hints, start_date())
        .expect("second plan");
}

#[then("the log covers exactly {days} calendar day")]
fn then_days(world: &PlannerWorld, days: u32) {
    assert_eq!(world.plan().result.summary.days, days);
}

#[then("the log covers at least {days} calendar days")]
fn then_at_least_days(world: &PlannerWorld, days: u32) {
    assert!(world.plan().result.summary.days >= days);
}

#[then("the first day drives for about 1.82 hours")]
fn then_short_drive(world: &PlannerWorld) {
    let plan = world.plan();
    let day = plan.result.daily_progress.first().expect("one day");
    assert!((day.driving_hours - 1.82).abs() < 0.01);
    let drive = plan
        .entries
        .iter()
        .find(|entry| entry.status == DutyStatus::Driving)
        .expect("a driving entry");
    assert_eq!(drive.duration_minutes(), 109);
}

#[then("the first day ends with a dropoff service and an off-duty rest")]
fn then_dropoff_then_rest(world: &PlannerWorld) {
    let plan = world.plan();
    let codes: Vec<_> = plan.entries.iter().map(|entry| entry.status.code()).collect();
    assert_eq!(codes, vec!["OFF", "DR", "ON", "OFF"]);
    let service = plan.entries.get(2).expect("service entry");
    assert_eq!(service.remarks, "Dropoff service");
}

#[then("the milestones are pickup at 50, fuel at 1000, fuel at 2000 and dropoff at 2500")]
fn then_long_trip_milestones(world: &PlannerWorld) {
    let plan = world.plan();
    let milestones: Vec<_> = plan
        .milestones
        .iter()
        .map(|m| (m.kind, m.distance_miles))
        .collect();
    assert_eq!(
        milestones,
        vec![
            (MilestoneKind::Pickup, 50.0),
            (MilestoneKind::Fuel, 1000.0),
            (MilestoneKind::Fuel, 2000.0),
            (MilestoneKind::Dropoff, 2500.0),
        ]
    );
}

#[then("the summary reports {stops} fuel stops")]
fn then_fuel_stops(world: &PlannerWorld, stops: u32) {
    assert_eq!(world.plan().result.summary.stops, stops);
}

#[then("each leg uses the fallback distance")]
fn then_fallback_legs(world: &PlannerWorld) {
    let plan = world.plan();
    assert_eq!(plan.route.start_to_pickup_miles, FALLBACK_DISTANCE_MILES);
    assert_eq!(plan.route.pickup_to_dropoff_miles, FALLBACK_DISTANCE_MILES);
}

#[then("the summary flags estimated legs")]
fn then_estimated(world: &PlannerWorld) {
    assert!(world.plan().result.summary.estimated_legs);
}

#[then("every day is fully tiled within the duty budget")]
fn then_invariants(world: &PlannerWorld) {
    let plan = world.plan();
    assert_eq!(check_days_tile(&plan.entries), Ok(()));
    assert_eq!(check_duty_budget(&plan.entries, budget_minutes()), Ok(()));
    assert_eq!(check_mileage(&plan.entries, plan.route.total_miles), Ok(()));
}

#[then("the stops are serviced in milestone order")]
fn then_stop_order(world: &PlannerWorld) {
    let plan = world.plan();
    assert_eq!(check_stop_order(&plan.entries, &plan.milestones), Ok(()));
}

#[then("the store holds a single plan for the trip")]
fn then_single_plan(world: &PlannerWorld) {
    let id = world.stored_id();
    let store = world.store.borrow();
    let entries = store.log_entries(id).expect("entries");
    assert_eq!(entries.len(), *world.entries_after_first_plan.borrow());
    assert_eq!(check_days_tile(&entries), Ok(()));
    let trip = store.trip(id).expect("lookup").expect("trip exists");
    assert!(trip.route_result.is_some());
}

#[scenario(path = "tests/features/trip_planner.feature", index = 0)]
fn short_direct_trip(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 1)]
fn long_trip_with_pickup(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 2)]
fn failing_distance_lookups(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 3)]
fn replanning_replaces_log(world: PlannerWorld) {
    let _ = world;
}
