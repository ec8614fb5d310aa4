//! Behavioural tests for [`HttpDistanceProvider`] and [`HttpLocationNamer`].
//!
//! A canned localhost server stands in for the Maps web services so the
//! request format, response parsing and error mapping are exercised without
//! network access.

mod support;

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use roadlog_core::{
    DistanceLookup, DistanceProvider, FALLBACK_DISTANCE_MILES, FallbackDistance,
    FallbackLocationNamer, LocationNamer, LookupError, RouteContext,
};
use roadlog_data::maps::{
    HttpCollaboratorConfig, HttpDistanceProvider, HttpLocationNamer, maps_collaborators,
};
use support::{CannedServer, Reply};

const API_KEY: &str = "secret";

const DISTANCE_BODY: &str = r#"{"status": "OK", "rows": [{"elements": [
    {"status": "OK", "distance": {"text": "1,234.5 mi", "value": 1986787}}
]}]}"#;

const CHICAGO_BODY: &str = r#"{"status": "OK", "results": [{
    "formatted_address": "Chicago, IL, USA",
    "address_components": [
        {"long_name": "Chicago", "short_name": "Chicago", "types": ["locality", "political"]},
        {"long_name": "Illinois", "short_name": "IL", "types": ["administrative_area_level_1", "political"]}
    ]
}]}"#;

const JOLIET_BODY: &str = r#"{"status": "OK", "results": [{
    "formatted_address": "I-80, Joliet, IL 60431, USA",
    "address_components": []
}]}"#;

const DIRECTIONS_BODY: &str = r#"{"status": "OK", "routes": [{"legs": [{"steps": [
    {"distance": {"text": "20 mi", "value": 32187}, "end_location": {"lat": 41.6, "lng": -87.8}},
    {"distance": {"text": "25 mi", "value": 40234}, "end_location": {"lat": 41.52, "lng": -88.08}},
    {"distance": {"text": "55 mi", "value": 88514}, "end_location": {"lat": 41.2, "lng": -89.1}}
]}]}]}"#;

#[derive(Default)]
struct MapsWorld {
    server: RefCell<Option<CannedServer>>,
    config: RefCell<Option<HttpCollaboratorConfig>>,
    distance: RefCell<Option<Result<f64, LookupError>>>,
    name: RefCell<Option<Result<String, LookupError>>>,
    fallback: RefCell<Option<(DistanceLookup, String)>>,
}

impl MapsWorld {
    fn serve(&self, routes: Vec<(&'static str, Reply)>) {
        self.server.replace(Some(CannedServer::start(routes)));
    }

    fn base_url(&self) -> String {
        self.server
            .borrow()
            .as_ref()
            .expect("server should be running")
            .base_url()
            .to_owned()
    }

    fn requests(&self) -> Vec<String> {
        self.server
            .borrow()
            .as_ref()
            .expect("server should be running")
            .requests()
    }

    fn collaborators(&self) -> (HttpDistanceProvider, HttpLocationNamer) {
        let config = self.config.borrow().clone().expect("config should be set");
        maps_collaborators(config).expect("collaborators should build")
    }

    fn distance_error(&self) -> LookupError {
        self.distance
            .borrow()
            .clone()
            .expect("distance should be requested")
            .expect_err("lookup should fail")
    }
}

#[fixture]
fn world() -> MapsWorld {
    MapsWorld::default()
}

// --- Given steps ---

#[given("a maps service reporting a distance of 1,234.5 mi")]
fn given_distance_service(world: &MapsWorld) {
    world.serve(vec![("/distancematrix/json", Reply::Json(DISTANCE_BODY.to_owned()))]);
}

#[given("a maps service failing with HTTP 500")]
fn given_failing_service(world: &MapsWorld) {
    world.serve(vec![("/", Reply::Status(500))]);
}

#[given("a maps service that never answers")]
fn given_silent_service(world: &MapsWorld) {
    world.serve(vec![("/", Reply::Hang)]);
}

#[given("a maps service geocoding every address to Chicago, IL")]
fn given_geocoding_service(world: &MapsWorld) {
    world.serve(vec![("/geocode/json", Reply::Json(CHICAGO_BODY.to_owned()))]);
}

#[given("a maps service with direction steps reverse geocoding to Joliet, IL")]
fn given_directions_service(world: &MapsWorld) {
    world.serve(vec![
        ("/directions/json", Reply::Json(DIRECTIONS_BODY.to_owned())),
        ("/geocode/json", Reply::Json(JOLIET_BODY.to_owned())),
    ]);
}

#[given("the collaborators are configured with an API key")]
fn given_api_key(world: &MapsWorld) {
    let config = HttpCollaboratorConfig::new(world.base_url()).with_api_key(API_KEY);
    world.config.replace(Some(config));
}

#[given("the collaborators are configured with an API key and a short timeout")]
fn given_short_timeout(world: &MapsWorld) {
    let config = HttpCollaboratorConfig::new(world.base_url())
        .with_api_key(API_KEY)
        .with_timeout(Duration::from_millis(200));
    world.config.replace(Some(config));
}

#[given("the collaborators have no API key")]
fn given_no_api_key(world: &MapsWorld) {
    world
        .config
        .replace(Some(HttpCollaboratorConfig::new(world.base_url())));
}

// --- When steps ---

#[when("the distance from Chicago to Los Angeles is requested")]
fn when_distance(world: &MapsWorld) {
    let (distances, _) = world.collaborators();
    let outcome = distances.distance_miles("Chicago, IL", "Los Angeles, CA");
    world.distance.replace(Some(outcome));
}

#[when("the location at the route start is requested")]
fn when_route_start(world: &MapsWorld) {
    let (_, namer) = world.collaborators();
    let route = RouteContext::direct("233 S Wacker Dr, Chicago", "Denver, CO", 1000.0);
    world.name.replace(Some(namer.location_name(0.0, &route)));
}

#[when("the location 30 miles along a 100 mile direct route is requested")]
fn when_mid_route(world: &MapsWorld) {
    let (_, namer) = world.collaborators();
    let route = RouteContext::direct("Chicago, IL", "Peoria, IL", 100.0);
    world.name.replace(Some(namer.location_name(30.0, &route)));
}

#[when("the fallback distance and name are requested")]
fn when_fallback(world: &MapsWorld) {
    let (distances, namer) = world.collaborators();
    let lookup = FallbackDistance::new(distances).lookup("Chicago, IL", "Los Angeles, CA");
    let route = RouteContext::direct("Chicago, IL", "Los Angeles, CA", 2000.0);
    let label = FallbackLocationNamer::new(namer).name(12.0, &route);
    world.fallback.replace(Some((lookup, label)));
}

// --- Then steps ---

#[then("the distance is 1234.5 miles")]
fn then_distance(world: &MapsWorld) {
    let outcome = world.distance.borrow().clone().expect("distance should be requested");
    assert_eq!(outcome, Ok(1234.5));
}

#[then("the request carried the API key and imperial units")]
fn then_request_format(world: &MapsWorld) {
    let requests = world.requests();
    assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
    let target = requests.first().expect("one request");
    assert!(target.starts_with("/distancematrix/json?"));
    assert!(target.contains("origins=Chicago%2C+IL"));
    assert!(target.contains("units=imperial"));
    assert!(target.contains("key=secret"));
}

#[then("an HTTP error is reported without the API key")]
fn then_http_error(world: &MapsWorld) {
    let err = world.distance_error();
    match &err {
        LookupError::HttpError { url, status, .. } => {
            assert_eq!(*status, 500);
            assert!(url.contains("key=REDACTED"), "unexpected url {url}");
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
    assert!(!err.to_string().contains(API_KEY));
}

#[then("a timeout error is reported")]
fn then_timeout(world: &MapsWorld) {
    let err = world.distance_error();
    assert!(
        matches!(err, LookupError::Timeout { .. }),
        "expected Timeout, got {err:?}"
    );
}

#[then("the location is named {name}")]
fn then_named(world: &MapsWorld, name: String) {
    let expected = name.trim_matches('"');
    let outcome = world.name.borrow().clone().expect("name should be requested");
    assert_eq!(outcome, Ok(expected.to_owned()));
}

#[then("the second direction step was reverse geocoded")]
fn then_reverse_geocoded(world: &MapsWorld) {
    let requests = world.requests();
    assert!(
        requests
            .iter()
            .any(|target| target.starts_with("/directions/json?origin=Chicago%2C+IL&destination=Peoria%2C+IL")),
        "missing directions request in {requests:?}"
    );
    assert!(
        requests
            .iter()
            .any(|target| target.starts_with("/geocode/json?latlng=41.52%2C-88.08")),
        "missing reverse geocode in {requests:?}"
    );
}

#[then("the fallback distance and generic label are used")]
fn then_fallbacks(world: &MapsWorld) {
    let (lookup, label) = world.fallback.borrow().clone().expect("fallback should be requested");
    assert!(lookup.fallback);
    assert_eq!(lookup.miles, FALLBACK_DISTANCE_MILES);
    assert_eq!(label, "Location at 12.0 miles");
}

#[then("no request reached the maps service")]
fn then_no_requests(world: &MapsWorld) {
    assert!(world.requests().is_empty());
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/maps_collaborators.feature", name = $title)]
        fn $fn_name(world: MapsWorld) {
            let _ = world;
        }
    };
}

register_scenario!(reading_the_distance_matrix, "Distances are read from the distance matrix");
register_scenario!(http_failures_hide_the_key, "HTTP failures never reveal the API key");
register_scenario!(silent_service_times_out, "A silent service times out");
register_scenario!(route_start_is_geocoded, "The route start is named by geocoding");
register_scenario!(mid_route_uses_directions, "Mid-route mileage is named from direction steps");
register_scenario!(unconfigured_collaborators_fall_back, "Unconfigured collaborators fall back without a request");
