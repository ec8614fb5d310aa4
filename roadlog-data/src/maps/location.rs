//! `LocationNamer` backed by the Directions and Geocoding APIs.

use std::sync::Arc;

use log::debug;
use roadlog_core::{LocationNamer, LookupError, RouteContext};

use super::client::MapsClient;
use super::config::{HttpCollaboratorConfig, ProviderBuildError};
use super::google::{DirectionsResponse, GeocodeResponse, LatLng, METERS_PER_MILE, ensure_ok};

/// Names the place at a cumulative mileage along a trip's route.
///
/// Mileages at or before the start name the start location, and mileages at
/// or past the route length name the dropoff; both are geocoded and fall
/// back to the descriptor as given. In between, the namer asks for
/// directions along the leg that contains the mileage (start to pickup, or
/// pickup to dropoff), finds the first step that reaches it and reverse
/// geocodes that step's end point.
#[derive(Debug, Clone)]
pub struct HttpLocationNamer {
    client: Arc<MapsClient>,
}

impl HttpLocationNamer {
    /// Create a namer with its own HTTP client and runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(config: HttpCollaboratorConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self::from_client(Arc::new(MapsClient::new(config)?)))
    }

    pub(crate) const fn from_client(client: Arc<MapsClient>) -> Self {
        Self { client }
    }

    /// "City, ST" for an endpoint, or the descriptor itself when geocoding
    /// fails.
    fn endpoint_name(&self, address: &str) -> String {
        let descriptor = address.trim();
        match self.geocode(&[("address", descriptor)], descriptor) {
            Ok(name) => name,
            Err(err) => {
                debug!("geocoding {descriptor:?} failed, using it as given: {err}");
                descriptor.to_owned()
            }
        }
    }

    fn geocode(&self, params: &[(&str, &str)], query: &str) -> Result<String, LookupError> {
        let url = self.client.endpoint("geocode", params)?;
        let response: GeocodeResponse = self.client.get_json(url)?;
        ensure_ok(&response.status, response.error_message.as_deref(), query)?;
        response
            .results
            .first()
            .map(|result| result.city_state())
            .ok_or_else(|| LookupError::NoResult {
                query: query.to_owned(),
            })
    }

    /// End point of the first direction step that reaches `miles` from
    /// `origin`.
    fn point_along(&self, origin: &str, destination: &str, miles: f64) -> Result<LatLng, LookupError> {
        let query = format!("{origin} to {destination}");
        let url = self
            .client
            .endpoint("directions", &[("origin", origin), ("destination", destination)])?;
        let response: DirectionsResponse = self.client.get_json(url)?;
        ensure_ok(&response.status, response.error_message.as_deref(), &query)?;
        let steps = response
            .first_leg_steps()
            .ok_or_else(|| LookupError::NoResult { query: query.clone() })?;
        let lengths = steps
            .iter()
            .map(|step| (step.distance.value, step.end_location));
        step_reaching(lengths, miles * METERS_PER_MILE).ok_or(LookupError::NoResult { query })
    }
}

/// End point of the first step whose cumulative length reaches `target`
/// meters.
fn step_reaching(steps: impl IntoIterator<Item = (f64, LatLng)>, target: f64) -> Option<LatLng> {
    let mut covered = 0.0;
    for (meters, end) in steps {
        if covered + meters >= target {
            return Some(end);
        }
        covered += meters;
    }
    None
}

impl LocationNamer for HttpLocationNamer {
    fn location_name(&self, miles: f64, route: &RouteContext) -> Result<String, LookupError> {
        if !self.client.is_configured() {
            return Err(LookupError::NotConfigured);
        }
        if miles <= 0.0 {
            return Ok(self.endpoint_name(&route.start_location));
        }
        if miles >= route.total_miles {
            return Ok(self.endpoint_name(&route.dropoff_location));
        }

        let start = route.start_location.trim();
        let dropoff = route.dropoff_location.trim();
        let (origin, destination, offset) = match route.pickup_location.as_deref() {
            Some(pickup) if miles <= route.start_to_pickup_miles => (start, pickup, miles),
            Some(pickup) => (pickup, dropoff, miles - route.start_to_pickup_miles),
            None => (start, dropoff, miles),
        };
        let latlng = self.point_along(origin, destination, offset)?.query();
        self.geocode(&[("latlng", latlng.as_str())], &latlng)
    }
}
