//! Response types for the Google Maps Distance Matrix, Directions and
//! Geocoding web services.
//!
//! Each response carries a top-level `status`; anything other than `"OK"`
//! is converted into a [`LookupError`] by [`ensure_ok`].
//!
//! See: <https://developers.google.com/maps/documentation/distance-matrix>

use std::sync::LazyLock;

use regex::Regex;
use roadlog_core::LookupError;
use serde::Deserialize;

/// Meters per mile used when walking direction steps.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Status reported by a successful request.
const STATUS_OK: &str = "OK";

/// Status reported when the query matched nothing.
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// A "City, ST" fragment inside a formatted address.
static CITY_STATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([^,]+),\s*([A-Z]{2})").ok());

/// Turn a service status into a result.
pub fn ensure_ok(status: &str, error_message: Option<&str>, query: &str) -> Result<(), LookupError> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_ZERO_RESULTS | "NOT_FOUND" => Err(LookupError::NoResult {
            query: query.to_owned(),
        }),
        _ => Err(LookupError::ServiceError {
            code: status.to_owned(),
            message: error_message.unwrap_or_default().to_owned(),
        }),
    }
}

/// Distance Matrix API response.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Request status, `"OK"` on success.
    pub status: String,
    /// Error detail when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

/// Distance Matrix row: one element per destination.
#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    /// Origin/destination pairs.
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

/// Distance Matrix element for a single origin/destination pair.
#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    /// Element status, `"OK"` when a route was found.
    pub status: String,
    /// Route distance when `status` is `"OK"`.
    pub distance: Option<TextValue>,
}

/// Display text paired with its value in SI units.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Localised text such as `"1,234 mi"`.
    pub text: String,
    /// Value in meters.
    pub value: f64,
}

impl TextValue {
    /// Miles from the display text, or from the meter value when the text is
    /// not in miles.
    #[must_use]
    pub fn miles(&self) -> f64 {
        self.text
            .trim()
            .strip_suffix("mi")
            .and_then(|number| number.trim().replace(',', "").parse::<f64>().ok())
            .unwrap_or(self.value / METERS_PER_MILE)
    }
}

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Request status, `"OK"` on success.
    pub status: String,
    /// Error detail when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

impl DirectionsResponse {
    /// Steps of the first leg of the first route.
    #[must_use]
    pub fn first_leg_steps(&self) -> Option<&[DirectionsStep]> {
        self.routes
            .first()
            .and_then(|route| route.legs.first())
            .map(|leg| leg.steps.as_slice())
    }
}

/// A single route.
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// One leg per waypoint pair.
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

/// A leg between two waypoints.
#[derive(Debug, Deserialize)]
pub struct DirectionsLeg {
    /// Turn-by-turn steps.
    #[serde(default)]
    pub steps: Vec<DirectionsStep>,
}

/// A single navigation step.
#[derive(Debug, Deserialize)]
pub struct DirectionsStep {
    /// Step length.
    pub distance: StepDistance,
    /// Where the step ends.
    pub end_location: LatLng,
}

/// Step length in meters.
#[derive(Debug, Deserialize)]
pub struct StepDistance {
    /// Meters.
    pub value: f64,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Format as the `latlng` query value.
    #[must_use]
    pub fn query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Geocoding API response, for both forward and reverse lookups.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Request status, `"OK"` on success.
    pub status: String,
    /// Error detail when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Matches, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// A single geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Structured address parts.
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    /// Full human-readable address.
    #[serde(default)]
    pub formatted_address: String,
}

/// One part of a structured address.
#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    /// Full name, e.g. `"Illinois"`.
    pub long_name: String,
    /// Abbreviated name, e.g. `"IL"`.
    pub short_name: String,
    /// Component types such as `"locality"`.
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

impl GeocodeResult {
    /// Short "City, ST" label for the match.
    ///
    /// Uses the locality and state components when both are present, then a
    /// "City, ST" fragment of the formatted address, then the formatted
    /// address as is.
    #[must_use]
    pub fn city_state(&self) -> String {
        let city = self
            .address_components
            .iter()
            .rfind(|c| c.has_type("locality"))
            .map(|c| c.long_name.as_str());
        let state = self
            .address_components
            .iter()
            .rfind(|c| c.has_type("administrative_area_level_1"))
            .map(|c| c.short_name.as_str());
        if let (Some(city_name), Some(state_code)) = (city, state) {
            if !city_name.is_empty() && !state_code.is_empty() {
                return format!("{city_name}, {state_code}");
            }
        }
        CITY_STATE
            .as_ref()
            .and_then(|pattern| pattern.captures(&self.formatted_address))
            .and_then(|caps| {
                let city_name = caps.get(1)?.as_str().trim();
                let state_code = caps.get(2)?.as_str();
                Some(format!("{city_name}, {state_code}"))
            })
            .unwrap_or_else(|| self.formatted_address.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn deserialise_distance_matrix_response() {
        let json = r#"{
            "status": "OK",
            "origin_addresses": ["Chicago, IL, USA"],
            "destination_addresses": ["Joliet, IL, USA"],
            "rows": [{"elements": [{
                "status": "OK",
                "distance": {"text": "1,234.5 mi", "value": 1986760},
                "duration": {"text": "18 hours", "value": 64800}
            }]}]
        }"#;

        let response: DistanceMatrixResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(response.status, "OK");
        let element = &response.rows[0].elements[0];
        assert_eq!(element.status, "OK");
        let distance = element.distance.as_ref().expect("distance");
        assert_eq!(distance.miles(), 1234.5);
    }

    #[rstest]
    #[case("50.2 mi", 0.0, 50.2)]
    #[case("12 mi", 0.0, 12.0)]
    #[case("850 ft", 3218.68, 2.0)]
    fn text_value_prefers_miles_text(#[case] text: &str, #[case] value: f64, #[case] miles: f64) {
        let distance = TextValue {
            text: text.to_owned(),
            value,
        };
        assert!((distance.miles() - miles).abs() < 1e-9);
    }

    #[rstest]
    fn deserialise_error_response() {
        let json = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "rows": []
        }"#;

        let response: DistanceMatrixResponse = serde_json::from_str(json).expect("should deserialise");
        let err = ensure_ok(&response.status, response.error_message.as_deref(), "A to B")
            .expect_err("denied");

        assert_eq!(
            err,
            LookupError::ServiceError {
                code: "REQUEST_DENIED".to_owned(),
                message: "The provided API key is invalid.".to_owned(),
            }
        );
    }

    #[rstest]
    fn zero_results_is_no_result() {
        let err = ensure_ok("ZERO_RESULTS", None, "Atlantis").expect_err("nothing found");
        assert_eq!(
            err,
            LookupError::NoResult {
                query: "Atlantis".to_owned()
            }
        );
    }

    #[rstest]
    fn deserialise_directions_response() {
        let json = r#"{
            "status": "OK",
            "routes": [{"legs": [{"steps": [
                {"distance": {"text": "10 mi", "value": 16093}, "end_location": {"lat": 41.5, "lng": -87.9}},
                {"distance": {"text": "20 mi", "value": 32187}, "end_location": {"lat": 41.52, "lng": -88.08}}
            ]}]}]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");
        let steps = response.first_leg_steps().expect("steps");

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].end_location.query(), "41.52,-88.08");
    }

    fn component(long_name: &str, short_name: &str, kind: &str) -> AddressComponent {
        AddressComponent {
            long_name: long_name.to_owned(),
            short_name: short_name.to_owned(),
            types: vec![kind.to_owned(), "political".to_owned()],
        }
    }

    #[rstest]
    fn city_state_uses_address_components() {
        let result = GeocodeResult {
            address_components: vec![
                component("Joliet", "Joliet", "locality"),
                component("Will County", "Will County", "administrative_area_level_2"),
                component("Illinois", "IL", "administrative_area_level_1"),
            ],
            formatted_address: "Joliet, IL, USA".to_owned(),
        };
        assert_eq!(result.city_state(), "Joliet, IL");
    }

    #[rstest]
    #[case("I-80, Joliet, IL 60431, USA", "Joliet, IL")]
    #[case("Rural Route 9, Tulsa, OK 74101, USA", "Tulsa, OK")]
    #[case("Somewhere remote", "Somewhere remote")]
    fn city_state_falls_back_to_formatted_address(#[case] formatted: &str, #[case] expected: &str) {
        let result = GeocodeResult {
            address_components: vec![component("Illinois", "IL", "administrative_area_level_1")],
            formatted_address: formatted.to_owned(),
        };
        assert_eq!(result.city_state(), expected);
    }
}
