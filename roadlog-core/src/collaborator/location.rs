//! Cumulative-mileage to place-name lookups.

use log::{debug, warn};

use super::error::LookupError;

/// Route descriptors a [`LocationNamer`] may consult.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteContext {
    /// Where the trip starts.
    pub start_location: String,
    /// Pickup point, when the trip has one.
    pub pickup_location: Option<String>,
    /// Final delivery point.
    pub dropoff_location: String,
    /// Mileage of the pickup from the trip start; zero without a pickup.
    pub start_to_pickup_miles: f64,
    /// Total route mileage.
    pub total_miles: f64,
}

impl RouteContext {
    /// Build a context for a direct start-to-dropoff route.
    pub fn direct(
        start_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        total_miles: f64,
    ) -> Self {
        Self {
            start_location: start_location.into(),
            pickup_location: None,
            dropoff_location: dropoff_location.into(),
            start_to_pickup_miles: 0.0,
            total_miles,
        }
    }
}

/// Turn a cumulative mileage along a route into a human-readable place name.
pub trait LocationNamer {
    /// Name the place `miles` from the route start.
    fn location_name(&self, miles: f64, route: &RouteContext) -> Result<String, LookupError>;
}

impl<T: LocationNamer + ?Sized> LocationNamer for &T {
    fn location_name(&self, miles: f64, route: &RouteContext) -> Result<String, LookupError> {
        (**self).location_name(miles, route)
    }
}

impl<T: LocationNamer + ?Sized> LocationNamer for Box<T> {
    fn location_name(&self, miles: f64, route: &RouteContext) -> Result<String, LookupError> {
        (**self).location_name(miles, route)
    }
}

/// Label used when no place name could be resolved.
///
/// # Examples
/// ```
/// use roadlog_core::generic_location_label;
///
/// assert_eq!(generic_location_label(412.26), "Location at 412.3 miles");
/// ```
pub fn generic_location_label(miles: f64) -> String {
    format!("Location at {miles:.1} miles")
}

/// Infallible wrapper that replaces failed or empty names with
/// [`generic_location_label`].
#[derive(Debug, Clone)]
pub struct FallbackLocationNamer<N> {
    namer: N,
}

impl<N: LocationNamer> FallbackLocationNamer<N> {
    /// Wrap `namer`.
    pub const fn new(namer: N) -> Self {
        Self { namer }
    }

    /// Resolve a place name, never failing.
    pub fn name(&self, miles: f64, route: &RouteContext) -> String {
        match self.namer.location_name(miles, route) {
            Ok(name) if !name.trim().is_empty() => name,
            Ok(_) => {
                debug!("location namer returned an empty name at {miles:.1} miles");
                generic_location_label(miles)
            }
            Err(LookupError::NotConfigured) => generic_location_label(miles),
            Err(err) => {
                warn!("location lookup at {miles:.1} miles failed: {err}");
                generic_location_label(miles)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::Unconfigured;
    use crate::test_support::{FailingLocationNamer, MileMarkerNamer};
    use rstest::{fixture, rstest};

    #[fixture]
    fn route() -> RouteContext {
        RouteContext::direct("Chicago, IL", "Denver, CO", 1003.0)
    }

    #[rstest]
    fn successful_names_pass_through(route: RouteContext) {
        let namer = FallbackLocationNamer::new(MileMarkerNamer);
        assert_eq!(namer.name(120.0, &route), "Mile 120");
    }

    #[rstest]
    #[case(0.0, "Location at 0.0 miles")]
    #[case(87.26, "Location at 87.3 miles")]
    #[case(1003.0, "Location at 1003.0 miles")]
    fn failures_use_generic_label(route: RouteContext, #[case] miles: f64, #[case] expected: &str) {
        let namer = FallbackLocationNamer::new(FailingLocationNamer);
        assert_eq!(namer.name(miles, &route), expected);
    }

    #[rstest]
    fn unconfigured_namer_uses_generic_label(route: RouteContext) {
        let namer = FallbackLocationNamer::new(Unconfigured);
        assert_eq!(namer.name(5.0, &route), "Location at 5.0 miles");
    }

    struct BlankNamer;

    impl LocationNamer for BlankNamer {
        fn location_name(&self, _miles: f64, _route: &RouteContext) -> Result<String, LookupError> {
            Ok("  ".to_owned())
        }
    }

    #[rstest]
    fn blank_names_use_generic_label(route: RouteContext) {
        let namer = FallbackLocationNamer::new(BlankNamer);
        assert_eq!(namer.name(10.0, &route), "Location at 10.0 miles");
    }
}
