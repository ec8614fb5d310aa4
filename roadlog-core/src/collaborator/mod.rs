//! Lookups the planner consumes but does not own.
//!
//! The [`DistanceProvider`] trait abstracts point-to-point mileage and the
//! [`LocationNamer`] trait turns a cumulative mileage into a place name. Both
//! are fallible; the [`FallbackDistance`] and [`FallbackLocationNamer`]
//! wrappers convert every failure into a single documented fallback value so
//! that a schedule can always be produced.

mod distance;
mod error;
mod location;

pub use distance::{DistanceLookup, DistanceProvider, FALLBACK_DISTANCE_MILES, FallbackDistance};
pub use error::LookupError;
pub use location::{FallbackLocationNamer, LocationNamer, RouteContext, generic_location_label};

/// Collaborator used when no routing service is configured.
///
/// Every call fails with [`LookupError::NotConfigured`], so wrapped lookups
/// always yield their fallback values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl DistanceProvider for Unconfigured {
    fn distance_miles(&self, _origin: &str, _destination: &str) -> Result<f64, LookupError> {
        Err(LookupError::NotConfigured)
    }
}

impl LocationNamer for Unconfigured {
    fn location_name(&self, _miles: f64, _route: &RouteContext) -> Result<String, LookupError> {
        Err(LookupError::NotConfigured)
    }
}
