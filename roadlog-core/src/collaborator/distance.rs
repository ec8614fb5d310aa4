//! Point-to-point mileage lookups.

use log::{debug, warn};

use super::error::LookupError;

/// Mileage assumed for a leg whose lookup failed.
pub const FALLBACK_DISTANCE_MILES: f64 = 50.0;

/// Look up the driving distance between two location descriptors.
///
/// Implementations return miles as a finite, non-negative value. They must
/// not mutate planner state; the planner may call them any number of times.
///
/// # Examples
///
/// ```rust
/// use roadlog_core::{DistanceProvider, FallbackDistance, LookupError};
///
/// struct Flat;
///
/// impl DistanceProvider for Flat {
///     fn distance_miles(&self, _origin: &str, _destination: &str) -> Result<f64, LookupError> {
///         Ok(120.0)
///     }
/// }
///
/// let lookup = FallbackDistance::new(Flat).lookup("Reno, NV", "Elko, NV");
/// assert_eq!(lookup.miles, 120.0);
/// assert!(!lookup.fallback);
/// ```
pub trait DistanceProvider {
    /// Return the driving distance in miles from `origin` to `destination`.
    fn distance_miles(&self, origin: &str, destination: &str) -> Result<f64, LookupError>;
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for &T {
    fn distance_miles(&self, origin: &str, destination: &str) -> Result<f64, LookupError> {
        (**self).distance_miles(origin, destination)
    }
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for Box<T> {
    fn distance_miles(&self, origin: &str, destination: &str) -> Result<f64, LookupError> {
        (**self).distance_miles(origin, destination)
    }
}

/// Outcome of a distance lookup after applying the fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceLookup {
    /// Resolved mileage.
    pub miles: f64,
    /// Whether `miles` is the fallback rather than a measured value.
    pub fallback: bool,
}

/// Infallible wrapper that degrades every lookup failure to a fixed mileage.
#[derive(Debug, Clone)]
pub struct FallbackDistance<P> {
    provider: P,
    fallback_miles: f64,
}

impl<P: DistanceProvider> FallbackDistance<P> {
    /// Wrap `provider` using [`FALLBACK_DISTANCE_MILES`].
    pub const fn new(provider: P) -> Self {
        Self::with_fallback(provider, FALLBACK_DISTANCE_MILES)
    }

    /// Wrap `provider` with an explicit fallback mileage.
    pub const fn with_fallback(provider: P, fallback_miles: f64) -> Self {
        Self {
            provider,
            fallback_miles,
        }
    }

    /// Resolve the distance, falling back on any error or invalid value.
    pub fn lookup(&self, origin: &str, destination: &str) -> DistanceLookup {
        let measured = self
            .provider
            .distance_miles(origin, destination)
            .and_then(|miles| {
                if miles.is_finite() && miles >= 0.0 {
                    Ok(miles)
                } else {
                    Err(LookupError::ParseError {
                        message: format!("distance {miles} is not a valid mileage"),
                    })
                }
            });
        match measured {
            Ok(miles) => DistanceLookup {
                miles,
                fallback: false,
            },
            Err(LookupError::NotConfigured) => {
                debug!("distance lookup not configured; assuming {} miles", self.fallback_miles);
                self.fallback()
            }
            Err(err) => {
                warn!(
                    "distance lookup {origin:?} -> {destination:?} failed ({err}); assuming {} miles",
                    self.fallback_miles
                );
                self.fallback()
            }
        }
    }

    const fn fallback(&self) -> DistanceLookup {
        DistanceLookup {
            miles: self.fallback_miles,
            fallback: true,
        }
    }
}
