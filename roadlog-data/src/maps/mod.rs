//! HTTP collaborators backed by the Google Maps web services.
//!
//! [`HttpDistanceProvider`] asks the Distance Matrix API for the driving
//! distance between two place descriptors. [`HttpLocationNamer`] turns a
//! cumulative mileage into a "City, ST" label using the Directions and
//! Geocoding APIs.
//!
//! # Architecture
//!
//! The collaborator traits are synchronous so the planner stays embeddable
//! in synchronous contexts. Both collaborators share one client that blocks
//! on its own Tokio runtime, or on the caller's multi-threaded runtime when
//! one is already running.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use roadlog_core::DistanceProvider;
//! use roadlog_data::maps::{HttpCollaboratorConfig, maps_collaborators};
//!
//! let config = HttpCollaboratorConfig::default()
//!     .with_api_key("my-key")
//!     .with_timeout(Duration::from_secs(5));
//! let (distances, _namer) = maps_collaborators(config)?;
//! let miles = distances.distance_miles("Chicago, IL", "Joliet, IL")?;
//! println!("{miles:.1} miles");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod distance;
mod google;
mod location;

use std::sync::Arc;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpCollaboratorConfig,
    ProviderBuildError,
};
pub use distance::HttpDistanceProvider;
pub use location::HttpLocationNamer;

use client::MapsClient;

/// Build a distance provider and a location namer that share one HTTP
/// client and runtime.
///
/// # Errors
///
/// Returns [`ProviderBuildError`] when the base URL is invalid or the HTTP
/// client or runtime cannot be built.
pub fn maps_collaborators(
    config: HttpCollaboratorConfig,
) -> Result<(HttpDistanceProvider, HttpLocationNamer), ProviderBuildError> {
    let client = Arc::new(MapsClient::new(config)?);
    Ok((
        HttpDistanceProvider::from_client(Arc::clone(&client)),
        HttpLocationNamer::from_client(client),
    ))
}
