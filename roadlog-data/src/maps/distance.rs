//! `DistanceProvider` backed by the Distance Matrix API.

use std::sync::Arc;

use log::debug;
use roadlog_core::{DistanceProvider, LookupError};

use super::client::MapsClient;
use super::config::{HttpCollaboratorConfig, ProviderBuildError};
use super::google::{DistanceMatrixResponse, ensure_ok};

/// Driving distance between two place descriptors, in miles.
///
/// Requests use imperial units and read the first element of the first
/// row. Without an API key every lookup returns
/// [`LookupError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct HttpDistanceProvider {
    client: Arc<MapsClient>,
}

impl HttpDistanceProvider {
    /// Create a provider with its own HTTP client and runtime.
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

    fn convert_response(response: &DistanceMatrixResponse, query: &str) -> Result<f64, LookupError> {
        ensure_ok(&response.status, response.error_message.as_deref(), query)?;
        let element = response
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| LookupError::ParseError {
                message: "distance matrix response has no elements".to_owned(),
            })?;
        ensure_ok(&element.status, None, query)?;
        let distance = element
            .distance
            .as_ref()
            .ok_or_else(|| LookupError::ParseError {
                message: "distance matrix element has no distance".to_owned(),
            })?;
        Ok(distance.miles())
    }
}

impl DistanceProvider for HttpDistanceProvider {
    fn distance_miles(&self, origin: &str, destination: &str) -> Result<f64, LookupError> {
        let from = origin.trim();
        let to = destination.trim();
        if from.is_empty() || to.is_empty() {
            return Err(LookupError::EmptyLocation);
        }
        if !self.client.is_configured() {
            return Err(LookupError::NotConfigured);
        }
        let url = self.client.endpoint(
            "distancematrix",
            &[("origins", from), ("destinations", to), ("units", "imperial")],
        )?;
        let response: DistanceMatrixResponse = self.client.get_json(url)?;
        let miles = Self::convert_response(&response, &format!("{from} to {to}"))?;
        debug!("distance matrix: {from} to {to} is {miles:.1} miles");
        Ok(miles)
    }
}
