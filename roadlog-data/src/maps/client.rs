//! Shared HTTP client that bridges async requests to the synchronous
//! collaborator traits.

use std::future::Future;

use reqwest::Client;
use roadlog_core::LookupError;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::config::{HttpCollaboratorConfig, ProviderBuildError};

/// Query value that replaces the API key in reported URLs.
const REDACTED: &str = "REDACTED";

/// HTTP client, configuration and runtime shared by the collaborators.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, requests run on the stored
/// runtime. When called from within a multi-threaded runtime (detected via
/// [`Handle::try_current()`] and [`RuntimeFlavor::MultiThread`]), the
/// caller's handle is used with [`tokio::task::block_in_place`] to avoid
/// nested runtime panics. Inside a `current_thread` runtime the stored
/// runtime is used, which can deadlock if the caller's runtime drives IO
/// this request depends on.
pub(crate) struct MapsClient {
    client: Client,
    config: HttpCollaboratorConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl MapsClient {
    pub(crate) fn new(config: HttpCollaboratorConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Build `{base_url}/{service}/json?{params}&key={api_key}`.
    pub(crate) fn endpoint(&self, service: &str, params: &[(&str, &str)]) -> Result<Url, LookupError> {
        let key = self.config.api_key.as_deref().ok_or(LookupError::NotConfigured)?;
        let raw = format!(
            "{}/{service}/json",
            self.config.base_url.trim_end_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|err| LookupError::ParseError {
            message: format!("invalid endpoint {raw}: {err}"),
        })?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("key", key);
        Ok(url)
    }

    /// Fetch `url` and decode the JSON body, blocking the calling thread.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        self.block_on(self.fetch_json(url))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        let shown = redact(&url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &shown))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &shown))?;

        response
            .json()
            .await
            .map_err(|err| LookupError::ParseError {
                message: err.without_url().to_string(),
            })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }

    /// Convert a reqwest error to a `LookupError`, keeping the key out of
    /// the message.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> LookupError {
        if error.is_timeout() {
            return LookupError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return LookupError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.without_url().to_string(),
            };
        }

        LookupError::NetworkError {
            url: url.to_owned(),
            message: error.without_url().to_string(),
        }
    }
}

/// Render `url` with the API key replaced.
pub(crate) fn redact(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let shown = if name == "key" { REDACTED.into() } else { value };
            (name.into_owned(), shown.into_owned())
        })
        .collect();
    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
