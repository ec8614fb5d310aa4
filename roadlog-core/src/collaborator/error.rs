use thiserror::Error;

/// Errors from [`DistanceProvider`](super::DistanceProvider) and
/// [`LocationNamer`](super::LocationNamer) lookups.
///
/// URLs carried by these variants never include credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No routing service has been configured.
    #[error("no routing service is configured")]
    NotConfigured,
    /// A location descriptor was empty.
    #[error("location descriptor must not be empty")]
    EmptyLocation,
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that timed out.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Endpoint that failed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Endpoint that failed.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The service reported an application-level error status.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Status code reported by the service.
        code: String,
        /// Error detail, possibly empty.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Parse failure detail.
        message: String,
    },
    /// The service answered but had nothing for the query.
    #[error("no result for {query}")]
    NoResult {
        /// Query that produced no result.
        query: String,
    },
}
