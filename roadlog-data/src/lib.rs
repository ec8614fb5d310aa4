//! Network-backed collaborators for roadlog.
//!
//! Responsibilities:
//! - Implement [`roadlog_core::DistanceProvider`] and
//!   [`roadlog_core::LocationNamer`] against a Google Maps compatible web
//!   service.
//! - Translate transport and service failures into
//!   [`roadlog_core::LookupError`] so callers can fall back.
//!
//! Boundaries:
//! - No planning rules; those live in `roadlog-planner`.
//! - No retries. A failed lookup is reported once and the caller decides.
//!
//! Invariants:
//! - Credentials never appear in error values or log output.
//! - Without an API key no request is sent.

pub mod maps;

pub use maps::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpCollaboratorConfig,
    HttpDistanceProvider, HttpLocationNamer, ProviderBuildError, maps_collaborators,
};
