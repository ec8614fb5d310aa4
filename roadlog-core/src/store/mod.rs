//! Persistence of trips and their duty-status logs.
//!
//! The [`TripStore`] trait records submitted trips and the plan attached to
//! each of them. Plans are written through [`TripStore::replace_plan`], which
//! swaps a trip's log entries and route result as one unit: planning the same
//! trip twice leaves exactly one plan behind.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{LogEntry, RouteResult, Trip, TripDraft, TripId, TripValidationError};

mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::MemoryTripStore;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteTripStore, SqliteTripStoreError};

/// Errors raised by [`TripStore`] implementations.
#[derive(Debug, Error)]
pub enum TripStoreError {
    /// The submitted trip failed validation.
    #[error("invalid trip: {0}")]
    InvalidTrip(#[from] TripValidationError),
    /// No trip exists with the given identifier.
    #[error("trip {id} does not exist")]
    UnknownTrip {
        /// Requested identifier.
        id: TripId,
    },
    /// A log entry handed to [`TripStore::replace_plan`] belongs to another trip.
    #[error("log entry for trip {entry_trip} cannot be stored against trip {trip}")]
    MismatchedEntry {
        /// Trip being written.
        trip: TripId,
        /// Trip named by the offending entry.
        entry_trip: TripId,
    },
    /// The storage backend failed.
    #[error("trip store backend failed: {source}")]
    Backend {
        /// Backend-specific failure.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl TripStoreError {
    /// Wrap a backend failure.
    pub fn backend(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend {
            source: Box::new(source),
        }
    }
}

/// Storage for trips and their plans.
///
/// # Examples
///
/// ```rust
/// use roadlog_core::{MemoryTripStore, TripDraft, TripStore};
///
/// # fn main() -> Result<(), roadlog_core::TripStoreError> {
/// let mut store = MemoryTripStore::default();
/// let trip = store.insert_trip(TripDraft::new("Reno, NV", "Elko, NV"))?;
/// assert_eq!(store.trip(trip.id)?, Some(trip.clone()));
/// assert!(store.log_entries(trip.id)?.is_empty());
/// # Ok(())
/// # }
/// ```
pub trait TripStore {
    /// Validate and persist a new trip, assigning it an identifier.
    fn insert_trip(&mut self, draft: TripDraft) -> Result<Trip, TripStoreError>;

    /// Fetch a trip, including its route result once planned.
    fn trip(&self, id: TripId) -> Result<Option<Trip>, TripStoreError>;

    /// Return a trip's log entries ordered by `(log_date, start_time)`.
    ///
    /// Unknown trips yield [`TripStoreError::UnknownTrip`].
    fn log_entries(&self, id: TripId) -> Result<Vec<LogEntry>, TripStoreError>;

    /// Replace a trip's log entries and route result atomically.
    ///
    /// Every entry must reference `id`. On error nothing is written.
    fn replace_plan(
        &mut self,
        id: TripId,
        entries: &[LogEntry],
        result: &RouteResult,
    ) -> Result<(), TripStoreError>;
}

impl<T: TripStore + ?Sized> TripStore for &mut T {
    fn insert_trip(&mut self, draft: TripDraft) -> Result<Trip, TripStoreError> {
        (**self).insert_trip(draft)
    }

    fn trip(&self, id: TripId) -> Result<Option<Trip>, TripStoreError> {
        (**self).trip(id)
    }

    fn log_entries(&self, id: TripId) -> Result<Vec<LogEntry>, TripStoreError> {
        (**self).log_entries(id)
    }

    fn replace_plan(
        &mut self,
        id: TripId,
        entries: &[LogEntry],
        result: &RouteResult,
    ) -> Result<(), TripStoreError> {
        (**self).replace_plan(id, entries, result)
    }
}

/// Reject entries that reference a trip other than `id`.
pub(crate) fn ensure_entries_belong(id: TripId, entries: &[LogEntry]) -> Result<(), TripStoreError> {
    match entries.iter().find(|entry| entry.trip_id != id) {
        Some(entry) => Err(TripStoreError::MismatchedEntry {
            trip: id,
            entry_trip: entry.trip_id,
        }),
        None => Ok(()),
    }
}

/// Sort entries into log-sheet order.
pub(crate) fn sort_entries(entries: &mut [LogEntry]) {
    entries.sort_by_key(LogEntry::sort_key);
}
