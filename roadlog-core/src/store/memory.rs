//! In-process trip store.

use std::collections::BTreeMap;

use crate::{LogEntry, RouteResult, Trip, TripDraft, TripId};

use super::{TripStore, TripStoreError, ensure_entries_belong, sort_entries};

#[derive(Debug, Clone)]
struct StoredTrip {
    trip: Trip,
    entries: Vec<LogEntry>,
}

/// Trip store that keeps everything in memory.
///
/// Identifiers start at 1 and increase monotonically.
#[derive(Debug, Default, Clone)]
pub struct MemoryTripStore {
    trips: BTreeMap<TripId, StoredTrip>,
    last_id: u64,
}

impl MemoryTripStore {
    /// Number of stored trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the store holds no trips.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

impl TripStore for MemoryTripStore {
    fn insert_trip(&mut self, draft: TripDraft) -> Result<Trip, TripStoreError> {
        draft.validate()?;
        self.last_id += 1;
        let trip = Trip::new(TripId(self.last_id), draft);
        self.trips.insert(
            trip.id,
            StoredTrip {
                trip: trip.clone(),
                entries: Vec::new(),
            },
        );
        Ok(trip)
    }

    fn trip(&self, id: TripId) -> Result<Option<Trip>, TripStoreError> {
        Ok(self.trips.get(&id).map(|stored| stored.trip.clone()))
    }

    fn log_entries(&self, id: TripId) -> Result<Vec<LogEntry>, TripStoreError> {
        let stored = self
            .trips
            .get(&id)
            .ok_or(TripStoreError::UnknownTrip { id })?;
        let mut entries = stored.entries.clone();
        sort_entries(&mut entries);
        Ok(entries)
    }

    fn replace_plan(
        &mut self,
        id: TripId,
        entries: &[LogEntry],
        result: &RouteResult,
    ) -> Result<(), TripStoreError> {
        ensure_entries_belong(id, entries)?;
        let stored = self
            .trips
            .get_mut(&id)
            .ok_or(TripStoreError::UnknownTrip { id })?;
        stored.entries = entries.to_vec();
        stored.trip.route_result = Some(result.clone());
        Ok(())
    }
}
