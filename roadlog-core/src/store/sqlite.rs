//! SQLite-backed trip store.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

use crate::{DutyStatus, LogEntry, RouteResult, Trip, TripDraft, TripId};

use super::{TripStore, TripStoreError, ensure_entries_belong, sort_entries};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS trips (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_location TEXT NOT NULL,
        pickup_location TEXT,
        dropoff_location TEXT NOT NULL,
        current_cycle_hours REAL NOT NULL,
        property_carrying INTEGER NOT NULL,
        adverse_conditions INTEGER NOT NULL,
        fuel_interval_miles INTEGER NOT NULL,
        service_time_minutes INTEGER NOT NULL,
        calculated_route TEXT
    );
    CREATE TABLE IF NOT EXISTS log_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
        log_sheet_date TEXT NOT NULL,
        duty_status TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        location_text TEXT,
        distance_driven REAL NOT NULL,
        remarks TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS log_entries_by_trip
        ON log_entries (trip_id, log_sheet_date, start_time);
";

/// Errors raised while reading or writing the SQLite trip database.
#[derive(Debug, Error)]
pub enum SqliteTripStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A trip identifier does not fit SQLite's signed integer column.
    #[error("trip id {id} exceeds the SQLite integer range")]
    IdOutOfRange {
        /// Offending identifier.
        id: u64,
    },
    /// A stored column could not be decoded.
    #[error("stored {column} value {value:?} is malformed")]
    InvalidColumn {
        /// Column name.
        column: &'static str,
        /// Raw stored text.
        value: String,
    },
    /// The stored route result was not valid JSON.
    #[error("failed to decode route result for trip {id}: {source}")]
    InvalidRouteResult {
        /// Trip whose result failed to decode.
        id: TripId,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Generic SQLite error.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl From<SqliteTripStoreError> for TripStoreError {
    fn from(err: SqliteTripStoreError) -> Self {
        Self::backend(err)
    }
}

/// Trip store persisted in a SQLite database.
pub struct SqliteTripStore {
    connection: Connection,
}

impl fmt::Debug for SqliteTripStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteTripStore")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

impl SqliteTripStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteTripStoreError> {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteTripStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, SqliteTripStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteTripStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, SqliteTripStoreError> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self { connection })
    }

    fn load_trip(&self, id: TripId) -> Result<Option<Trip>, SqliteTripStoreError> {
        let key = sql_id(id)?;
        let row = self
            .connection
            .query_row(
                "SELECT start_location, pickup_location, dropoff_location, current_cycle_hours,
                        property_carrying, adverse_conditions, fuel_interval_miles,
                        service_time_minutes, calculated_route
                 FROM trips WHERE id = ?1",
                params![key],
                |row| Ok((draft_from_row(row)?, row.get::<_, Option<String>>(8)?)),
            )
            .optional()?;
        let Some((details, route_json)) = row else {
            return Ok(None);
        };
        let route_result = route_json
            .map(|json| serde_json::from_str::<RouteResult>(&json))
            .transpose()
            .map_err(|source| SqliteTripStoreError::InvalidRouteResult { id, source })?;
        Ok(Some(Trip {
            id,
            details,
            route_result,
        }))
    }

    fn trip_exists(connection: &Connection, key: i64) -> Result<bool, SqliteTripStoreError> {
        let found = connection
            .query_row("SELECT 1 FROM trips WHERE id = ?1", params![key], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn load_entries(&self, id: TripId) -> Result<Option<Vec<LogEntry>>, SqliteTripStoreError> {
        let key = sql_id(id)?;
        if !Self::trip_exists(&self.connection, key)? {
            return Ok(None);
        }
        let mut statement = self.connection.prepare(
            "SELECT log_sheet_date, duty_status, start_time, end_time, location_text,
                    distance_driven, remarks
             FROM log_entries WHERE trip_id = ?1
             ORDER BY log_sheet_date, start_time, id",
        )?;
        let mut rows = statement.query(params![key])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let date: String = row.get(0)?;
            let status: String = row.get(1)?;
            let start: String = row.get(2)?;
            let end: String = row.get(3)?;
            entries.push(LogEntry {
                trip_id: id,
                log_date: parse_date(&date)?,
                status: status
                    .parse::<DutyStatus>()
                    .map_err(|_| SqliteTripStoreError::InvalidColumn {
                        column: "duty_status",
                        value: status.clone(),
                    })?,
                start_time: parse_time("start_time", &start)?,
                end_time: parse_time("end_time", &end)?,
                location: row.get(4)?,
                distance_miles: row.get(5)?,
                remarks: row.get(6)?,
            });
        }
        sort_entries(&mut entries);
        Ok(Some(entries))
    }

    fn write_plan(
        &mut self,
        id: TripId,
        entries: &[LogEntry],
        result: &RouteResult,
    ) -> Result<bool, SqliteTripStoreError> {
        let key = sql_id(id)?;
        let route_json = serde_json::to_string(result)
            .map_err(|source| SqliteTripStoreError::InvalidRouteResult { id, source })?;
        let tx = self.connection.transaction()?;
        if !Self::trip_exists(&tx, key)? {
            return Ok(false);
        }
        tx.execute("DELETE FROM log_entries WHERE trip_id = ?1", params![key])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO log_entries (trip_id, log_sheet_date, duty_status, start_time,
                                          end_time, location_text, distance_driven, remarks)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for entry in entries {
                insert.execute(params![
                    key,
                    entry.log_date.format(DATE_FORMAT).to_string(),
                    entry.status.code(),
                    entry.start_time.format(TIME_FORMAT).to_string(),
                    entry.end_time.format(TIME_FORMAT).to_string(),
                    entry.location,
                    entry.distance_miles,
                    entry.remarks,
                ])?;
            }
        }
        tx.execute(
            "UPDATE trips SET calculated_route = ?2 WHERE id = ?1",
            params![key, route_json],
        )?;
        tx.commit()?;
        Ok(true)
    }
}

impl TripStore for SqliteTripStore {
    fn insert_trip(&mut self, draft: TripDraft) -> Result<Trip, TripStoreError> {
        draft.validate()?;
        self.connection
            .execute(
                "INSERT INTO trips (start_location, pickup_location, dropoff_location,
                                    current_cycle_hours, property_carrying, adverse_conditions,
                                    fuel_interval_miles, service_time_minutes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    draft.start_location,
                    draft.pickup_location,
                    draft.dropoff_location,
                    draft.current_cycle_hours,
                    draft.property_carrying,
                    draft.adverse_conditions,
                    draft.fuel_interval_miles,
                    draft.service_time_minutes,
                ],
            )
            .map_err(SqliteTripStoreError::from)?;
        let rowid = self.connection.last_insert_rowid();
        let id = u64::try_from(rowid).map_err(|_| SqliteTripStoreError::InvalidColumn {
            column: "id",
            value: rowid.to_string(),
        })?;
        Ok(Trip::new(TripId(id), draft))
    }

    fn trip(&self, id: TripId) -> Result<Option<Trip>, TripStoreError> {
        Ok(self.load_trip(id)?)
    }

    fn log_entries(&self, id: TripId) -> Result<Vec<LogEntry>, TripStoreError> {
        self.load_entries(id)?
            .ok_or(TripStoreError::UnknownTrip { id })
    }

    fn replace_plan(
        &mut self,
        id: TripId,
        entries: &[LogEntry],
        result: &RouteResult,
    ) -> Result<(), TripStoreError> {
        ensure_entries_belong(id, entries)?;
        if self.write_plan(id, entries, result)? {
            Ok(())
        } else {
            Err(TripStoreError::UnknownTrip { id })
        }
    }
}

fn sql_id(id: TripId) -> Result<i64, SqliteTripStoreError> {
    i64::try_from(id.0).map_err(|_| SqliteTripStoreError::IdOutOfRange { id: id.0 })
}

fn draft_from_row(row: &Row<'_>) -> rusqlite::Result<TripDraft> {
    Ok(TripDraft {
        start_location: row.get(0)?,
        pickup_location: row.get(1)?,
        dropoff_location: row.get(2)?,
        current_cycle_hours: row.get(3)?,
        property_carrying: row.get(4)?,
        adverse_conditions: row.get(5)?,
        fuel_interval_miles: row.get(6)?,
        service_time_minutes: row.get(7)?,
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, SqliteTripStoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| SqliteTripStoreError::InvalidColumn {
        column: "log_sheet_date",
        value: value.to_owned(),
    })
}

fn parse_time(column: &'static str, value: &str) -> Result<NaiveTime, SqliteTripStoreError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| SqliteTripStoreError::InvalidColumn {
        column,
        value: value.to_owned(),
    })
}
