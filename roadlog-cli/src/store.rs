//! Trip store selection for CLI commands.

use camino::Utf8Path;
use log::debug;
use roadlog_core::{MemoryTripStore, TripStore};

use crate::CliError;
use crate::fs::open_parent_dir;

/// Open the SQLite store at `db`, or an in-memory store when no path is
/// configured.
pub(crate) fn open_store(db: Option<&Utf8Path>) -> Result<Box<dyn TripStore>, CliError> {
    match db {
        None => {
            debug!("no database configured; plans are kept in memory");
            Ok(Box::new(MemoryTripStore::default()))
        }
        Some(path) => {
            open_parent_dir(path).map_err(|source| CliError::DatabaseDirectory {
                path: path.to_path_buf(),
                source,
            })?;
            open_sqlite(path)
        }
    }
}

#[cfg(feature = "store-sqlite")]
fn open_sqlite(path: &Utf8Path) -> Result<Box<dyn TripStore>, CliError> {
    let store = roadlog_core::SqliteTripStore::open(path.as_std_path()).map_err(|source| {
        CliError::OpenStore {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "store-sqlite"))]
fn open_sqlite(_path: &Utf8Path) -> Result<Box<dyn TripStore>, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "opening a trip database",
    })
}
