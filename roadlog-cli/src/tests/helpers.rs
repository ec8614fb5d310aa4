//! Test helpers for writing plan requests and stubbing collaborators.

use camino::{Utf8Path, Utf8PathBuf};
use roadlog_core::test_support::MileMarkerNamer;
use roadlog_core::Unconfigured;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{CollaboratorBuilder, Collaborators, PlanConfig};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_json(&self, name: &str, value: &Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(value).expect("serialise request");
        write_utf8(&path, &payload);
        path
    }
}

/// A direct trip of about 100 miles starting on 2 March 2026.
pub(super) fn direct_request() -> Value {
    json!({
        "trip": {
            "start_location": "Chicago, IL",
            "dropoff_location": "Peoria, IL",
            "current_cycle_hours": 0.0
        },
        "hints": {
            "distance_meters": 160_934,
            "start_date": "2026-03-02"
        }
    })
}

/// Collaborators that never touch the network.
pub(super) struct OfflineCollaboratorBuilder;

impl CollaboratorBuilder for OfflineCollaboratorBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Collaborators, CliError> {
        Ok(Collaborators {
            distances: Box::new(Unconfigured),
            namer: Box::new(MileMarkerNamer),
        })
    }
}
