use log::{error, info};
use rocket::fairing::AdHoc;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::config::Config;
use crate::models::ApprovalStatus;

/// Persisted as a JSON object from stringified review id to boolean.
pub type ApprovalMap = BTreeMap<i64, bool>;

pub fn init() -> AdHoc {
    AdHoc::on_ignite("Approval store", |rocket| async {
        let path = Config::approvals_file();
        match ApprovalStore::open(&path) {
            Ok(store) => {
                info!("✓ Approval store ready at {}", path.display());
                rocket.manage(store)
            }
            Err(e) => {
                error!("✗ Failed to initialize approval store at {}: {}", path.display(), e);
                rocket
            }
        }
    })
}

/// Single source of truth for which reviews a manager has approved for
/// public display. One small JSON file; every operation is a point
/// read or a read-modify-write of the whole map.
pub struct ApprovalStore {
    path: PathBuf,
    // Serializes read-modify-write cycles between in-process callers.
    write_lock: Mutex<()>,
}

impl ApprovalStore {
    /// Opens the store, creating the data directory and an empty `{}` file
    /// when absent. Idempotent, runs on every startup.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        if !path.exists() {
            fs::write(&path, "{}")?;
        }
        Ok(ApprovalStore {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Current persisted state. An unreadable or corrupt file reads as an
    /// empty map, i.e. every review unapproved.
    pub fn get_all(&self) -> ApprovalMap {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    error!("Approvals file {} is corrupt: {}", self.path.display(), e);
                    ApprovalMap::new()
                }
            },
            Err(e) => {
                error!("Error reading approvals file {}: {}", self.path.display(), e);
                ApprovalMap::new()
            }
        }
    }

    /// `false` for any id the map has never seen.
    pub fn get_status(&self, review_id: i64) -> bool {
        self.get_all().get(&review_id).copied().unwrap_or(false)
    }

    /// Single-id update. Unlike reads, a failed write propagates: silently
    /// dropping an approval would be worse than treating it as unapproved.
    pub fn set_status(&self, review_id: i64, approved: bool) -> io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut approvals = self.get_all();
        approvals.insert(review_id, approved);
        self.write(&approvals)
    }

    /// Applies the whole batch inside one read-modify-write cycle, so either
    /// every update lands or none do.
    pub fn bulk_set(&self, updates: &[ApprovalStatus]) -> io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut approvals = self.get_all();
        for update in updates {
            approvals.insert(update.review_id, update.approved);
        }
        self.write(&approvals)
    }

    fn write(&self, approvals: &ApprovalMap) -> io::Result<()> {
        let body = serde_json::to_string_pretty(approvals).map_err(io::Error::other)?;
        fs::write(&self.path, body)
    }
}
