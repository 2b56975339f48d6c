use shared::protocol::{PartialSnapshot, PersistedSnapshot, SNAPSHOT_KEY};
use tracing::{debug, info, warn};

use crate::BlobStore;

/// Best-effort persistence of match snapshots. Nothing here ever returns an error:
/// an unreadable record loads as "no prior state" and a failed write is logged and dropped.
pub struct SnapshotStore<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> SnapshotStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SNAPSHOT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> Option<PartialSnapshot> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "snapshot: no stored record");
                return None;
            }
            Err(err) => {
                warn!(key = %self.key, "snapshot: store unavailable, starting fresh: {err:#}");
                return None;
            }
        };

        let partial = match PartialSnapshot::from_json(&raw) {
            Ok(partial) => partial,
            Err(err) => {
                warn!(key = %self.key, "snapshot: malformed record ignored: {err}");
                return None;
            }
        };

        if !partial.rejected.is_empty() {
            warn!(
                key = %self.key,
                rejected = ?partial.rejected,
                "snapshot: skipped undecodable fields"
            );
        }
        info!(key = %self.key, "snapshot: restored stored record");
        Some(partial)
    }

    pub fn save(&self, snapshot: &PersistedSnapshot) {
        let raw = match serde_json::to_string(snapshot) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = %self.key, "snapshot: failed to encode record: {err}");
                return;
            }
        };

        match self.store.set(&self.key, &raw) {
            Ok(()) => debug!(key = %self.key, bytes = raw.len(), "snapshot: saved"),
            Err(err) => warn!(key = %self.key, "snapshot: save failed, continuing: {err:#}"),
        }
    }
}
