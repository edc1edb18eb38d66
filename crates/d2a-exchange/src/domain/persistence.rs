//! # Ledger Snapshots
//!
//! Both reputation ledgers persist as `{ "version": 1, "entries": [[key, record], ...] }`.
//! A snapshot that is missing, unparseable or from another version decodes
//! to "no data".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::StoreError;

/// Current snapshot format version.
pub const LEDGER_SNAPSHOT_VERSION: u32 = 1;

/// Versioned list of `(key, record)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot<R> {
    /// Format version
    pub version: u32,
    /// Ledger entries
    pub entries: Vec<(String, R)>,
}

impl<R> LedgerSnapshot<R> {
    /// Snapshot at the current version.
    pub fn new(entries: Vec<(String, R)>) -> Self {
        Self {
            version: LEDGER_SNAPSHOT_VERSION,
            entries,
        }
    }
}

/// Decode stored entries; any corruption yields an empty list.
pub fn decode_entries<R: DeserializeOwned>(ledger: &str, raw: Option<&str>) -> Vec<(String, R)> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<LedgerSnapshot<R>>(raw) {
        Ok(snapshot) if snapshot.version == LEDGER_SNAPSHOT_VERSION => snapshot.entries,
        Ok(snapshot) => {
            warn!(
                ledger,
                found = snapshot.version,
                expected = LEDGER_SNAPSHOT_VERSION,
                "Ledger snapshot version mismatch, starting empty"
            );
            Vec::new()
        }
        Err(e) => {
            warn!(ledger, error = %e, "Ledger snapshot unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Encode entries at the current version.
pub fn encode_entries<R: Serialize>(entries: Vec<(String, R)>) -> Result<String, StoreError> {
    serde_json::to_string(&LedgerSnapshot::new(entries))
        .map_err(|e| StoreError::Serialization(e.to_string()))
}
