//! Shared, time-bounded cache of the loaded project table.
//!
//! A [`SnapshotCache`] is an explicit value: create one per process (or per test) and pass it to
//! whatever serves sessions. Readers get an `Arc<Snapshot>` and never block each other; a
//! refresh builds the new table off to the side and swaps the `Arc` in one step, so in-flight
//! readers keep the snapshot they already hold.

use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use crate::ingestion::{load_or_empty, LoadOptions, TableSource};
use crate::types::ProjectTable;

/// Immutable point-in-time copy of the loaded table.
#[derive(Debug)]
pub struct Snapshot {
    table: Arc<ProjectTable>,
    loaded_at: Instant,
    warning: Option<String>,
}

impl Snapshot {
    pub fn new(table: ProjectTable, warning: Option<String>) -> Self {
        Self {
            table: Arc::new(table),
            loaded_at: Instant::now(),
            warning,
        }
    }

    pub fn table(&self) -> &ProjectTable {
        &self.table
    }

    /// User-facing warning when this snapshot stands in for a failed load.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn age(&self) -> Duration {
        self.loaded_at.elapsed()
    }
}

/// Cache holding at most one [`Snapshot`], valid for `ttl` after it was loaded.
///
/// Failed loads are cached too (as an empty table with a warning) for the same window; use
/// [`SnapshotCache::invalidate`] or [`SnapshotCache::refresh`] for a manual reload.
#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    current: RwLock<Option<Arc<Snapshot>>>,
    // Serializes fetches so a window sees at most one.
    load_lock: Mutex<()>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot if one is cached and still fresh.
    pub fn peek(&self) -> Option<Arc<Snapshot>> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().filter(|s| s.age() < self.ttl).cloned()
    }

    /// Return the cached snapshot, loading from `source` if absent or expired.
    pub fn get_or_load(&self, source: &dyn TableSource, options: &LoadOptions) -> Arc<Snapshot> {
        if let Some(snap) = self.peek() {
            return snap;
        }

        let _loading = self.load_lock.lock().unwrap_or_else(|e| e.into_inner());
        // Another caller may have published while we waited for the lock.
        if let Some(snap) = self.peek() {
            return snap;
        }
        self.load_and_publish(source, options)
    }

    /// Load from `source` unconditionally and publish the result.
    pub fn refresh(&self, source: &dyn TableSource, options: &LoadOptions) -> Arc<Snapshot> {
        let _loading = self.load_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load_and_publish(source, options)
    }

    /// Drop the cached snapshot; the next [`SnapshotCache::get_or_load`] fetches again.
    pub fn invalidate(&self) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        if guard.take().is_some() {
            log::debug!("snapshot invalidated");
        }
    }

    fn load_and_publish(&self, source: &dyn TableSource, options: &LoadOptions) -> Arc<Snapshot> {
        let outcome = load_or_empty(source, options);
        let snap = Arc::new(Snapshot::new(outcome.table, outcome.warning));
        log::info!(
            "published snapshot of {} rows from {}{}",
            snap.table().row_count(),
            source.describe(),
            if snap.warning().is_some() { " (degraded)" } else { "" }
        );

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::clone(&snap));
        snap
    }
}
