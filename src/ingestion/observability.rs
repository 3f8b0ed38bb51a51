//! Hooks for watching spreadsheet loads.
//!
//! [`crate::ingestion::load_table`] reports every attempt to a [`LoadObserver`]: row and column
//! counts when the sheet parses, a [`LoadSeverity`] when it does not. Failures at or above
//! [`crate::ingestion::LoadOptions::alert_at_or_above`] are also raised as alerts.

use std::fmt;
use std::sync::Arc;

use crate::error::DataUnavailable;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed on bad data).
    Error,
    /// Critical error (network or other infrastructure failures).
    Critical,
}

impl LoadSeverity {
    /// Severity of a load failure.
    pub fn for_error(e: &DataUnavailable) -> Self {
        match e {
            DataUnavailable::Http(_) | DataUnavailable::Io(_) => LoadSeverity::Critical,
            DataUnavailable::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
                _ => LoadSeverity::Error,
            },
            DataUnavailable::Status { .. } | DataUnavailable::MissingColumns { .. } => LoadSeverity::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Human-readable source description (URL or path).
    pub source: String,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded rows.
    pub rows: usize,
    /// Number of columns in the header row.
    pub columns: usize,
}

/// Receives the outcome of each portfolio load.
///
/// All methods default to doing nothing, so an observer only overrides what it cares about.
pub trait LoadObserver: Send + Sync {
    /// The sheet was fetched and its header validated.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// The sheet could not be turned into a table.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &DataUnavailable) {}

    /// A failure severe enough to page someone; treated as a plain failure unless overridden.
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataUnavailable) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every load outcome to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataUnavailable) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataUnavailable) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Reports load events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            "loaded {} rows x {} columns from {}",
            stats.rows,
            stats.columns,
            ctx.source
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataUnavailable) {
        log::warn!("load failed [{severity:?}] source={} err={error}", ctx.source);
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataUnavailable) {
        log::error!("[ALERT] load failed [{severity:?}] source={} err={error}", ctx.source);
    }
}
