//! Load entrypoints.
//!
//! A [`TableSource`] knows where the project table comes from. [`load_table`] runs a source and
//! reports the outcome to an optional [`LoadObserver`]; [`load_or_empty`] additionally applies
//! the display policy: a failed load becomes an empty table plus a user-facing warning.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::LoadResult;
use crate::types::ProjectTable;

use super::csv::load_csv_from_path;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::remote::{load_csv_from_url, SheetSource};

/// Message shown to users when the dataset could not be loaded.
pub const LOAD_WARNING: &str = "No se pudieron cargar los datos. Por favor, verifica la conexión.";

/// Something that can produce a [`ProjectTable`].
pub trait TableSource: Send + Sync {
    /// Load the full table.
    fn load(&self, options: &LoadOptions) -> LoadResult<ProjectTable>;

    /// Human-readable location, used in logs and observer callbacks.
    fn describe(&self) -> String;
}

/// Published spreadsheet fetched over HTTP(S).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSheetSource {
    url: String,
}

impl HttpSheetSource {
    /// Source for a published worksheet.
    pub fn new(sheet: &SheetSource) -> Self {
        Self { url: sheet.csv_url() }
    }

    /// Source for an arbitrary CSV URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TableSource for HttpSheetSource {
    fn load(&self, options: &LoadOptions) -> LoadResult<ProjectTable> {
        load_csv_from_url(&self.url, options.timeout)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for CsvFileSource {
    fn load(&self, _options: &LoadOptions) -> LoadResult<ProjectTable> {
        load_csv_from_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Options controlling a load.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Upper bound on a remote fetch (connect + transfer).
    pub timeout: Duration,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("timeout", &self.timeout)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a table from `source`, reporting the outcome to `options.observer`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn load_table(source: &dyn TableSource, options: &LoadOptions) -> LoadResult<ProjectTable> {
    let result = source.load(options);

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            source: source.describe(),
        };
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                    columns: table.schema.fields.len(),
                },
            ),
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Result of [`load_or_empty`]: always a table, plus a warning when the load failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub table: ProjectTable,
    /// Set when the load failed and `table` is the empty stand-in.
    pub warning: Option<String>,
}

impl LoadOutcome {
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

/// Load a table, degrading any failure to an empty table plus a warning.
pub fn load_or_empty(source: &dyn TableSource, options: &LoadOptions) -> LoadOutcome {
    match load_table(source, options) {
        Ok(table) => LoadOutcome { table, warning: None },
        Err(e) => {
            // An installed observer has already reported the failure.
            if options.observer.is_none() {
                log::warn!("using empty table; {} could not be loaded: {e}", source.describe());
            }
            LoadOutcome {
                table: ProjectTable::empty(),
                warning: Some(format!("{LOAD_WARNING} ({e})")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataUnavailable;

    #[test]
    fn missing_file_degrades_to_empty_table() {
        let source = CsvFileSource::new("tests/fixtures/does_not_exist.csv");
        let outcome = load_or_empty(&source, &LoadOptions::default());

        assert!(outcome.is_degraded());
        assert_eq!(outcome.table, ProjectTable::empty());
        let warning = outcome.warning.unwrap();
        assert!(warning.starts_with(LOAD_WARNING));
        assert!(warning.contains("io error"));
    }

    #[test]
    fn load_table_propagates_error() {
        let source = CsvFileSource::new("tests/fixtures/does_not_exist.csv");
        let err = load_table(&source, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataUnavailable::Io(_)));
    }

    #[test]
    fn http_source_uses_sheet_url() {
        let source = HttpSheetSource::new(&SheetSource::default());
        assert!(source.url().contains("sheet=datos_generales"));
        assert_eq!(source.describe(), source.url());
    }
}
