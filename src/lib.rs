//! `emcali-portfolio` loads the EMCALI project portfolio spreadsheet into an in-memory
//! [`types::ProjectTable`], filters it by management unit, service and status, derives the
//! dashboard's headline counts and chart breakdowns, and exports the filtered rows.
//!
//! Rendering (charts, widgets, pages) is left to the caller: this crate produces the data those
//! consume.
//!
//! ## Loading
//!
//! The dataset is a published worksheet exported as CSV. Loading validates that the header row
//! carries `GERENCIAS`, `SERVICIOS`, `ESTADO` and `CAPEX / OPEX`; every other column is carried
//! through as text. Any failure (network, non-2xx status, malformed CSV, missing columns) is a
//! [`DataUnavailable`]; [`ingestion::load_or_empty`] turns it into an empty table plus a warning
//! so a dashboard can keep rendering.
//!
//! ```no_run
//! use emcali_portfolio::ingestion::{load_or_empty, HttpSheetSource, LoadOptions, SheetSource};
//!
//! let source = HttpSheetSource::new(&SheetSource::default());
//! let outcome = load_or_empty(&source, &LoadOptions::default());
//! if let Some(warning) = &outcome.warning {
//!     eprintln!("{warning}");
//! }
//! println!("rows={}", outcome.table.row_count());
//! ```
//!
//! A [`snapshot::SnapshotCache`] keeps the last load for a bounded window and can be shared
//! between sessions; readers never block each other.
//!
//! ## Filter, summarize, export
//!
//! ```rust
//! use emcali_portfolio::dashboard::DashboardView;
//! use emcali_portfolio::export::to_csv_bytes;
//! use emcali_portfolio::processing::FilterSelection;
//! use emcali_portfolio::types::{Column, ProjectRecord, ProjectTable, Schema};
//!
//! let table = ProjectTable::new(
//!     Schema::required(),
//!     vec![
//!         ProjectRecord::new("A", "X", "EN EJECUCIÓN", "CAPEX"),
//!         ProjectRecord::new("B", "Y", "CERRADO", "OPEX"),
//!     ],
//! );
//!
//! let selection = FilterSelection::all(&table).with_values(Column::Gerencias, ["A"]);
//! let view = DashboardView::build(&table, &selection);
//! assert_eq!(view.metrics.total, 1);
//! assert_eq!(view.metrics.en_ejecucion, 1);
//!
//! let csv = to_csv_bytes(&view.filtered).unwrap();
//! assert!(csv.starts_with(b"GERENCIAS,SERVICIOS,ESTADO,CAPEX / OPEX\n"));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: sources, CSV parsing, load observers, the empty-table fallback
//! - [`snapshot`]: time-bounded shared cache of the loaded table
//! - [`types`]: schema + typed records
//! - [`processing`]: filtering, summary metrics and value counts
//! - [`dashboard`]: one-call view model for a render
//! - [`export`]: CSV and `.xlsx` download bytes
//! - [`config`]: JSON-backed runtime settings
//! - [`error`]: error types

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod snapshot;
pub mod types;

pub use error::{ConfigError, DataUnavailable, ExportError, ExportResult, LoadResult};
