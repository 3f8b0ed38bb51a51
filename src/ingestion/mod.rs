//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_or_empty`] (from [`source`]) which:
//!
//! - runs a [`TableSource`] (remote spreadsheet or local CSV file)
//! - validates the header row and parses rows into a [`crate::types::ProjectTable`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//! - degrades any failure to an empty table plus a warning
//!
//! Format-level functions are also available under:
//! - [`csv`]
//! - [`remote`]

pub mod csv;
pub mod observability;
pub mod remote;
pub mod source;

pub use observability::{CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver};
pub use remote::SheetSource;
pub use source::{
    load_or_empty, load_table, CsvFileSource, HttpSheetSource, LoadOptions, LoadOutcome, TableSource, LOAD_WARNING,
};
