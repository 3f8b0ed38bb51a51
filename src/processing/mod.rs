//! In-memory project table transformations.
//!
//! The processing layer operates on [`crate::types::ProjectTable`] values produced by loading.
//! Every function here is pure: inputs are borrowed and a new value is returned.
//!
//! Currently implemented:
//!
//! - [`filter()`]: keep records whose categorical values are all selected
//! - [`summarize()`]: headline counts (total, in execution, CAPEX, OPEX)
//! - [`value_counts()`]: per-column frequency tables for charts
//!
//! ## Example: filter → summarize
//!
//! ```rust
//! use emcali_portfolio::processing::{filter, summarize, FilterSelection};
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
//! let filtered = filter(&table, &selection);
//! let metrics = summarize(&filtered);
//!
//! assert_eq!(metrics.total, 1);
//! assert_eq!(metrics.en_ejecucion, 1);
//! assert_eq!((metrics.capex, metrics.opex), (1, 0));
//! ```

pub mod aggregate;
pub mod filter;

pub use aggregate::{summarize, value_counts, CountOrder, SummaryMetrics, ValueCount};
pub use filter::{distinct_values, filter, FilterSelection};
