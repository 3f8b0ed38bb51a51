//! Summary metrics and per-column value counts for [`crate::types::ProjectTable`].

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Column, ProjectTable};

/// Status token counted as "in execution".
pub const EN_EJECUCION_TOKEN: &str = "EJECUCIÓN";
/// Cost-classification token for capital expenditure.
pub const CAPEX_TOKEN: &str = "CAPEX";
/// Cost-classification token for operating expenditure.
pub const OPEX_TOKEN: &str = "OPEX";

/// Headline counts for a table.
///
/// The three token counts are independent, case-sensitive substring tests: a `CAPEX/OPEX`
/// value counts toward both `capex` and `opex`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    /// Number of rows.
    pub total: usize,
    /// Rows whose `ESTADO` contains [`EN_EJECUCION_TOKEN`].
    pub en_ejecucion: usize,
    /// Rows whose `CAPEX / OPEX` contains [`CAPEX_TOKEN`].
    pub capex: usize,
    /// Rows whose `CAPEX / OPEX` contains [`OPEX_TOKEN`].
    pub opex: usize,
}

/// Compute [`SummaryMetrics`] for `table`.
pub fn summarize(table: &ProjectTable) -> SummaryMetrics {
    table
        .records
        .iter()
        .fold(SummaryMetrics::default(), |mut acc, r| {
            acc.total += 1;
            acc.en_ejecucion += usize::from(r.estado.contains(EN_EJECUCION_TOKEN));
            acc.capex += usize::from(r.capex_opex.contains(CAPEX_TOKEN));
            acc.opex += usize::from(r.capex_opex.contains(OPEX_TOKEN));
            acc
        })
}

/// One `(value, count)` pair of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Ordering of [`value_counts`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountOrder {
    /// Highest count first; equal counts keep first-seen order (bar charts).
    #[default]
    Descending,
    /// First-seen order (pie charts).
    FirstSeen,
}

/// Group `table` by exact value of `column` and count occurrences.
///
/// Missing (empty) cells are not a category and are left out, so the counts can sum to less
/// than the row count.
pub fn value_counts(table: &ProjectTable, column: Column, order: CountOrder) -> Vec<ValueCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<ValueCount> = Vec::new();

    for value in table.column_values(column).filter(|v| !v.is_empty()) {
        match index.get(value) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(value, out.len());
                out.push(ValueCount::new(value, 1));
            }
        }
    }

    if order == CountOrder::Descending {
        // Stable sort keeps first-seen order among ties.
        out.sort_by(|a, b| b.count.cmp(&a.count));
    }
    out
}
