//! Everything one dashboard render needs, computed in a single pure call.

use serde::Serialize;

use crate::processing::{filter, summarize, value_counts, CountOrder, FilterSelection, SummaryMetrics, ValueCount};
use crate::types::{Column, ProjectTable};

/// Filtered table plus the metrics and chart breakdowns derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Rows passing the selection; this is also what gets exported.
    #[serde(skip)]
    pub filtered: ProjectTable,
    pub metrics: SummaryMetrics,
    /// Bar chart: projects per status.
    pub by_estado: Vec<ValueCount>,
    /// Pie chart: projects per service.
    pub by_servicio: Vec<ValueCount>,
    /// Bar chart: projects per management unit.
    pub by_gerencia: Vec<ValueCount>,
}

impl DashboardView {
    pub fn build(table: &ProjectTable, selection: &FilterSelection) -> Self {
        let filtered = filter(table, selection);
        Self {
            metrics: summarize(&filtered),
            by_estado: value_counts(&filtered, Column::Estado, CountOrder::Descending),
            by_servicio: value_counts(&filtered, Column::Servicios, CountOrder::FirstSeen),
            by_gerencia: value_counts(&filtered, Column::Gerencias, CountOrder::Descending),
            filtered,
        }
    }
}
