//! Categorical filtering for [`crate::types::ProjectTable`].

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{Column, ProjectRecord, ProjectTable};

/// Allowed values per filterable column.
///
/// A record passes iff its `GERENCIAS`, `SERVICIOS` and `ESTADO` values are each members of the
/// corresponding set. An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub gerencias: BTreeSet<String>,
    pub servicios: BTreeSet<String>,
    pub estado: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection containing every distinct value present in `table` (the "show all" default).
    pub fn all(table: &ProjectTable) -> Self {
        let collect = |col: Column| -> BTreeSet<String> {
            distinct_values(table, col).into_iter().map(str::to_owned).collect()
        };
        Self {
            gerencias: collect(Column::Gerencias),
            servicios: collect(Column::Servicios),
            estado: collect(Column::Estado),
        }
    }

    /// Allowed values for a filterable column; `None` for [`Column::CapexOpex`].
    pub fn values(&self, column: Column) -> Option<&BTreeSet<String>> {
        match column {
            Column::Gerencias => Some(&self.gerencias),
            Column::Servicios => Some(&self.servicios),
            Column::Estado => Some(&self.estado),
            Column::CapexOpex => None,
        }
    }

    /// Mutable access to a filterable column's set; `None` for [`Column::CapexOpex`].
    pub fn values_mut(&mut self, column: Column) -> Option<&mut BTreeSet<String>> {
        match column {
            Column::Gerencias => Some(&mut self.gerencias),
            Column::Servicios => Some(&mut self.servicios),
            Column::Estado => Some(&mut self.estado),
            Column::CapexOpex => None,
        }
    }

    /// Replace the allowed set for `column`. Ignored for [`Column::CapexOpex`].
    pub fn with_values<I, S>(mut self, column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(set) = self.values_mut(column) {
            *set = values.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.gerencias.contains(&record.gerencias)
            && self.servicios.contains(&record.servicios)
            && self.estado.contains(&record.estado)
    }
}

/// Distinct values of `column`, in first-seen order.
pub fn distinct_values(table: &ProjectTable, column: Column) -> Vec<&str> {
    let mut seen = HashSet::new();
    table
        .column_values(column)
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Returns a new [`ProjectTable`] containing only records that pass `selection`.
///
/// Order and schema are preserved. Selected values absent from `table` have no effect.
pub fn filter(table: &ProjectTable, selection: &FilterSelection) -> ProjectTable {
    table.filter_records(|r| selection.matches(r))
}
