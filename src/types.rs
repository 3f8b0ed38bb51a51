//! Core data model for the project portfolio.
//!
//! Loading produces an in-memory [`ProjectTable`]: a validated [`Schema`] (the source header row,
//! each header tagged with its role) and an ordered list of typed [`ProjectRecord`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DataUnavailable, LoadResult};

/// The governed columns every dataset must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    /// Owning management unit (`GERENCIAS`).
    Gerencias,
    /// Service category (`SERVICIOS`).
    Servicios,
    /// Free-text lifecycle status (`ESTADO`).
    Estado,
    /// Free-text cost classification (`CAPEX / OPEX`).
    CapexOpex,
}

impl Column {
    /// Columns whose header must be present for a load to succeed, in canonical order.
    pub const REQUIRED: [Column; 4] = [
        Column::Gerencias,
        Column::Servicios,
        Column::Estado,
        Column::CapexOpex,
    ];

    /// Columns a [`crate::processing::FilterSelection`] constrains.
    pub const FILTERABLE: [Column; 3] = [Column::Gerencias, Column::Servicios, Column::Estado];

    /// Source header name.
    pub fn header(self) -> &'static str {
        match self {
            Column::Gerencias => "GERENCIAS",
            Column::Servicios => "SERVICIOS",
            Column::Estado => "ESTADO",
            Column::CapexOpex => "CAPEX / OPEX",
        }
    }

    /// Resolve a header name (exact match) to a governed column.
    pub fn from_header(name: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|c| c.header() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// What a source column maps to inside a [`ProjectRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// One of the governed columns.
    Governed(Column),
    /// Index into [`ProjectRecord::extra`].
    Extra(usize),
}

/// A single named column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Header name, exactly as read from the source.
    pub name: String,
    /// Where the column's values live in a record.
    pub role: FieldRole,
}

/// Ordered header row of a [`ProjectTable`].
///
/// Always contains each [`Column::REQUIRED`] column exactly once; every other header is an
/// [`FieldRole::Extra`] column carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields (source order).
    pub fields: Vec<Field>,
    extra_len: usize,
}

impl Schema {
    /// Validate a header row and assign roles.
    ///
    /// The first occurrence of a required header becomes the governed column; repeated headers
    /// are kept as extra columns. Fails with [`DataUnavailable::MissingColumns`] listing every
    /// absent required header.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> LoadResult<Self> {
        let mut fields = Vec::with_capacity(headers.len());
        let mut seen: Vec<Column> = Vec::with_capacity(Column::REQUIRED.len());
        let mut extra_len = 0;

        for header in headers {
            let name = header.as_ref();
            let role = match Column::from_header(name) {
                Some(col) if !seen.contains(&col) => {
                    seen.push(col);
                    FieldRole::Governed(col)
                }
                _ => {
                    extra_len += 1;
                    FieldRole::Extra(extra_len - 1)
                }
            };
            fields.push(Field {
                name: name.to_owned(),
                role,
            });
        }

        let missing: Vec<String> = Column::REQUIRED
            .iter()
            .filter(|c| !seen.contains(*c))
            .map(|c| c.header().to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(DataUnavailable::MissingColumns {
                missing,
                headers: headers.iter().map(|h| h.as_ref().to_owned()).collect(),
            });
        }

        Ok(Self { fields, extra_len })
    }

    /// Schema with only the four required columns, in canonical order.
    pub fn required() -> Self {
        Self {
            fields: Column::REQUIRED
                .iter()
                .map(|&c| Field {
                    name: c.header().to_owned(),
                    role: FieldRole::Governed(c),
                })
                .collect(),
            extra_len: 0,
        }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of extra (non-governed) columns.
    pub fn extra_len(&self) -> usize {
        self.extra_len
    }
}

/// One project row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectRecord {
    pub gerencias: String,
    pub servicios: String,
    pub estado: String,
    pub capex_opex: String,
    /// Values of the extra columns, indexed by [`FieldRole::Extra`].
    pub extra: Vec<String>,
}

impl ProjectRecord {
    /// Create a record with only the governed columns set.
    pub fn new(
        gerencias: impl Into<String>,
        servicios: impl Into<String>,
        estado: impl Into<String>,
        capex_opex: impl Into<String>,
    ) -> Self {
        Self {
            gerencias: gerencias.into(),
            servicios: servicios.into(),
            estado: estado.into(),
            capex_opex: capex_opex.into(),
            extra: Vec::new(),
        }
    }

    /// Attach extra column values.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra = extra.into_iter().map(Into::into).collect();
        self
    }

    /// Value of a governed column.
    pub fn value(&self, column: Column) -> &str {
        match column {
            Column::Gerencias => &self.gerencias,
            Column::Servicios => &self.servicios,
            Column::Estado => &self.estado,
            Column::CapexOpex => &self.capex_opex,
        }
    }

    /// Build a record from raw cells laid out according to `schema`.
    ///
    /// Cells beyond the schema are ignored; missing cells become empty strings.
    pub fn from_cells<'a, I>(schema: &Schema, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = Self {
            extra: vec![String::new(); schema.extra_len()],
            ..Self::default()
        };
        let mut cells = cells.into_iter();
        for field in &schema.fields {
            let raw = cells.next().unwrap_or("").to_owned();
            match field.role {
                FieldRole::Governed(Column::Gerencias) => out.gerencias = raw,
                FieldRole::Governed(Column::Servicios) => out.servicios = raw,
                FieldRole::Governed(Column::Estado) => out.estado = raw,
                FieldRole::Governed(Column::CapexOpex) => out.capex_opex = raw,
                FieldRole::Extra(i) => out.extra[i] = raw,
            }
        }
        out
    }

    /// Cell values in `schema` order.
    pub fn cells<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = &'a str> + 'a {
        schema.fields.iter().map(move |f| match f.role {
            FieldRole::Governed(col) => self.value(col),
            FieldRole::Extra(i) => self.extra.get(i).map(String::as_str).unwrap_or(""),
        })
    }
}

/// In-memory project table.
///
/// Records keep source order; no deduplication or keying is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTable {
    /// Header row describing record shape.
    pub schema: Schema,
    /// Records in source order.
    pub records: Vec<ProjectRecord>,
}

impl ProjectTable {
    /// Create a table from schema and records.
    ///
    /// # Panics
    ///
    /// Panics if a record's extra column count does not match the schema.
    pub fn new(schema: Schema, records: Vec<ProjectRecord>) -> Self {
        for record in &records {
            assert!(
                record.extra.len() == schema.extra_len(),
                "record has {} extra values but schema has {} extra columns",
                record.extra.len(),
                schema.extra_len()
            );
        }
        Self { schema, records }
    }

    /// Empty table with the required headers; stands in for a failed load.
    pub fn empty() -> Self {
        Self {
            schema: Schema::required(),
            records: Vec::new(),
        }
    }

    /// Number of records.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of a governed column, in record order.
    pub fn column_values(&self, column: Column) -> impl Iterator<Item = &str> {
        self.records.iter().map(move |r| r.value(column))
    }

    /// Create a new table containing only records that match `predicate`.
    ///
    /// The returned table preserves the original schema and record order.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&ProjectRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            records,
        }
    }
}
