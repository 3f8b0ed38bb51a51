//! CSV parsing into a [`ProjectTable`].

use std::path::Path;

use crate::error::LoadResult;
use crate::types::{ProjectRecord, ProjectTable, Schema};

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Spreadsheet exports drop trailing empty cells on some rows.
    builder.has_headers(true).flexible(true);
    builder
}

/// Load a CSV file into an in-memory [`ProjectTable`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every [`crate::types::Column::REQUIRED`] column (order can differ).
/// - Every other column is carried through unchanged, as text.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> LoadResult<ProjectTable> {
    let file = std::fs::File::open(path)?;
    let mut rdr = reader_builder().from_reader(std::io::BufReader::new(file));
    load_csv_from_reader(&mut rdr)
}

/// Load CSV from an in-memory body (e.g. an HTTP response).
pub fn load_csv_from_bytes(body: &[u8]) -> LoadResult<ProjectTable> {
    let mut rdr = reader_builder().from_reader(body);
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> LoadResult<ProjectTable> {
    let headers = rdr.headers()?.clone();
    let header_names: Vec<&str> = headers.iter().collect();
    let schema = Schema::from_headers(&header_names)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(ProjectRecord::from_cells(&schema, record.iter()));
    }
    log::debug!(
        "parsed {} project rows across {} columns",
        records.len(),
        schema.fields.len()
    );

    Ok(ProjectTable::new(schema, records))
}
