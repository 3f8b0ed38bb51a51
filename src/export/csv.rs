//! CSV export.

use crate::error::ExportResult;
use crate::types::ProjectTable;

/// Serialize `table` as UTF-8 CSV: header row first, one line per record, comma-delimited,
/// fields quoted only when they contain a delimiter, quote or line break.
pub fn to_csv_bytes(table: &ProjectTable) -> ExportResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(table.schema.field_names())?;
    for record in &table.records {
        wtr.write_record(record.cells(&table.schema))?;
    }
    wtr.flush()?;

    wtr.into_inner().map_err(|e| e.into_error().into())
}
