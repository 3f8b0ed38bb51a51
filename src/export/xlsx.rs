//! Spreadsheet (`.xlsx`) export.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::ExportResult;
use crate::types::ProjectTable;

/// Name of the single worksheet in exported workbooks.
pub const SHEET_NAME: &str = "Proyectos";

/// Serialize `table` as an `.xlsx` workbook with one worksheet named [`SHEET_NAME`].
///
/// Row 0 holds the (bold) headers; every cell is written as a string, exactly as loaded.
pub fn to_xlsx_bytes(table: &ProjectTable) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.schema.field_names().enumerate() {
        worksheet.write_string_with_format(0, col_index(col)?, name, &header_format)?;
    }
    for (row, record) in table.records.iter().enumerate() {
        let row = row_index(row + 1)?;
        for (col, value) in record.cells(&table.schema).enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet.write_string(row, col_index(col)?, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn row_index(i: usize) -> Result<u32, XlsxError> {
    u32::try_from(i).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_index(i: usize) -> Result<u16, XlsxError> {
    u16::try_from(i).map_err(|_| XlsxError::RowColumnLimitError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_zip_container() {
        let bytes = to_xlsx_bytes(&ProjectTable::empty()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn index_conversion_rejects_overflow() {
        assert!(col_index(usize::from(u16::MAX) + 1).is_err());
        assert_eq!(row_index(3).unwrap(), 3);
    }
}
