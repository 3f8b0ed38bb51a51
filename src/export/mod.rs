//! Download exports of a (filtered) [`crate::types::ProjectTable`].
//!
//! Both formats serialize exactly the columns and rows of the table passed in; an empty table
//! produces a header-only file.

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use crate::error::ExportResult;
use crate::types::ProjectTable;

pub use self::csv::to_csv_bytes;
pub use self::xlsx::{to_xlsx_bytes, SHEET_NAME};

/// Download name of the CSV export.
pub const CSV_FILE_NAME: &str = "proyectos_emcali.csv";
/// Download name of the spreadsheet export.
pub const XLSX_FILE_NAME: &str = "proyectos_emcali.xlsx";

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Xlsx, ExportFormat::Csv];

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_FILE_NAME,
            ExportFormat::Xlsx => XLSX_FILE_NAME,
        }
    }

    /// MIME type served with the download.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => "application/vnd.ms-excel",
        }
    }

    /// Serialize `table` in this format.
    pub fn to_bytes(self, table: &ProjectTable) -> ExportResult<Vec<u8>> {
        match self {
            ExportFormat::Csv => to_csv_bytes(table),
            ExportFormat::Xlsx => to_xlsx_bytes(table),
        }
    }
}

/// Write both exports of `table` into `dir` under their download names.
///
/// Returns the written paths, spreadsheet first.
pub fn write_exports(table: &ProjectTable, dir: impl AsRef<Path>) -> ExportResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(ExportFormat::ALL.len());
    for format in ExportFormat::ALL {
        let path = dir.join(format.file_name());
        std::fs::write(&path, format.to_bytes(table)?)?;
        log::info!("wrote {} rows to {}", table.row_count(), path.display());
        written.push(path);
    }
    Ok(written)
}
