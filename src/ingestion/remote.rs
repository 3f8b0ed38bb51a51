//! Remote spreadsheet source: URL construction and HTTP fetch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DataUnavailable, LoadResult};
use crate::types::ProjectTable;

use super::csv::load_csv_from_bytes;

/// Spreadsheet holding the project portfolio.
pub const DEFAULT_SHEET_ID: &str = "1TwBj1Pj8XIXuwoTA94nTJ7G8vLJ-Xll-vVD1bQlanLs";

/// Worksheet with the general project data.
pub const DEFAULT_SHEET_NAME: &str = "datos_generales";

/// A published spreadsheet worksheet, exported as CSV through the gviz endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSource {
    pub sheet_id: String,
    pub sheet_name: String,
}

impl Default for SheetSource {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl SheetSource {
    /// CSV export URL for this worksheet.
    pub fn csv_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.sheet_id,
            urlencoding::encode(&self.sheet_name)
        )
    }
}

/// GET `url` and return the response body.
///
/// Transport failures (including hitting `timeout`) map to [`DataUnavailable::Http`]; a
/// non-2xx answer maps to [`DataUnavailable::Status`].
pub fn fetch_csv(url: &str, timeout: Duration) -> LoadResult<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?;

    log::debug!("fetching {url} (timeout {timeout:?})");
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(DataUnavailable::Status {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.bytes()?;
    log::debug!("received {} bytes from {url}", body.len());
    Ok(body.to_vec())
}

/// Fetch `url` and parse the body as a project table.
pub fn load_csv_from_url(url: &str, timeout: Duration) -> LoadResult<ProjectTable> {
    let body = fetch_csv(url, timeout)?;
    load_csv_from_bytes(&body)
}
