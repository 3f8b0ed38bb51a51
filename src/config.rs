//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) yields the production
//! setup: the published EMCALI worksheet, a 30 s fetch timeout and a one-hour cache window.
//!
//! ```rust
//! use emcali_portfolio::config::DashboardConfig;
//!
//! let cfg = DashboardConfig::from_json_str(r#"{ "timeout_secs": 5 }"#).unwrap();
//! assert_eq!(cfg.timeout_secs, 5);
//! assert_eq!(cfg.source.sheet_name, "datos_generales");
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ingestion::{HttpSheetSource, LoadObserver, LoadOptions, LoadSeverity, SheetSource};
use crate::snapshot::SnapshotCache;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Published worksheet to read.
    pub source: SheetSource,
    /// Full CSV URL; takes precedence over `source` when set.
    pub url: Option<String>,
    /// Fetch timeout in seconds.
    pub timeout_secs: u64,
    /// How long a loaded snapshot is reused, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: SheetSource::default(),
            url: None,
            timeout_secs: 30,
            cache_ttl_secs: 3_600,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// URL the loader fetches.
    pub fn csv_url(&self) -> String {
        self.url.clone().unwrap_or_else(|| self.source.csv_url())
    }

    pub fn http_source(&self) -> HttpSheetSource {
        HttpSheetSource::from_url(self.csv_url())
    }

    pub fn load_options(&self, observer: Option<Arc<dyn LoadObserver>>) -> LoadOptions {
        LoadOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            observer,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }

    pub fn snapshot_cache(&self) -> SnapshotCache {
        SnapshotCache::new(Duration::from_secs(self.cache_ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(DashboardConfig::from_json_str("{}").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn url_override_wins() {
        let cfg = DashboardConfig::from_json_str(r#"{ "url": "http://localhost:8080/p.csv" }"#).unwrap();
        assert_eq!(cfg.http_source().url(), "http://localhost:8080/p.csv");
    }

    #[test]
    fn partial_source_keeps_default_sheet_id() {
        let cfg = DashboardConfig::from_json_str(r#"{ "source": { "sheet_name": "otra" } }"#).unwrap();
        assert!(cfg.csv_url().contains("1TwBj1Pj8XIXuwoTA94nTJ7G8vLJ-Xll-vVD1bQlanLs"));
        assert!(cfg.csv_url().ends_with("sheet=otra"));
    }

    #[test]
    fn derived_settings() {
        let cfg = DashboardConfig {
            timeout_secs: 7,
            cache_ttl_secs: 60,
            ..Default::default()
        };
        assert_eq!(cfg.load_options(None).timeout, Duration::from_secs(7));
        assert_eq!(cfg.snapshot_cache().ttl(), Duration::from_secs(60));
    }

    #[test]
    fn invalid_json_is_config_error() {
        assert!(matches!(DashboardConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }
}
