use crate::crawler::PageResult;
use crate::output::{CrawlStats, OutputError, OutputResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// The structured result of one scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Seed URL exactly as given by the caller
    pub source_url: String,

    pub instructions: String,

    /// Condensed text of every relevant page
    pub summary: String,

    /// Number of relevant pages
    pub pages_found: usize,

    /// The relevant pages themselves, in result order
    pub pages: Vec<PageResult>,

    pub stats: CrawlStats,

    /// SHA-256 of the configuration file, when one was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,

    pub generated_at: DateTime<Utc>,
}

impl ScrapeReport {
    /// Writes the report as pretty-printed JSON, creating parent directories
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The report was written
    /// * `Err(OutputError)` - Serialization or the write failed
    pub fn write_report(&self, path: &Path) -> OutputResult<()> {
        if path.as_os_str().is_empty() {
            return Err(OutputError::Write("report path is empty".to_string()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!("Report saved to {}", path.display());
        Ok(())
    }

    /// Reads a report previously written by [`ScrapeReport::write_report`]
    pub fn read_report(path: &Path) -> OutputResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
