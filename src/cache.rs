//! Report cache
//!
//! The last outdated report is stored as JSON. Its modification time decides
//! freshness: a report written at `T` stands in for network resolution while
//! `T + interval` is still in the future.

use crate::domain::OutdatedReport;
use crate::error::IoError;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Cached outdated report on disk
#[derive(Debug, Clone)]
pub struct ReportCache {
    path: PathBuf,
    interval_secs: i64,
}

impl ReportCache {
    /// Create a cache handle for a file and interval
    pub fn new(path: impl Into<PathBuf>, interval_secs: i64) -> Self {
        Self {
            path: path.into(),
            interval_secs,
        }
    }

    /// Cache file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached report when it is still fresh at `now`
    ///
    /// A non-positive interval never reuses the cache. Unreadable or
    /// malformed files are treated as stale.
    pub fn load_fresh(&self, now: SystemTime) -> Option<OutdatedReport> {
        if self.interval_secs <= 0 {
            return None;
        }

        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok()?;
        // An interval beyond the representable time range never expires
        let interval = Duration::from_secs(self.interval_secs.unsigned_abs());
        let expires = modified.checked_add(interval);
        if expires.is_some_and(|expires| expires <= now) {
            debug!(
                "cache {} written {} is stale",
                self.path.display(),
                DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S")
            );
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(report) => {
                debug!(
                    "using cached report from {}",
                    DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S")
                );
                Some(report)
            }
            Err(e) => {
                warn!("ignoring malformed cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Writes the report, unless the interval is negative
    pub fn store(&self, report: &OutdatedReport) -> Result<(), IoError> {
        if self.interval_secs < 0 {
            debug!("cache writes disabled by negative interval");
            return Ok(());
        }

        let json = serde_json::to_string(report)
            .map_err(|e| IoError::write(&self.path, std::io::Error::other(e)))?;
        fs::write(&self.path, json).map_err(|e| IoError::write(&self.path, e))
    }
}
