//! Update outcome and report types
//!
//! Provides structures for tracking per-reference results and the
//! outdated-repository report consumed by callers.

use super::RepositoryReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used when no version record exists
pub const UNKNOWN_VERSION: &str = "-";

/// One repository whose available version differs from the installed one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedEntry {
    /// Repository identifier in `owner/repo` form
    pub name: String,
    /// Installed version, or `-` when unknown
    pub installed_version: String,
    /// Version available upstream
    pub available_version: String,
}

impl OutdatedEntry {
    /// Creates a new OutdatedEntry
    pub fn new(
        name: impl Into<String>,
        installed_version: impl Into<String>,
        available_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            installed_version: installed_version.into(),
            available_version: available_version.into(),
        }
    }
}

/// Collection of outdated repositories
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutdatedReport {
    /// Outdated repositories in processing order
    pub repositories: Vec<OutdatedEntry>,
}

impl OutdatedReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry
    pub fn push(&mut self, entry: OutdatedEntry) {
        self.repositories.push(entry);
    }

    /// Returns the number of outdated repositories
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Returns true if nothing is outdated
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// Result of comparing (and possibly installing) one resolved version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Installed version already matches
    UpToDate {
        /// The matching version
        version: String,
    },
    /// A different version is available and installation was not requested
    Outdated(OutdatedEntry),
    /// The new version was installed
    Installed {
        /// Version recorded before installing
        previous: String,
        /// Version now recorded
        version: String,
    },
}

impl UpdateOutcome {
    /// Returns true if the outcome is Installed
    pub fn is_installed(&self) -> bool {
        matches!(self, UpdateOutcome::Installed { .. })
    }
}

/// Reason a reference produced no outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// None of the component location rules matched
    NoComponent,
    /// Resolution or installation failed
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoComponent => write!(f, "no installable component"),
            SkipReason::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

/// Per-reference result of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceResult {
    /// The reference was resolved and compared
    Checked {
        /// The processed reference
        reference: RepositoryReference,
        /// Component domain it resolved to
        domain: String,
        /// Comparison or installation outcome
        outcome: UpdateOutcome,
    },
    /// The reference was skipped
    Skipped {
        /// The processed reference
        reference: RepositoryReference,
        /// Why it was skipped
        reason: SkipReason,
    },
}

impl ReferenceResult {
    /// Returns the reference
    pub fn reference(&self) -> &RepositoryReference {
        match self {
            ReferenceResult::Checked { reference, .. } => reference,
            ReferenceResult::Skipped { reference, .. } => reference,
        }
    }

    /// Returns the outcome for checked references
    pub fn outcome(&self) -> Option<&UpdateOutcome> {
        match self {
            ReferenceResult::Checked { outcome, .. } => Some(outcome),
            ReferenceResult::Skipped { .. } => None,
        }
    }
}
