//! Repository reference parsing
//!
//! A reference names one GitHub repository plus an optional branch or tag
//! label. References are read from a line-oriented list file:
//!
//! ```text
//! # comments and blank lines are ignored
//! https://github.com/AlexxIT/SonoffLAN
//! AlexxIT/XiaomiGateway3 v4.0.0
//! owner/repo@main
//! ```

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Pattern for a single reference line
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://github\.com/)?([A-Za-z0-9_-]+/[A-Za-z0-9_.-]+?)(?:\.git)?/?(?:(?:\s+|\s*@\s*)([A-Za-z0-9_.-]+))?$",
    )
    .unwrap()
});

/// Returns true for path segments such as `.` or `..`
fn only_dots(segment: &str) -> bool {
    segment.chars().all(|c| c == '.')
}

/// One remote component source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    /// Repository identifier in `owner/repo` form
    pub name: String,
    /// Explicit branch or tag label; `None` means latest release
    pub tree: Option<String>,
}

impl RepositoryReference {
    /// Creates a reference without validation
    pub fn new(name: impl Into<String>, tree: Option<String>) -> Self {
        Self {
            name: name.into(),
            tree,
        }
    }

    /// Parses a single reference line
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let trimmed = line.trim();
        let caps = REFERENCE_RE
            .captures(trimmed)
            .ok_or_else(|| ConfigError::invalid_reference(trimmed))?;

        let name = &caps[1];
        let tree = caps.get(2).map(|m| m.as_str());
        let repo = name.split_once('/').map_or("", |(_, repo)| repo);
        if only_dots(repo) || tree.is_some_and(only_dots) {
            return Err(ConfigError::invalid_reference(trimmed));
        }

        Ok(Self {
            name: name.to_string(),
            tree: tree.map(str::to_string),
        })
    }

    /// Returns the repository name without the owner
    pub fn repo(&self) -> &str {
        self.name.split_once('/').map_or("", |(_, repo)| repo)
    }
}

impl FromStr for RepositoryReference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tree {
            Some(tree) => write!(f, "{}@{}", self.name, tree),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parses a reference list, returning valid references and per-line errors
///
/// Blank lines and `#` comments are ignored.
pub fn parse_references(content: &str) -> (Vec<RepositoryReference>, Vec<ConfigError>) {
    let mut references = Vec::new();
    let mut errors = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match RepositoryReference::parse(line) {
            Ok(reference) => references.push(reference),
            Err(e) => errors.push(e),
        }
    }

    (references, errors)
}
