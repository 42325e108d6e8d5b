//! Resolved version types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of Git reference a label resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A branch; versions are short commit hashes
    Branch,
    /// A tag; versions are the tag label
    Tag,
}

impl ReferenceKind {
    /// Path segment used in archive URLs (`refs/heads` or `refs/tags`)
    pub fn archive_segment(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => "heads",
            ReferenceKind::Tag => "tags",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Branch => write!(f, "branch"),
            ReferenceKind::Tag => write!(f, "tag"),
        }
    }
}

/// How the component is laid out inside the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentLayout {
    /// The repository has its own `custom_components/<domain>` directory
    SharedDirectory,
    /// The repository root is the component (manifest.json at the root)
    RootManifest,
}

/// Result of resolving one repository reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVersion {
    /// Repository identifier in `owner/repo` form
    pub name: String,
    /// Branch or tag
    pub reference_kind: ReferenceKind,
    /// Short commit hash for branches, tag label for tags
    pub version_id: String,
    /// Location of the zip archive for this exact branch/tag
    pub archive_url: String,
    /// Directory name of the installable component
    pub component_domain: String,
    /// Repository layout the component was found in
    pub layout: ComponentLayout,
    /// Local directory the archive contents are re-rooted under
    pub install_root: PathBuf,
}
