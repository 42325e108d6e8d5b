//! Selective archive extraction
//!
//! Repository archives carry a single top-level directory (`repo-main/...`).
//! That directory is stripped, the remainder is re-rooted under the resolved
//! install root, and only paths inside `custom_components/<domain>` are
//! written.

use crate::config::{Installation, CUSTOM_COMPONENTS};
use crate::domain::ResolvedVersion;
use crate::error::{InstallError, IoError};
use std::ffi::OsStr;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Counters for one extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Files written
    pub files_written: usize,
    /// Directories created (or already present)
    pub dirs_created: usize,
    /// Entries ignored
    pub skipped: usize,
}

/// Where a path lands relative to the shared component directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Not under `custom_components/<domain>`
    Outside,
    /// The `custom_components` directory itself
    SharedDirectory,
    /// Inside `custom_components/<domain>`
    Component,
}

/// Strips the archive root directory from an entry name
///
/// Returns `None` for the root itself and for names that would escape the
/// target directory.
fn strip_archive_root(name: &str) -> Option<PathBuf> {
    let (_, rest) = name.split_once('/')?;

    let mut relative = PathBuf::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains(':') => return None,
            s => relative.push(s),
        }
    }
    Some(relative)
}

/// Classifies a path relative to the installation root
fn placement(relative: &Path, domain: &str) -> Placement {
    let components: Vec<&OsStr> = relative.iter().collect();
    let Some(index) = components
        .iter()
        .position(|c| *c == OsStr::new(CUSTOM_COMPONENTS))
    else {
        return Placement::Outside;
    };

    match components.get(index + 1) {
        None => Placement::SharedDirectory,
        Some(next) if *next == OsStr::new(domain) => Placement::Component,
        Some(_) => Placement::Outside,
    }
}

/// Extracts the component's files from a repository archive
pub fn extract_component(
    archive: &[u8],
    resolved: &ResolvedVersion,
    installation: &Installation,
) -> Result<ExtractStats, InstallError> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).map_err(|e| InstallError::Archive {
        url: resolved.archive_url.clone(),
        message: e.to_string(),
    })?;

    let mut stats = ExtractStats::default();
    let domain = resolved.component_domain.as_str();

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| InstallError::Archive {
            url: resolved.archive_url.clone(),
            message: e.to_string(),
        })?;
        let name = entry.name().to_string();

        let Some(stripped) = strip_archive_root(&name) else {
            if name.contains("..") {
                warn!("{}: ignoring unsafe archive entry '{}'", resolved.name, name);
            }
            stats.skipped += 1;
            continue;
        };

        let target = resolved.install_root.join(&stripped);
        let relative = target
            .strip_prefix(installation.root())
            .unwrap_or(target.as_path());

        match (entry.is_dir(), placement(relative, domain)) {
            (true, Placement::SharedDirectory | Placement::Component) => {
                fs::create_dir_all(&target).map_err(|e| IoError::write(&target, e))?;
                stats.dirs_created += 1;
            }
            (false, Placement::Component) => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(|e| IoError::write(parent, e))?;
                }
                let mut content = Vec::new();
                entry
                    .read_to_end(&mut content)
                    .map_err(|e| IoError::read(&name, e))?;
                fs::write(&target, content).map_err(|e| IoError::write(&target, e))?;
                stats.files_written += 1;
            }
            _ => stats.skipped += 1,
        }
    }

    debug!(
        "{}: wrote {} files, {} directories, skipped {} entries",
        resolved.name, stats.files_written, stats.dirs_created, stats.skipped
    );
    Ok(stats)
}
