//! Installed version records
//!
//! Each component keeps its installed version as a single line of text at
//! `custom_components/<domain>/version.txt`.

use crate::config::Installation;
use crate::domain::UNKNOWN_VERSION;
use crate::error::IoError;
use std::fs;

/// Reads the installed version of a component, or `-` when none is recorded
pub fn read_installed_version(installation: &Installation, domain: &str) -> String {
    let path = installation.version_record_path(domain);
    match fs::read_to_string(&path) {
        Ok(content) => {
            let version = content.trim();
            if version.is_empty() {
                UNKNOWN_VERSION.to_string()
            } else {
                version.to_string()
            }
        }
        Err(_) => UNKNOWN_VERSION.to_string(),
    }
}

/// Overwrites the installed version of a component
pub fn write_installed_version(
    installation: &Installation,
    domain: &str,
    version: &str,
) -> Result<(), IoError> {
    let dir = installation.component_dir(domain);
    fs::create_dir_all(&dir).map_err(|e| IoError::write(&dir, e))?;

    let path = installation.version_record_path(domain);
    fs::write(&path, version).map_err(|e| IoError::write(&path, e))
}
