//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Issues with the installation root or reference list
//! - NetworkError: Issues with HTTP communication
//! - ResolveError: Remote repository structure could not be interpreted
//! - InstallError: Download or extraction failures
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The installation marker file is absent
    #[error("not an installation root: {marker} not found")]
    MarkerMissing { marker: PathBuf },

    /// The reference list is absent or empty
    #[error("no repositories configured in {path}")]
    NoReferencesConfigured { path: PathBuf },

    /// A reference line could not be parsed
    #[error("invalid repository reference '{line}': expected [https://github.com/]owner/repo[ tree]")]
    InvalidReference { line: String },

    /// Invalid interval format
    #[error("invalid interval format '{value}': expected seconds or a number with s/m/h/d suffix")]
    InvalidInterval { value: String },
}

/// Errors related to HTTP communication
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Resource not found
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Non-success status code
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Request could not be completed
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },
}

/// Errors raised while interpreting a remote repository
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The latest-release lookup did not redirect
    #[error("no release redirect for {name}")]
    NoRedirect { name: String },

    /// The page showed neither a branch nor a tag indicator
    #[error("cannot classify '{label}' of {name} as branch or tag")]
    Unclassified { name: String, label: String },

    /// Branch page without a commit hash
    #[error("no commit hash found on branch '{branch}' of {name}")]
    MissingCommitHash { name: String, branch: String },

    /// Repository root page without a default branch name
    #[error("no default branch name found for {name}")]
    MissingDefaultBranch { name: String },

    /// manifest.json missing a usable domain
    #[error("invalid manifest.json in {name}: {message}")]
    InvalidManifest { name: String, message: String },

    /// Underlying network failure
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Errors raised while installing a component
#[derive(Error, Debug)]
pub enum InstallError {
    /// Archive download failed
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Archive could not be read
    #[error("invalid archive {url}: {message}")]
    Archive { url: String, message: String },

    /// Writing files failed
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file or create a directory
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a new MarkerMissing error
    pub fn marker_missing(marker: impl Into<PathBuf>) -> Self {
        ConfigError::MarkerMissing {
            marker: marker.into(),
        }
    }

    /// Creates a new NoReferencesConfigured error
    pub fn no_references(path: impl Into<PathBuf>) -> Self {
        ConfigError::NoReferencesConfigured { path: path.into() }
    }

    /// Creates a new InvalidReference error
    pub fn invalid_reference(line: impl Into<String>) -> Self {
        ConfigError::InvalidReference { line: line.into() }
    }

    /// Returns true for the conditions that end a run silently
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ConfigError::MarkerMissing { .. } | ConfigError::NoReferencesConfigured { .. }
        )
    }
}

impl NetworkError {
    /// Creates a new NotFound error
    pub fn not_found(url: impl Into<String>) -> Self {
        NetworkError::NotFound { url: url.into() }
    }

    /// Creates a new Status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        NetworkError::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a new Request error
    pub fn request(url: impl Into<String>, message: impl Into<String>) -> Self {
        NetworkError::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        NetworkError::Timeout { url: url.into() }
    }
}

impl ResolveError {
    /// Creates a new Unclassified error
    pub fn unclassified(name: impl Into<String>, label: impl Into<String>) -> Self {
        ResolveError::Unclassified {
            name: name.into(),
            label: label.into(),
        }
    }

    /// Creates a new InvalidManifest error
    pub fn invalid_manifest(name: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::InvalidManifest {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.into(),
            source,
        }
    }
}
