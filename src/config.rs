//! Run configuration
//!
//! Everything a run needs is carried in an explicit [`RunConfig`] value:
//! - the installation root and its well-known paths
//! - the operating mode
//! - the reference list and report cache locations
//! - the cache interval
//! - the GitHub endpoints

use crate::cli::CliArgs;
use crate::domain::{parse_references, RepositoryReference};
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File whose presence marks a directory as an installation root
pub const MARKER_FILE: &str = "configuration.yaml";

/// Shared component directory name, both locally and inside repositories
pub const CUSTOM_COMPONENTS: &str = "custom_components";

/// Per-domain installed version record file name
pub const VERSION_FILE: &str = "version.txt";

/// Default reference list file name
pub const DEFAULT_REFERENCES_FILE: &str = "ccup.txt";

/// Default report cache file name
pub const DEFAULT_CACHE_FILE: &str = "ccup.json";

/// Default cache interval (one hour)
pub const DEFAULT_INTERVAL_SECS: i64 = 60 * 60;

/// Default GitHub web base URL
pub const DEFAULT_WEB_URL: &str = "https://github.com";

/// Default raw content base URL
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

/// A local installation of the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    root: PathBuf,
}

impl Installation {
    /// Creates an installation without checking the marker file
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens an installation, requiring the marker file to exist
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let installation = Self::new(root);
        let marker = installation.root.join(MARKER_FILE);
        if !marker.exists() {
            return Err(ConfigError::marker_missing(marker));
        }
        Ok(installation)
    }

    /// Installation root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared component directory (`<root>/custom_components`)
    pub fn custom_components_dir(&self) -> PathBuf {
        self.root.join(CUSTOM_COMPONENTS)
    }

    /// Directory of one component
    pub fn component_dir(&self, domain: &str) -> PathBuf {
        self.custom_components_dir().join(domain)
    }

    /// Installed version record path for one component
    pub fn version_record_path(&self, domain: &str) -> PathBuf {
        self.component_dir(domain).join(VERSION_FILE)
    }
}

/// Base URLs used to reach GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Web UI base (pages, redirects, archives)
    pub web: String,
    /// Raw file content base
    pub raw: String,
}

impl Endpoints {
    /// Creates endpoints, dropping trailing slashes
    pub fn new(web: &str, raw: &str) -> Self {
        Self {
            web: web.trim_end_matches('/').to_string(),
            raw: raw.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_URL, DEFAULT_RAW_URL)
    }
}

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Report outdated repositories through the exit code
    #[default]
    ReportCode,
    /// Report outdated repositories as JSON
    ReportJson,
    /// Install every outdated component
    Update,
}

impl Mode {
    /// Returns true if installation was requested
    pub fn installs(&self) -> bool {
        matches!(self, Mode::Update)
    }

    /// Returns true if a cached report may stand in for network resolution
    pub fn uses_cache(&self) -> bool {
        !self.installs()
    }
}

/// Configuration for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target installation
    pub installation: Installation,
    /// Operating mode
    pub mode: Mode,
    /// Reference list file
    pub references_path: PathBuf,
    /// Report cache file
    pub cache_path: PathBuf,
    /// Cache interval in seconds (negative disables cache writes)
    pub interval_secs: i64,
    /// GitHub endpoints
    pub endpoints: Endpoints,
    /// Whether to show progress
    pub show_progress: bool,
}

impl RunConfig {
    /// Creates a configuration with default paths under the installation root
    pub fn new(installation: Installation, mode: Mode) -> Self {
        let references_path = installation.root().join(DEFAULT_REFERENCES_FILE);
        let cache_path = installation.root().join(DEFAULT_CACHE_FILE);
        Self {
            installation,
            mode,
            references_path,
            cache_path,
            interval_secs: DEFAULT_INTERVAL_SECS,
            endpoints: Endpoints::default(),
            show_progress: false,
        }
    }

    /// Builds the configuration from CLI arguments
    ///
    /// Fails with [`ConfigError::MarkerMissing`] when the target directory is
    /// not an installation root.
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let installation = Installation::open(&args.path)?;
        let mode = if args.update {
            Mode::Update
        } else if args.json {
            Mode::ReportJson
        } else {
            Mode::ReportCode
        };

        let mut config = Self::new(installation, mode);
        if let Some(ref path) = args.references {
            config.references_path = path.clone();
        }
        if let Some(ref path) = args.cache {
            config.cache_path = path.clone();
        }
        config.interval_secs = args.interval;
        config.endpoints = Endpoints::new(&args.github_url, &args.raw_url);
        config.show_progress = !args.quiet && mode != Mode::ReportJson;
        Ok(config)
    }

    /// Loads the reference list
    ///
    /// An absent list is created empty. Both an absent and an empty list end
    /// the run with [`ConfigError::NoReferencesConfigured`]. Malformed lines
    /// are skipped with a warning.
    pub fn load_references(&self) -> Result<Vec<RepositoryReference>, ConfigError> {
        let path = &self.references_path;
        if !path.exists() {
            debug!("creating empty reference list at {}", path.display());
            if let Err(e) = fs::write(path, "") {
                warn!("failed to create {}: {}", path.display(), e);
            }
            return Err(ConfigError::no_references(path));
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return Err(ConfigError::no_references(path));
            }
        };

        let (references, errors) = parse_references(&content);
        for error in errors {
            warn!("{}", error);
        }

        if references.is_empty() {
            return Err(ConfigError::no_references(path));
        }
        Ok(references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn installation_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MARKER_FILE), "").unwrap();
        dir
    }

    #[test]
    fn test_open_requires_marker() {
        let dir = TempDir::new().unwrap();
        let err = Installation::open(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MarkerMissing { .. }));

        fs::write(dir.path().join(MARKER_FILE), "").unwrap();
        assert!(Installation::open(dir.path()).is_ok());
    }

    #[test]
    fn test_installation_paths() {
        let installation = Installation::new("/ha");
        assert_eq!(
            installation.custom_components_dir(),
            PathBuf::from("/ha/custom_components")
        );
        assert_eq!(
            installation.component_dir("foo"),
            PathBuf::from("/ha/custom_components/foo")
        );
        assert_eq!(
            installation.version_record_path("foo"),
            PathBuf::from("/ha/custom_components/foo/version.txt")
        );
    }

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080/", "http://raw/");
        assert_eq!(endpoints.web, "http://127.0.0.1:8080");
        assert_eq!(endpoints.raw, "http://raw");
    }

    #[test]
    fn test_mode_flags() {
        assert!(Mode::Update.installs());
        assert!(!Mode::Update.uses_cache());
        assert!(Mode::ReportCode.uses_cache());
        assert!(Mode::ReportJson.uses_cache());
        assert_eq!(Mode::default(), Mode::ReportCode);
    }

    #[test]
    fn test_from_cli_defaults() {
        let dir = installation_dir();
        let args = CliArgs::parse_from(["ccup", dir.path().to_str().unwrap()]);
        let config = RunConfig::from_cli(&args).unwrap();

        assert_eq!(config.mode, Mode::ReportCode);
        assert_eq!(config.references_path, dir.path().join("ccup.txt"));
        assert_eq!(config.cache_path, dir.path().join("ccup.json"));
        assert_eq!(config.interval_secs, DEFAULT_INTERVAL_SECS);
        assert_eq!(config.endpoints, Endpoints::default());
        assert!(config.show_progress);
    }

    #[test]
    fn test_from_cli_modes_and_overrides() {
        let dir = installation_dir();
        let root = dir.path().to_str().unwrap();

        let args = CliArgs::parse_from(["ccup", root, "--update", "--references", "/tmp/refs.txt"]);
        let config = RunConfig::from_cli(&args).unwrap();
        assert_eq!(config.mode, Mode::Update);
        assert_eq!(config.references_path, PathBuf::from("/tmp/refs.txt"));

        let args = CliArgs::parse_from(["ccup", root, "--json", "--cache", "/tmp/c.json"]);
        let config = RunConfig::from_cli(&args).unwrap();
        assert_eq!(config.mode, Mode::ReportJson);
        assert_eq!(config.cache_path, PathBuf::from("/tmp/c.json"));
        assert!(!config.show_progress);
    }

    #[test]
    fn test_from_cli_missing_marker() {
        let dir = TempDir::new().unwrap();
        let args = CliArgs::parse_from(["ccup", dir.path().to_str().unwrap()]);
        assert!(matches!(
            RunConfig::from_cli(&args),
            Err(ConfigError::MarkerMissing { .. })
        ));
    }

    #[test]
    fn test_load_references_creates_missing_file() {
        let dir = installation_dir();
        let config = RunConfig::new(Installation::new(dir.path()), Mode::ReportCode);

        let err = config.load_references().unwrap_err();
        assert!(matches!(err, ConfigError::NoReferencesConfigured { .. }));
        assert!(config.references_path.exists());
        assert_eq!(fs::read_to_string(&config.references_path).unwrap(), "");
    }

    #[test]
    fn test_load_references_empty_file() {
        let dir = installation_dir();
        let config = RunConfig::new(Installation::new(dir.path()), Mode::ReportCode);
        fs::write(&config.references_path, "# nothing yet\n").unwrap();

        assert!(matches!(
            config.load_references(),
            Err(ConfigError::NoReferencesConfigured { .. })
        ));
    }

    #[test]
    fn test_load_references_skips_invalid_lines() {
        let dir = installation_dir();
        let config = RunConfig::new(Installation::new(dir.path()), Mode::ReportCode);
        fs::write(
            &config.references_path,
            "https://github.com/a/b\n???\nc/d v1\n",
        )
        .unwrap();

        let refs = config.load_references().unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].tree.as_deref(), Some("v1"));
    }
}
