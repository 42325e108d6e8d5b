//! CLI argument parsing module for ccup

use crate::config::{DEFAULT_RAW_URL, DEFAULT_WEB_URL};
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Parse interval string: plain seconds or Ns (seconds), Nm (minutes), Nh (hours), Nd (days)
///
/// A leading `-` is allowed; negative intervals disable cache writes.
pub fn parse_interval(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty interval string".to_string());
    }

    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (num_str, multiplier) = if let Some(n) = body.strip_suffix('s') {
        (n, 1)
    } else if let Some(n) = body.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = body.strip_suffix('h') {
        (n, 60 * 60)
    } else if let Some(n) = body.strip_suffix('d') {
        (n, 24 * 60 * 60)
    } else {
        (body, 1)
    };

    let invalid = || ConfigError::InvalidInterval {
        value: s.to_string(),
    }
    .to_string();

    let num: i64 = num_str
        .parse()
        .ok()
        .filter(|n: &i64| *n >= 0)
        .ok_or_else(invalid)?;

    let seconds = num.checked_mul(multiplier).ok_or_else(invalid)?;

    Ok(if negative { -seconds } else { seconds })
}

/// Custom component updater
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ccup",
    version,
    about = "Check and update GitHub-hosted custom components"
)]
pub struct CliArgs {
    /// Installation root containing configuration.yaml (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Modes
    /// Download and install every outdated component
    #[arg(short, long, conflicts_with = "json")]
    pub update: bool,

    /// Output outdated repositories in JSON format
    #[arg(long)]
    pub json: bool,

    // Files
    /// Reference list file (default: <PATH>/ccup.txt)
    #[arg(long, value_name = "FILE")]
    pub references: Option<PathBuf>,

    /// Report cache file (default: <PATH>/ccup.json)
    #[arg(long, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Reuse a cached report younger than this (e.g., 3600, 30m, 1h; negative disables caching)
    #[arg(
        long,
        default_value = "1h",
        value_parser = parse_interval,
        allow_hyphen_values = true
    )]
    pub interval: i64,

    // Output options
    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Endpoints
    /// GitHub web base URL
    #[arg(long, hide = true, default_value = DEFAULT_WEB_URL)]
    pub github_url: String,

    /// Raw content base URL
    #[arg(long, hide = true, default_value = DEFAULT_RAW_URL)]
    pub raw_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["ccup"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.update);
        assert!(!args.json);
        assert!(args.references.is_none());
        assert!(args.cache.is_none());
        assert_eq!(args.interval, 3600);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert_eq!(args.github_url, "https://github.com");
        assert_eq!(args.raw_url, "https://raw.githubusercontent.com");
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["ccup", "/config"]);
        assert_eq!(args.path, PathBuf::from("/config"));
    }

    #[test]
    fn test_update_flags() {
        let args = CliArgs::parse_from(["ccup", "-u"]);
        assert!(args.update);

        let args = CliArgs::parse_from(["ccup", "--update"]);
        assert!(args.update);
    }

    #[test]
    fn test_json_flag() {
        let args = CliArgs::parse_from(["ccup", "--json"]);
        assert!(args.json);
    }

    #[test]
    fn test_update_conflicts_with_json() {
        let result = CliArgs::try_parse_from(["ccup", "--update", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_flags() {
        let args = CliArgs::parse_from(["ccup", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["ccup", "--quiet"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_interval_values() {
        let args = CliArgs::parse_from(["ccup", "--interval", "30m"]);
        assert_eq!(args.interval, 1800);

        let args = CliArgs::parse_from(["ccup", "--interval", "-1"]);
        assert_eq!(args.interval, -1);

        let args = CliArgs::parse_from(["ccup", "--interval", "0"]);
        assert_eq!(args.interval, 0);
    }

    #[test]
    fn test_file_overrides() {
        let args = CliArgs::parse_from([
            "ccup",
            "--references",
            "/etc/refs.txt",
            "--cache",
            "/tmp/cache.json",
        ]);
        assert_eq!(args.references, Some(PathBuf::from("/etc/refs.txt")));
        assert_eq!(args.cache, Some(PathBuf::from("/tmp/cache.json")));
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("3600").unwrap(), 3600);
        assert_eq!(parse_interval("45s").unwrap(), 45);
        assert_eq!(parse_interval("1m").unwrap(), 60);
        assert_eq!(parse_interval("2h").unwrap(), 7200);
        assert_eq!(parse_interval("1d").unwrap(), 86400);
        assert_eq!(parse_interval("-1h").unwrap(), -3600);
        assert_eq!(parse_interval(" 10 ").unwrap(), 10);
    }

    #[test]
    fn test_parse_interval_invalid() {
        assert!(parse_interval("").is_err());
        assert!(parse_interval("abc").is_err());
        assert!(parse_interval("10x").is_err());
        assert!(parse_interval("h").is_err());
        assert!(parse_interval("99999999999999999d").is_err());
        assert!(parse_interval("--5").is_err());
        assert!(parse_interval("1w")
            .unwrap_err()
            .contains("invalid interval format '1w'"));
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "ccup",
            "/config",
            "--json",
            "--interval",
            "-1",
            "--verbose",
        ]);
        assert_eq!(args.path, PathBuf::from("/config"));
        assert!(args.json);
        assert_eq!(args.interval, -1);
        assert!(args.verbose);
    }
}
