//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Outdated repository listing with installed and available versions
//! - Installed component lines after an update run
//! - Skipped and up-to-date repositories in verbose mode
//! - Error listing and a one-line summary

use crate::domain::{OutdatedEntry, ReferenceResult, UpdateOutcome};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Minimum width of the repository name column
const MIN_NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Width of the name column for a set of names
    fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
        names.map(str::len).max().unwrap_or(0).max(MIN_NAME_WIDTH)
    }

    /// Format a single outdated line
    fn format_outdated_line(
        &self,
        entry: &OutdatedEntry,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            let name_display = format!("{:width$}", entry.name, width = width);
            writeln!(
                writer,
                "  {} {} {} {}",
                name_display,
                entry.installed_version.dimmed(),
                "→".dimmed(),
                entry.available_version.bright_white().bold()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {}",
                entry.name,
                entry.installed_version,
                entry.available_version,
                width = width
            )
        }
    }

    /// Format one line per installed component
    fn format_installed(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for item in result.installed() {
            if let ReferenceResult::Checked {
                domain,
                outcome: UpdateOutcome::Installed { version, .. },
                ..
            } = item
            {
                if self.color {
                    writeln!(writer, "{} updated to {}", domain.bold(), version.green())?;
                } else {
                    writeln!(writer, "{} updated to {}", domain, version)?;
                }
            }
        }
        Ok(())
    }

    /// Format skipped and up-to-date repositories
    fn format_details(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let width = Self::name_width(result.results.iter().map(|r| r.reference().name.as_str()));

        for item in &result.results {
            let (name, detail) = match item {
                ReferenceResult::Checked {
                    reference,
                    outcome: UpdateOutcome::UpToDate { version },
                    ..
                } => (reference.name.as_str(), format!("up to date ({})", version)),
                ReferenceResult::Skipped { reference, reason } => {
                    (reference.name.as_str(), format!("skipped: {}", reason))
                }
                ReferenceResult::Checked { .. } => continue,
            };

            let name_display = format!("{:width$}", name, width = width);
            if self.color {
                writeln!(writer, "  {} {}", name_display.dimmed(), detail.dimmed())?;
            } else {
                writeln!(writer, "  {} {}", name_display, detail)?;
            }
        }
        Ok(())
    }

    /// Format the one-line summary
    fn format_summary(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let outdated = result.outdated_count();
        let installed = result.installed().count();
        let cached = if result.from_cache { " (cached)" } else { "" };

        let line = match (outdated, installed) {
            (0, 0) => format!("All components are up to date{}", cached),
            (0, n) => format!("{} component(s) updated", n),
            (n, _) => format!("{} repository(ies) outdated{}", n, cached),
        };

        if self.color {
            if outdated > 0 {
                writeln!(writer, "{}", line.yellow())
            } else {
                writeln!(writer, "{}", line.dimmed())
            }
        } else {
            writeln!(writer, "{}", line)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only installed components are shown
        if self.verbosity == Verbosity::Quiet {
            return self.format_installed(result, writer);
        }

        self.format_installed(result, writer)?;

        if !result.report.is_empty() {
            let width = Self::name_width(result.report.repositories.iter().map(|e| e.name.as_str()));
            for entry in &result.report.repositories {
                self.format_outdated_line(entry, width, writer)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_details(result, writer)?;
        }

        if !result.errors.is_empty() {
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "{}:", "Errors".red().bold())?;
            } else {
                writeln!(writer, "Errors:")?;
            }
            for error in &result.errors {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
        }

        writeln!(writer)?;
        self.format_summary(result, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OutdatedReport, RepositoryReference, SkipReason};
    use crate::orchestrator::OrchestratorError;

    fn format(result: &OrchestratorResult, verbosity: Verbosity) -> String {
        let mut output = Vec::new();
        TextFormatter::with_color(verbosity, false)
            .format(result, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn sample_result() -> OrchestratorResult {
        let entry = OutdatedEntry::new("owner/foo", "-", "v2.0.0");
        let mut report = OutdatedReport::new();
        report.push(entry.clone());

        OrchestratorResult {
            report,
            results: vec![
                ReferenceResult::Checked {
                    reference: RepositoryReference::new("owner/foo", None),
                    domain: "foo".to_string(),
                    outcome: UpdateOutcome::Outdated(entry),
                },
                ReferenceResult::Checked {
                    reference: RepositoryReference::new("owner/bar", None),
                    domain: "bar".to_string(),
                    outcome: UpdateOutcome::UpToDate {
                        version: "abc1234".to_string(),
                    },
                },
                ReferenceResult::Skipped {
                    reference: RepositoryReference::new("owner/baz", None),
                    reason: SkipReason::NoComponent,
                },
            ],
            errors: Vec::new(),
            from_cache: false,
        }
    }

    #[test]
    fn test_outdated_listing() {
        let output = format(&sample_result(), Verbosity::Normal);
        assert!(output.contains("owner/foo"));
        assert!(output.contains("- -> v2.0.0"));
        assert!(output.contains("1 repository(ies) outdated"));
        assert!(!output.contains("owner/bar"));
    }

    #[test]
    fn test_verbose_shows_details() {
        let output = format(&sample_result(), Verbosity::Verbose);
        assert!(output.contains("up to date (abc1234)"));
        assert!(output.contains("skipped: no installable component"));
    }

    #[test]
    fn test_installed_lines() {
        let result = OrchestratorResult {
            results: vec![ReferenceResult::Checked {
                reference: RepositoryReference::new("owner/foo", None),
                domain: "foo".to_string(),
                outcome: UpdateOutcome::Installed {
                    previous: "-".to_string(),
                    version: "v2.0.0".to_string(),
                },
            }],
            ..Default::default()
        };

        let output = format(&result, Verbosity::Normal);
        assert!(output.contains("foo updated to v2.0.0"));
        assert!(output.contains("1 component(s) updated"));

        let quiet = format(&result, Verbosity::Quiet);
        assert_eq!(quiet, "foo updated to v2.0.0\n");
    }

    #[test]
    fn test_quiet_report_is_silent() {
        assert_eq!(format(&sample_result(), Verbosity::Quiet), "");
    }

    #[test]
    fn test_up_to_date_summary() {
        let result = OrchestratorResult {
            from_cache: true,
            ..Default::default()
        };
        let output = format(&result, Verbosity::Normal);
        assert!(output.contains("All components are up to date (cached)"));
    }

    #[test]
    fn test_errors_listed() {
        let result = OrchestratorResult {
            errors: vec![OrchestratorError::ResolveError {
                reference: "owner/broken".to_string(),
                message: "cannot classify".to_string(),
            }],
            ..Default::default()
        };
        let output = format(&result, Verbosity::Normal);
        assert!(output.contains("Errors:"));
        assert!(output.contains("  - Failed to resolve owner/broken: cannot classify"));
    }
}
