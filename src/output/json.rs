//! JSON output formatter for machine processing
//!
//! Prints the outdated report exactly as it is cached:
//! `{"repositories":[{"name":..,"installed_version":..,"available_version":..}]}`

use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string(&result.report).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}
