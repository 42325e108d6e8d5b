//! Batch orchestrator coordinating a whole run
//!
//! This module provides:
//! - Workflow coordination: cache → references → resolve → compare/install → cache
//! - Strictly sequential processing, one reference at a time
//! - Error handling with partial continuation

use crate::cache::ReportCache;
use crate::config::RunConfig;
use crate::domain::{OutdatedReport, ReferenceResult, RepositoryReference, SkipReason, UpdateOutcome};
use crate::error::ConfigError;
use crate::github::{GitHubResolver, HttpClient, ReferenceResolver};
use crate::installer::Installer;
use crate::progress::Progress;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Orchestrator for one run over an installation
pub struct Orchestrator {
    /// Run configuration
    config: RunConfig,
    /// Reference resolver
    resolver: Box<dyn ReferenceResolver>,
    /// Component installer
    installer: Installer,
}

/// Result of running the orchestrator
#[derive(Debug, Default)]
pub struct OrchestratorResult {
    /// Outdated repositories (empty after a full update)
    pub report: OutdatedReport,
    /// Per-reference results in processing order
    pub results: Vec<ReferenceResult>,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
    /// Whether the report came from the cache
    pub from_cache: bool,
}

impl OrchestratorResult {
    /// Returns true if any repository is outdated
    pub fn has_updates(&self) -> bool {
        !self.report.is_empty()
    }

    /// Number of outdated repositories
    pub fn outdated_count(&self) -> usize {
        self.report.len()
    }

    /// Results that installed a new version
    pub fn installed(&self) -> impl Iterator<Item = &ReferenceResult> {
        self.results
            .iter()
            .filter(|r| r.outcome().is_some_and(UpdateOutcome::is_installed))
    }
}

/// Errors that can occur during orchestration
#[derive(Debug)]
pub enum OrchestratorError {
    /// Failed to create HTTP client
    HttpClientError(String),
    /// Failed to resolve a reference
    ResolveError { reference: String, message: String },
    /// Failed to compare or install a component
    InstallError { reference: String, message: String },
    /// Failed to write the report cache
    CacheError(String),
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::HttpClientError(msg) => write!(f, "HTTP client error: {}", msg),
            OrchestratorError::ResolveError { reference, message } => {
                write!(f, "Failed to resolve {}: {}", reference, message)
            }
            OrchestratorError::InstallError { reference, message } => {
                write!(f, "Failed to install {}: {}", reference, message)
            }
            OrchestratorError::CacheError(msg) => write!(f, "Cache error: {}", msg),
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl Orchestrator {
    /// Create a new orchestrator resolving against GitHub
    pub fn new(config: RunConfig) -> Result<Self, OrchestratorError> {
        let client =
            HttpClient::new().map_err(|e| OrchestratorError::HttpClientError(e.to_string()))?;
        let resolver = GitHubResolver::new(
            client.clone(),
            config.endpoints.clone(),
            config.installation.clone(),
        );
        Ok(Self::with_resolver(config, Box::new(resolver), client))
    }

    /// Create an orchestrator with a custom resolver (for testing)
    pub fn with_resolver(
        config: RunConfig,
        resolver: Box<dyn ReferenceResolver>,
        client: HttpClient,
    ) -> Self {
        let installer = Installer::new(client, config.installation.clone());
        Self {
            config,
            resolver,
            installer,
        }
    }

    /// Run the workflow
    ///
    /// Configuration problems (no references) end the run with an error;
    /// per-reference failures are collected in the result.
    pub async fn run(&self) -> Result<OrchestratorResult, ConfigError> {
        let cache = ReportCache::new(self.config.cache_path.clone(), self.config.interval_secs);

        if self.config.mode.uses_cache() {
            if let Some(report) = cache.load_fresh(SystemTime::now()) {
                return Ok(OrchestratorResult {
                    report,
                    from_cache: true,
                    ..Default::default()
                });
            }
        }

        let references = self.config.load_references()?;
        let mut result = self.process(&references).await;

        if let Err(e) = cache.store(&result.report) {
            warn!("{}", e);
            result.errors.push(OrchestratorError::CacheError(e.to_string()));
        }

        Ok(result)
    }

    /// Process references one after another
    async fn process(&self, references: &[RepositoryReference]) -> OrchestratorResult {
        let mut progress = Progress::new(self.config.show_progress);
        let mut result = OrchestratorResult::default();
        let do_install = self.config.mode.installs();

        progress.start(references.len() as u64, "Checking repositories");

        for reference in references {
            progress.set_message(&format!("Checking {}", reference));
            let item = self.process_one(reference, do_install, &mut result.errors).await;

            if let ReferenceResult::Checked {
                outcome: UpdateOutcome::Outdated(ref entry),
                ..
            } = item
            {
                result.report.push(entry.clone());
            }
            result.results.push(item);
            progress.inc();
        }
        progress.finish_and_clear();

        result
    }

    /// Resolve and compare (or install) a single reference
    async fn process_one(
        &self,
        reference: &RepositoryReference,
        do_install: bool,
        errors: &mut Vec<OrchestratorError>,
    ) -> ReferenceResult {
        let resolved = match self.resolver.resolve(reference).await {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                debug!("{}: no installable component", reference);
                return ReferenceResult::Skipped {
                    reference: reference.clone(),
                    reason: SkipReason::NoComponent,
                };
            }
            Err(e) => {
                warn!("{}: {}", reference, e);
                errors.push(OrchestratorError::ResolveError {
                    reference: reference.to_string(),
                    message: e.to_string(),
                });
                return ReferenceResult::Skipped {
                    reference: reference.clone(),
                    reason: SkipReason::Failed(e.to_string()),
                };
            }
        };

        match self.installer.check_or_install(&resolved, do_install).await {
            Ok(outcome) => ReferenceResult::Checked {
                reference: reference.clone(),
                domain: resolved.component_domain,
                outcome,
            },
            Err(e) => {
                warn!("{}: {}", reference, e);
                errors.push(OrchestratorError::InstallError {
                    reference: reference.to_string(),
                    message: e.to_string(),
                });
                ReferenceResult::Skipped {
                    reference: reference.clone(),
                    reason: SkipReason::Failed(e.to_string()),
                }
            }
        }
    }
}
