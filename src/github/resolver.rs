//! Reference resolution against GitHub web pages
//!
//! Resolution works without the authenticated API:
//! - the latest release is read from the `releases/latest` redirect
//! - branch vs tag is read from the ref-selector icon on the tree page
//! - the component directory is located from links on the tree page, the
//!   root `manifest.json`, or the `custom_components` listing

use crate::config::{Endpoints, Installation};
use crate::domain::{ComponentLayout, ReferenceKind, RepositoryReference, ResolvedVersion};
use crate::error::ResolveError;
use crate::github::markup::{self, RefIndicator, RELEASES_SENTINEL};
use crate::github::HttpClient;
use async_trait::async_trait;
use tracing::debug;

/// Trait for reference resolvers
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// Resolve a reference to its current version and component location
    ///
    /// Returns `Ok(None)` when the repository holds no installable component.
    async fn resolve(
        &self,
        reference: &RepositoryReference,
    ) -> Result<Option<ResolvedVersion>, ResolveError>;
}

/// Branch or tag the label was classified as
#[derive(Debug)]
struct Classified {
    kind: ReferenceKind,
    /// Branch or tag name used in URLs
    tree: String,
    version_id: String,
}

/// Where the component was found
#[derive(Debug)]
struct Located {
    domain: String,
    layout: ComponentLayout,
}

/// Resolver reading github.com pages
pub struct GitHubResolver {
    client: HttpClient,
    endpoints: Endpoints,
    installation: Installation,
}

impl GitHubResolver {
    /// Create a new GitHub resolver
    pub fn new(client: HttpClient, endpoints: Endpoints, installation: Installation) -> Self {
        Self {
            client,
            endpoints,
            installation,
        }
    }

    /// Build the repository base URL
    fn repo_url(&self, name: &str) -> String {
        format!("{}/{}", self.endpoints.web, name)
    }

    /// Build the URL of the tree page for a label, or the root for the sentinel
    fn tree_url(&self, name: &str, label: &str) -> String {
        if label == RELEASES_SENTINEL {
            self.repo_url(name)
        } else {
            format!("{}/tree/{}", self.repo_url(name), label)
        }
    }

    /// Build the archive URL for a branch or tag
    fn archive_url(&self, name: &str, kind: ReferenceKind, tree: &str) -> String {
        format!(
            "{}/archive/refs/{}/{}.zip",
            self.repo_url(name),
            kind.archive_segment(),
            tree
        )
    }

    /// Build the raw URL of the root manifest.json
    fn manifest_url(&self, name: &str, tree: &str) -> String {
        format!("{}/{}/{}/manifest.json", self.endpoints.raw, name, tree)
    }

    /// Step 1: determine the label to inspect
    async fn discover_label(&self, reference: &RepositoryReference) -> Result<String, ResolveError> {
        if let Some(ref tree) = reference.tree {
            return Ok(tree.clone());
        }

        let url = format!("{}/releases/latest", self.repo_url(&reference.name));
        let location = self.client.get_location(&url).await?;
        let label = location
            .as_deref()
            .and_then(markup::label_from_location)
            .ok_or_else(|| ResolveError::NoRedirect {
                name: reference.name.clone(),
            })?;

        debug!("{}: latest release label '{}'", reference.name, label);
        Ok(label.to_string())
    }

    /// Step 2: classify the label as branch or tag
    fn classify(&self, name: &str, label: &str, page: &str) -> Result<Classified, ResolveError> {
        let region =
            markup::ref_selector_region(page).ok_or_else(|| ResolveError::unclassified(name, label))?;
        let is_sentinel = label == RELEASES_SENTINEL;

        match markup::ref_indicator(region) {
            Some(RefIndicator::Branch) => {
                let branch = if is_sentinel {
                    markup::default_branch(region).ok_or_else(|| {
                        ResolveError::MissingDefaultBranch {
                            name: name.to_string(),
                        }
                    })?
                } else {
                    label.to_string()
                };
                let version_id = markup::short_commit_hash(page).ok_or_else(|| {
                    ResolveError::MissingCommitHash {
                        name: name.to_string(),
                        branch: branch.clone(),
                    }
                })?;
                Ok(Classified {
                    kind: ReferenceKind::Branch,
                    tree: branch,
                    version_id,
                })
            }
            Some(RefIndicator::Tag) if !is_sentinel => Ok(Classified {
                kind: ReferenceKind::Tag,
                tree: label.to_string(),
                version_id: label.to_string(),
            }),
            _ => Err(ResolveError::unclassified(name, label)),
        }
    }

    /// Step 3: locate the component directory
    async fn locate(
        &self,
        name: &str,
        tree: &str,
        page: &str,
    ) -> Result<Option<Located>, ResolveError> {
        if let Some(domain) = markup::custom_component_link(page) {
            debug!("{}: custom_components/{} linked from tree page", name, domain);
            return Ok(Some(Located {
                domain,
                layout: ComponentLayout::SharedDirectory,
            }));
        }

        if markup::has_root_manifest(page, name, tree) {
            let content = self.client.get_text(&self.manifest_url(name, tree)).await?;
            let domain = markup::manifest_domain(&content)
                .map_err(|message| ResolveError::invalid_manifest(name, message))?;
            debug!("{}: root manifest declares domain '{}'", name, domain);
            return Ok(Some(Located {
                domain,
                layout: ComponentLayout::RootManifest,
            }));
        }

        let listing_url = format!("{}/tree/{}/custom_components", self.repo_url(name), tree);
        let Some(listing) = self.client.get_text_optional(&listing_url).await? else {
            debug!("{}: no custom_components directory", name);
            return Ok(None);
        };

        let mut entries = markup::custom_component_entries(&listing, name, tree);
        if entries.len() != 1 {
            debug!(
                "{}: custom_components has {} entries, expected exactly one",
                name,
                entries.len()
            );
            return Ok(None);
        }

        Ok(entries.pop().map(|domain| Located {
            domain,
            layout: ComponentLayout::SharedDirectory,
        }))
    }
}

#[async_trait]
impl ReferenceResolver for GitHubResolver {
    async fn resolve(
        &self,
        reference: &RepositoryReference,
    ) -> Result<Option<ResolvedVersion>, ResolveError> {
        let name = reference.name.as_str();
        let label = self.discover_label(reference).await?;

        let page = self.client.get_text(&self.tree_url(name, &label)).await?;
        let classified = self.classify(name, &label, &page)?;
        debug!(
            "{}: '{}' is a {} at {}",
            name, classified.tree, classified.kind, classified.version_id
        );

        let Some(located) = self.locate(name, &classified.tree, &page).await? else {
            return Ok(None);
        };

        let install_root = match located.layout {
            ComponentLayout::SharedDirectory => self.installation.root().to_path_buf(),
            ComponentLayout::RootManifest => self.installation.component_dir(&located.domain),
        };

        Ok(Some(ResolvedVersion {
            name: name.to_string(),
            reference_kind: classified.kind,
            archive_url: self.archive_url(name, classified.kind, &classified.tree),
            version_id: classified.version_id,
            component_domain: located.domain,
            layout: located.layout,
            install_root,
        }))
    }
}
