//! Selective installation of resolved components
//!
//! This module provides:
//! - Installed version records per component domain
//! - Version comparison (opaque string equality)
//! - Archive download and selective extraction

mod extract;
mod version_record;

pub use extract::{extract_component, ExtractStats};
pub use version_record::{read_installed_version, write_installed_version};

use crate::config::Installation;
use crate::domain::{OutdatedEntry, ResolvedVersion, UpdateOutcome};
use crate::error::InstallError;
use crate::github::HttpClient;
use tracing::info;

/// Installer comparing and installing components into one installation
pub struct Installer {
    client: HttpClient,
    installation: Installation,
}

impl Installer {
    /// Create a new installer
    pub fn new(client: HttpClient, installation: Installation) -> Self {
        Self {
            client,
            installation,
        }
    }

    /// Compare the resolved version against the installed one, installing when requested
    pub async fn check_or_install(
        &self,
        resolved: &ResolvedVersion,
        do_install: bool,
    ) -> Result<UpdateOutcome, InstallError> {
        let domain = resolved.component_domain.as_str();
        let installed = read_installed_version(&self.installation, domain);

        if installed == resolved.version_id {
            return Ok(UpdateOutcome::UpToDate { version: installed });
        }

        if !do_install {
            return Ok(UpdateOutcome::Outdated(OutdatedEntry::new(
                &resolved.name,
                installed,
                &resolved.version_id,
            )));
        }

        let archive = self.client.get_bytes(&resolved.archive_url).await?;
        extract_component(&archive, resolved, &self.installation)?;
        write_installed_version(&self.installation, domain, &resolved.version_id)?;
        info!("{} updated to {}", domain, resolved.version_id);

        Ok(UpdateOutcome::Installed {
            previous: installed,
            version: resolved.version_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComponentLayout, ReferenceKind};
    use super::extract::tests::build_zip;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolved(archive_url: String, installation: &Installation) -> ResolvedVersion {
        ResolvedVersion {
            name: "owner/repo".to_string(),
            reference_kind: ReferenceKind::Tag,
            version_id: "v2.0.0".to_string(),
            archive_url,
            component_domain: "foo".to_string(),
            layout: ComponentLayout::SharedDirectory,
            install_root: installation.root().to_path_buf(),
        }
    }

    async fn archive_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/owner/repo/archive/refs/tags/v2.0.0.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(build_zip(&[
                ("repo-2.0.0/", ""),
                ("repo-2.0.0/custom_components/foo/__init__.py", "v2"),
            ])))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_outdated_when_not_installed() {
        let dir = TempDir::new().unwrap();
        let installation = Installation::new(dir.path());
        let installer = Installer::new(HttpClient::new().unwrap(), installation.clone());

        let outcome = installer
            .check_or_install(
                &resolved("http://unused/archive.zip".to_string(), &installation),
                false,
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            UpdateOutcome::Outdated(OutdatedEntry::new("owner/repo", "-", "v2.0.0"))
        );
        assert!(!installation.component_dir("foo").exists());
    }

    #[tokio::test]
    async fn test_up_to_date_when_versions_match() {
        let dir = TempDir::new().unwrap();
        let installation = Installation::new(dir.path());
        write_installed_version(&installation, "foo", "v2.0.0").unwrap();
        let installer = Installer::new(HttpClient::new().unwrap(), installation.clone());

        let outcome = installer
            .check_or_install(
                &resolved("http://unused/archive.zip".to_string(), &installation),
                true,
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            UpdateOutcome::UpToDate {
                version: "v2.0.0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_install_then_idempotent() {
        let server = archive_server().await;
        let dir = TempDir::new().unwrap();
        let installation = Installation::new(dir.path());
        let installer = Installer::new(HttpClient::new().unwrap(), installation.clone());
        let resolved = resolved(
            format!("{}/owner/repo/archive/refs/tags/v2.0.0.zip", server.uri()),
            &installation,
        );

        let first = installer.check_or_install(&resolved, true).await.unwrap();
        assert_eq!(
            first,
            UpdateOutcome::Installed {
                previous: "-".to_string(),
                version: "v2.0.0".to_string()
            }
        );
        assert_eq!(
            fs::read_to_string(installation.component_dir("foo").join("__init__.py")).unwrap(),
            "v2"
        );
        assert_eq!(read_installed_version(&installation, "foo"), "v2.0.0");

        let second = installer.check_or_install(&resolved, true).await.unwrap();
        assert!(matches!(second, UpdateOutcome::UpToDate { .. }));
    }

    #[tokio::test]
    async fn test_failed_download_leaves_record_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let installation = Installation::new(dir.path());
        write_installed_version(&installation, "foo", "v1.0.0").unwrap();
        let installer = Installer::new(HttpClient::new().unwrap(), installation.clone());

        let result = installer
            .check_or_install(&resolved(format!("{}/a.zip", server.uri()), &installation), true)
            .await;

        assert!(matches!(result, Err(InstallError::Network(_))));
        assert_eq!(read_installed_version(&installation, "foo"), "v1.0.0");
    }
}
