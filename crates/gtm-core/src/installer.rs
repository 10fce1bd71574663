use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use gtm_error::{CliError, Result};
use gtm_logger;
use gtm_registry::RegistryClient;
use gtm_store::StoreManager;

/// One package version to materialize at `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub name: String,
    pub version: String,
    pub destination: PathBuf,
    pub store_dir: PathBuf,
}

/// Materializes a package version on disk. Dependency installation, if any,
/// is the installer's business.
#[async_trait]
pub trait Installer: Send + Sync {
    async fn install(&self, request: &InstallRequest) -> Result<()>;
}

/// Downloads the registry tarball, checks its integrity and unpacks it.
pub struct TarballInstaller {
    registry: Arc<RegistryClient>,
}

impl TarballInstaller {
    #[must_use]
    pub const fn new(registry: Arc<RegistryClient>) -> Self {
        Self { registry }
    }

    async fn download_tarball(&self, request: &InstallRequest, url: &str) -> Result<Vec<u8>> {
        let failed = |reason: String| {
            CliError::InstallFailed(request.name.clone(), request.version.clone(), reason)
        };

        let resp = self
            .registry
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| failed(format!("download failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(failed(format!("HTTP {} for {url}", resp.status())));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| failed(format!("failed to read tarball: {e}")))?;
        gtm_logger::verbose(
            "download",
            &format!("{}@{} ({} bytes)", request.name, request.version, bytes.len()),
        );
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Installer for TarballInstaller {
    async fn install(&self, request: &InstallRequest) -> Result<()> {
        let failed = |reason: String| {
            CliError::InstallFailed(request.name.clone(), request.version.clone(), reason)
        };

        let info = self.registry.fetch_package_info(&request.name).await?;
        let dist = info
            .dist(&request.version)
            .ok_or_else(|| failed("registry lists no tarball for this version".to_string()))?;

        gtm_logger::status(&format!(
            "Downloading {}@{}...",
            request.name, request.version
        ));
        let bytes = self.download_tarball(request, &dist.tarball).await?;

        let verified = dist
            .integrity
            .as_deref()
            .is_none_or(|integrity| StoreManager::verify_integrity(&bytes, integrity));
        if !verified {
            return Err(failed("integrity check failed".to_string()));
        }

        StoreManager::ensure_store_dir(&request.store_dir)
            .map_err(|e| failed(format!("cannot create store: {e}")))?;

        let destination = request.destination.clone();
        tokio::task::spawn_blocking(move || StoreManager::extract_package(&destination, &bytes))
            .await
            .map_err(|e| failed(format!("extract task failed: {e}")))?
            .map_err(|e| failed(format!("extract failed: {e}")))?;

        gtm_logger::finish_line(&format!(
            "Installed {}@{}",
            request.name, request.version
        ));
        Ok(())
    }
}
