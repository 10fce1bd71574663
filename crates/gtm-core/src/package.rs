use std::path::PathBuf;
use std::sync::Arc;

use gtm_error::{CliError, Result};
use gtm_logger;
use gtm_registry::VersionSource;
use gtm_resolver::{VersionConstraint, select_version};
use gtm_store::{CacheLock, PathResolver, StoreLocation, StoreManager};
use gtm_utils::{format_path, parse_pkg_spec};

use crate::installer::{InstallRequest, Installer};

/// A plugin package as named by the command table. `resolved_version` is
/// only ever a concrete version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub name: String,
    pub constraint: VersionConstraint,
    pub resolved_version: Option<String>,
}

impl PackageRef {
    #[must_use]
    pub fn new(name: &str, constraint: VersionConstraint) -> Self {
        Self {
            name: name.to_string(),
            constraint,
            resolved_version: None,
        }
    }

    /// `@scope/name@range`, `name@latest` or a bare name.
    #[must_use]
    pub fn from_spec(spec: &str) -> Self {
        let (name, constraint) = parse_pkg_spec(spec);
        Self::new(&name, VersionConstraint::parse(&constraint))
    }
}

/// Resolution-aware view of the on-disk plugin cache.
pub struct PackageStore {
    location: StoreLocation,
    versions: Arc<dyn VersionSource>,
    installer: Arc<dyn Installer>,
}

impl PackageStore {
    #[must_use]
    pub fn new(
        location: StoreLocation,
        versions: Arc<dyn VersionSource>,
        installer: Arc<dyn Installer>,
    ) -> Self {
        Self {
            location,
            versions,
            installer,
        }
    }

    /// Newest published version allowed by the package's constraint.
    pub async fn newest_version(&self, pkg: &PackageRef) -> Result<String> {
        let versions = self.versions.list_versions(&pkg.name).await?;
        select_version("", &pkg.constraint, &versions)
            .ok_or_else(|| CliError::NoMatchingVersion(pkg.name.clone(), pkg.constraint.to_string()))
    }

    /// Fills in `resolved_version` unless an earlier step already did.
    pub async fn resolve(&self, pkg: &mut PackageRef) -> Result<String> {
        if let Some(version) = &pkg.resolved_version {
            return Ok(version.clone());
        }
        let version = self.newest_version(pkg).await?;
        gtm_logger::verbose("resolve", &format!("{}@{} -> {version}", pkg.name, pkg.constraint));
        pkg.resolved_version = Some(version.clone());
        Ok(version)
    }

    /// Cache entry for `(name, version)`; `None` in override mode.
    #[must_use]
    pub fn cache_path(&self, name: &str, version: &str) -> Option<PathBuf> {
        self.location
            .store_dir
            .as_deref()
            .map(|store_dir| PathResolver::cache_entry_path(store_dir, name, version))
    }

    pub async fn exists(&self, pkg: &mut PackageRef) -> Result<bool> {
        if self.location.is_override() {
            return Ok(self.location.target_path.exists());
        }
        let version = self.resolve(pkg).await?;
        Ok(self
            .cache_path(&pkg.name, &version)
            .is_some_and(|path| path.is_dir()))
    }

    /// Installs `version`, or the resolved version when none is given, and
    /// returns its cache entry. An entry that appears while waiting for the
    /// lock is reused.
    pub async fn install(&self, pkg: &mut PackageRef, version: Option<&str>) -> Result<PathBuf> {
        let Some(store_dir) = self.location.store_dir.clone() else {
            return Err(CliError::Config(format!(
                "cannot install {} while a target path override is set",
                pkg.name
            )));
        };

        let version = match version {
            Some(version) => version.to_string(),
            None => self.resolve(pkg).await?,
        };
        pkg.resolved_version = Some(version.clone());

        let failed = |reason: String| CliError::InstallFailed(pkg.name.clone(), version.clone(), reason);

        StoreManager::ensure_store_dir(&store_dir)
            .map_err(|e| failed(format!("cannot create store: {e}")))?;

        let destination = PathResolver::cache_entry_path(&store_dir, &pkg.name, &version);
        let lock_path = PathResolver::lock_path(&store_dir, &pkg.name, &version);
        let _lock = tokio::task::spawn_blocking(move || CacheLock::acquire(&lock_path))
            .await
            .map_err(|e| failed(format!("lock task failed: {e}")))??;

        if destination.is_dir() {
            gtm_logger::verbose("cached", &format_path(&destination));
            return Ok(destination);
        }

        let request = InstallRequest {
            name: pkg.name.clone(),
            version: version.clone(),
            destination: destination.clone(),
            store_dir,
        };
        self.installer
            .install(&request)
            .await
            .map_err(|e| match e {
                CliError::InstallFailed(..) => e,
                other => failed(other.to_string()),
            })?;

        if !destination.is_dir() {
            return Err(failed(format!(
                "nothing was installed at {}",
                format_path(&destination)
            )));
        }
        Ok(destination)
    }

    /// Moves the package to the newest allowed version, installing it only
    /// when its entry is missing. Older entries are left in place.
    pub async fn update(&self, pkg: &mut PackageRef) -> Result<PathBuf> {
        let version = self.newest_version(pkg).await?;
        match self.cache_path(&pkg.name, &version) {
            Some(path) if path.is_dir() => {
                pkg.resolved_version = Some(version);
                Ok(path)
            }
            _ => self.install(pkg, Some(&version)).await,
        }
    }
}
