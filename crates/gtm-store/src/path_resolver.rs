use std::path::{Path, PathBuf};

use gtm_constants::LOCK_DIR;

pub struct PathResolver;

impl PathResolver {
    /// `@scope/name` becomes `_@scope_name`, so the first path segment of a
    /// cache entry never contains a separator.
    #[must_use]
    pub fn sanitize_package_name(package_name: &str) -> String {
        format!("_{}", package_name.replace(['/', '\\'], "_"))
    }

    /// Directory name of a cached `(name, version)` pair:
    /// `_{sanitized}@{version}@{name}`.
    #[must_use]
    pub fn cache_entry_name(package_name: &str, version: &str) -> String {
        format!(
            "{}@{version}@{package_name}",
            Self::sanitize_package_name(package_name)
        )
    }

    #[must_use]
    pub fn cache_entry_path(store_dir: &Path, package_name: &str, version: &str) -> PathBuf {
        store_dir.join(Self::cache_entry_name(package_name, version))
    }

    #[must_use]
    pub fn lock_path(store_dir: &Path, package_name: &str, version: &str) -> PathBuf {
        store_dir.join(LOCK_DIR).join(format!(
            "{}@{version}.lock",
            Self::sanitize_package_name(package_name)
        ))
    }
}
