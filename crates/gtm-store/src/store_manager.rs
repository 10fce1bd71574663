use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha512};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gtm_constants::{CACHE_DIR, STORE_DIR};
use gtm_utils::ensure_dir_exists;

/// Where plugin packages live for one dispatch.
///
/// `store_dir` is `None` in override mode, where `target_path` is used as-is
/// and the managed cache is bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub target_path: PathBuf,
    pub store_dir: Option<PathBuf>,
}

impl StoreLocation {
    /// `{cli_home}/dependencies` with its `node_modules` store.
    #[must_use]
    pub fn managed(cli_home: &Path) -> Self {
        let target_path = cli_home.join(CACHE_DIR);
        let store_dir = target_path.join(STORE_DIR);
        Self {
            target_path,
            store_dir: Some(store_dir),
        }
    }

    #[must_use]
    pub fn override_path(target_path: &Path) -> Self {
        Self {
            target_path: target_path.to_path_buf(),
            store_dir: None,
        }
    }

    #[must_use]
    pub const fn is_override(&self) -> bool {
        self.store_dir.is_none()
    }
}

pub struct StoreManager;

impl StoreManager {
    pub fn ensure_store_dir(store_dir: &Path) -> io::Result<()> {
        ensure_dir_exists(store_dir)
    }

    /// Checks an npm-style `integrity` string. Only `sha512` digests are
    /// verified; strings without one are accepted.
    #[must_use]
    pub fn verify_integrity(tarball_bytes: &[u8], integrity: &str) -> bool {
        let expected: Vec<&str> = integrity
            .split_whitespace()
            .filter_map(|entry| entry.strip_prefix("sha512-"))
            .collect();
        if expected.is_empty() {
            return true;
        }

        let digest = STANDARD.encode(Sha512::digest(tarball_bytes));
        expected.iter().any(|candidate| *candidate == digest)
    }

    /// Unpacks a gzipped package tarball so its contents sit directly in
    /// `entry_path`. The archive is staged next to the entry and moved into
    /// place, so a half-written entry is never visible.
    pub fn extract_package(entry_path: &Path, tarball_bytes: &[u8]) -> io::Result<PathBuf> {
        let parent = entry_path.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "cache entry has no parent")
        })?;
        fs::create_dir_all(parent)?;

        let temp_dir = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(parent)?;
        let tar = flate2::read::GzDecoder::new(tarball_bytes);
        let mut archive = tar::Archive::new(tar);
        archive.unpack(temp_dir.path())?;

        let entries: Vec<_> = fs::read_dir(temp_dir.path())?.collect::<Result<Vec<_>, _>>()?;

        let extracted_package_dir = match entries.as_slice() {
            [single] if single.file_type()?.is_dir() => single.path(),
            _ => temp_dir.path().to_path_buf(),
        };

        if entry_path.exists() {
            return Ok(entry_path.to_path_buf());
        }

        if fs::rename(&extracted_package_dir, entry_path).is_err() {
            fs::create_dir_all(entry_path)?;
            fs_extra::dir::copy(
                &extracted_package_dir,
                entry_path,
                &fs_extra::dir::CopyOptions::new()
                    .overwrite(true)
                    .content_only(true),
            )
            .map_err(io::Error::other)?;
        }

        Ok(entry_path.to_path_buf())
    }
}
