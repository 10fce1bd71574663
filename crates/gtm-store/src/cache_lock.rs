use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

use gtm_error::{CliError, Result};
use gtm_utils::ensure_dir_exists;

/// Advisory exclusive lock on one cache entry. Released on drop.
pub struct CacheLock {
    file: File,
}

impl CacheLock {
    /// Blocks until no other process holds the lock at `lock_path`.
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        let fail = |e: std::io::Error| {
            CliError::LockFailed(lock_path.display().to_string(), e.to_string())
        };

        if let Some(parent) = lock_path.parent() {
            ensure_dir_exists(parent).map_err(fail)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(lock_path)
            .map_err(fail)?;
        file.lock_exclusive().map_err(fail)?;
        Ok(Self { file })
    }
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_exclusive_until_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let lock_path = tmp.path().join(".locks").join("_pkg@1.0.0.lock");

        let held = CacheLock::acquire(&lock_path).unwrap();
        assert!(lock_path.is_file());

        let probe = OpenOptions::new().write(true).open(&lock_path).unwrap();
        assert!(probe.try_lock_exclusive().is_err());

        drop(held);
        assert!(probe.try_lock_exclusive().is_ok());
    }
}
