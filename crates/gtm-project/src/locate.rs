use std::path::{Path, PathBuf};

use crate::io::read_package_json;
use gtm_constants::MANIFEST_FILE;
use gtm_utils::{absolute_normalized, format_path};

/// Nearest directory at or above `start` that holds a manifest.
#[must_use]
pub fn find_package_dir(start: &Path) -> Option<PathBuf> {
    let start = absolute_normalized(start).ok()?;
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Resolves the runnable entry module of the package containing
/// `package_dir`, as an absolute path with `/` separators.
///
/// Returns `None` when there is no manifest, the manifest cannot be read,
/// or it declares no `main`.
#[must_use]
pub fn locate_entry(package_dir: &Path) -> Option<String> {
    let dir = find_package_dir(package_dir)?;
    let manifest = read_package_json(&dir).ok()?;
    let main = manifest.main_entry()?;
    let entry = absolute_normalized(&dir.join(main)).ok()?;
    Some(format_path(&entry))
}
