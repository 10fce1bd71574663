use std::fs;
use std::path::Path;

use crate::package_json::PackageJson;
use gtm_constants::MANIFEST_FILE;

pub fn read_package_json(package_dir: &Path) -> anyhow::Result<PackageJson> {
    let path = package_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(path)?;
    let parsed: PackageJson = serde_json::from_str(&content)?;
    Ok(parsed)
}
