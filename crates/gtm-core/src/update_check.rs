use semver::Version;
use std::time::Duration;

use gtm_constants::{SELF_PACKAGE_NAME, VERSION};
use gtm_error::Result;
use gtm_logger;
use gtm_registry::{RegistryClient, VersionSource};
use gtm_resolver::{VersionConstraint, select_version};

use crate::context::CliContext;

/// Newest caret-compatible release above `current`, if there is one.
pub async fn check_self_update(
    versions: &dyn VersionSource,
    name: &str,
    current: &str,
) -> Result<Option<String>> {
    let published = versions.list_versions(name).await?;
    let Some(candidate) = select_version(current, &VersionConstraint::Compatible, &published)
    else {
        return Ok(None);
    };

    let newer = match (Version::parse(&candidate), Version::parse(current)) {
        (Ok(candidate), Ok(current)) => candidate > current,
        _ => false,
    };
    Ok(newer.then_some(candidate))
}

/// Warns when a newer compatible CLI release exists. Never fails.
pub async fn notify_self_update(ctx: &CliContext) {
    if !ctx.update_check {
        return;
    }

    let registry = RegistryClient::new(&ctx.registry).with_retry(1, Duration::ZERO);
    match check_self_update(&registry, SELF_PACKAGE_NAME, VERSION).await {
        Ok(Some(latest)) => gtm_logger::warn(&format!(
            "A newer version of {SELF_PACKAGE_NAME} is available ({VERSION} -> {latest}). Run `npm install -g {SELF_PACKAGE_NAME}` to update."
        )),
        Ok(None) => gtm_logger::verbose(
            "version",
            &format!("{SELF_PACKAGE_NAME} {VERSION} is current"),
        ),
        Err(err) => {
            gtm_logger::warn(&format!("check `{SELF_PACKAGE_NAME}` version failed"));
            gtm_logger::verbose("reason", &err.to_string());
        }
    }
}
