use semver::{Prerelease, Version};

/// A version as written in a range, where trailing components may be
/// omitted or wildcarded (`1`, `1.2`, `1.x`, `1.2.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Prerelease,
}

impl PartialVersion {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// Smallest version this partial covers (missing components are zero).
    #[must_use]
    pub fn lower(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }

    /// First version past what this partial covers, `None` when unbounded.
    #[must_use]
    pub fn upper(&self) -> Option<Version> {
        match (self.major, self.minor, self.patch) {
            (None, _, _) => None,
            (Some(major), None, _) => Some(Version::new(major + 1, 0, 0)),
            (Some(major), Some(minor), None) => Some(Version::new(major, minor + 1, 0)),
            (Some(major), Some(minor), Some(patch)) => Some(Version::new(major, minor, patch + 1)),
        }
    }
}

fn parse_component(part: &str, label: &str) -> Result<Option<u64>, String> {
    if matches!(part, "x" | "X" | "*") {
        return Ok(None);
    }
    part.parse::<u64>()
        .map(Some)
        .map_err(|_| format!("Invalid {label} version: {part}"))
}

pub fn parse_partial(version_str: &str) -> Result<PartialVersion, String> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);

    if cleaned.is_empty() || matches!(cleaned, "*" | "x" | "X") {
        return Ok(PartialVersion {
            major: None,
            minor: None,
            patch: None,
            pre: Prerelease::EMPTY,
        });
    }

    if let Ok(version) = Version::parse(cleaned) {
        return Ok(PartialVersion {
            major: Some(version.major),
            minor: Some(version.minor),
            patch: Some(version.patch),
            pre: version.pre,
        });
    }

    // Build metadata never takes part in range matching.
    let without_build = cleaned.split('+').next().unwrap_or(cleaned);
    let (core, pre) = match without_build.split_once('-') {
        Some((core, pre)) => (
            core,
            Prerelease::new(pre).map_err(|e| format!("Invalid prerelease '{pre}': {e}"))?,
        ),
        None => (without_build, Prerelease::EMPTY),
    };

    let mut parts = core.split('.');
    let major = parse_component(parts.next().unwrap_or("*"), "major")?;
    let minor = match parts.next() {
        Some(part) if major.is_some() => parse_component(part, "minor")?,
        _ => None,
    };
    let patch = match parts.next() {
        Some(part) if minor.is_some() => parse_component(part, "patch")?,
        _ => None,
    };
    if parts.next().is_some() {
        return Err(format!("Invalid version '{cleaned}': too many components"));
    }

    Ok(PartialVersion {
        major,
        minor,
        patch,
        pre,
    })
}

/// Parse a single version string into a Version, handling partial versions
pub fn parse_partial_version(version_str: &str) -> Result<Version, String> {
    parse_partial(version_str).map(|partial| partial.lower())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version() {
        let partial = parse_partial("1.2.3").unwrap();
        assert!(partial.is_complete());
        assert_eq!(partial.lower(), Version::new(1, 2, 3));
        assert_eq!(partial.upper(), Some(Version::new(1, 2, 4)));
    }

    #[test]
    fn test_partial_versions() {
        assert_eq!(parse_partial_version("1").unwrap(), Version::new(1, 0, 0));
        assert_eq!(parse_partial_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(
            parse_partial("1.x").unwrap().upper(),
            Some(Version::new(2, 0, 0))
        );
        assert_eq!(
            parse_partial("v2.3.*").unwrap().upper(),
            Some(Version::new(2, 4, 0))
        );
        assert_eq!(parse_partial("*").unwrap().upper(), None);
    }

    #[test]
    fn test_prerelease_is_kept() {
        let version = parse_partial_version("2.0.0-beta.1").unwrap();
        assert_eq!(version.pre.as_str(), "beta.1");
    }

    #[test]
    fn test_invalid_components() {
        assert!(parse_partial("one.two").is_err());
        assert!(parse_partial("1.2.3.4").is_err());
    }
}
