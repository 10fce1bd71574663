use semver::Version;
use std::fmt;

use crate::range::parse_npm_semver_ranges;

const LATEST: &str = "latest";

/// How a package version should be chosen from the published list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Newest published version, no range applied.
    Latest,
    /// Newest version in the caret range seeded from the base version.
    Compatible,
    /// Newest version inside an explicit npm-style range.
    Range(String),
}

impl VersionConstraint {
    #[must_use]
    pub fn parse(constraint: &str) -> Self {
        match constraint.trim() {
            "" | LATEST => Self::Latest,
            range => Self::Range(range.to_string()),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Compatible => f.write_str("^<base>"),
            Self::Range(range) => f.write_str(range),
        }
    }
}

fn parsed(versions: &[String]) -> impl Iterator<Item = (Version, &String)> {
    versions
        .iter()
        .filter_map(|v_str| Version::parse(v_str.trim()).ok().map(|v| (v, v_str)))
}

/// Highest version by semver ordering; unparseable entries are ignored.
#[must_use]
pub fn max_version(versions: &[String]) -> Option<String> {
    parsed(versions)
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, v_str)| v_str.clone())
}

/// Highest version satisfying an npm-style range. A pre-release is only
/// eligible through a clause naming a pre-release of the same release.
pub fn select_range(range: &str, versions: &[String]) -> Result<Option<String>, String> {
    let ranges = parse_npm_semver_ranges(range)?;

    Ok(parsed(versions)
        .filter(|(v, _)| ranges.iter().any(|range| range.matches(v)))
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, v_str)| v_str.clone()))
}

/// Picks the version to use for `constraint`. `base` seeds the caret range
/// for [`VersionConstraint::Compatible`]. Returns `None` when nothing fits,
/// including when the constraint cannot be parsed.
#[must_use]
pub fn select_version(
    base: &str,
    constraint: &VersionConstraint,
    versions: &[String],
) -> Option<String> {
    match constraint {
        VersionConstraint::Latest => max_version(versions),
        VersionConstraint::Compatible => select_range(&format!("^{}", base.trim()), versions)
            .ok()
            .flatten(),
        VersionConstraint::Range(range) => select_range(range, versions).ok().flatten(),
    }
}
