use semver::Version;

use crate::version_utils::PartialVersion;

#[derive(Debug, Clone)]
pub enum Comparator {
    Exact(PartialVersion),
    GreaterThan(PartialVersion),
    GreaterThanOrEqual(PartialVersion),
    LessThan(PartialVersion),
    LessThanOrEqual(PartialVersion),
    Compatible(PartialVersion), // ^
    Tilde(PartialVersion),      // ~
    Wildcard,                   // *
}

fn same_release(a: &Version, b: &Version) -> bool {
    a.major == b.major && a.minor == b.minor && a.patch == b.patch && a.pre == b.pre
}

fn below(version: &Version, upper: Option<Version>) -> bool {
    upper.is_none_or(|upper| *version < upper)
}

impl Comparator {
    #[must_use]
    pub const fn partial(&self) -> Option<&PartialVersion> {
        match self {
            Self::Exact(p)
            | Self::GreaterThan(p)
            | Self::GreaterThanOrEqual(p)
            | Self::LessThan(p)
            | Self::LessThanOrEqual(p)
            | Self::Compatible(p)
            | Self::Tilde(p) => Some(p),
            Self::Wildcard => None,
        }
    }

    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Exact(p) => {
                if p.is_complete() {
                    same_release(version, &p.lower())
                } else {
                    *version >= p.lower() && below(version, p.upper())
                }
            }
            Self::GreaterThan(p) => {
                if p.is_complete() {
                    *version > p.lower()
                } else {
                    // >1.2 := >=1.3.0
                    p.upper().is_some_and(|upper| *version >= upper)
                }
            }
            Self::GreaterThanOrEqual(p) => *version >= p.lower(),
            Self::LessThan(p) => *version < p.lower(),
            Self::LessThanOrEqual(p) => {
                if p.is_complete() {
                    *version <= p.lower()
                } else {
                    below(version, p.upper())
                }
            }
            Self::Compatible(p) => {
                // ^1.2.3 := >=1.2.3 <2.0.0 (Same major version)
                // ^0.2.3 := >=0.2.3 <0.3.0 (Same minor version if major is 0)
                // ^0.0.3 := >=0.0.3 <0.0.4 (Same patch version if major and minor are 0)
                let lower = p.lower();
                if *version < lower {
                    return false;
                }
                let Some(major) = p.major else {
                    return true;
                };
                match (p.minor, p.patch) {
                    _ if major > 0 => version.major == major,
                    (None, _) => version.major == 0,
                    (Some(minor), _) if minor > 0 => {
                        version.major == 0 && version.minor == minor
                    }
                    (Some(_), None) => version.major == 0 && version.minor == 0,
                    (Some(_), Some(patch)) => {
                        version.major == 0 && version.minor == 0 && version.patch == patch
                    }
                }
            }
            Self::Tilde(p) => {
                // ~1.2.3 := >=1.2.3 <1.3.0 (Same major and minor version)
                // ~1.2 := >=1.2.0 <1.3.0
                // ~1 := >=1.0.0 <2.0.0
                if *version < p.lower() {
                    return false;
                }
                match (p.major, p.minor) {
                    (None, _) => true,
                    (Some(major), None) => version.major == major,
                    (Some(major), Some(minor)) => {
                        version.major == major && version.minor == minor
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Range {
    pub comparators: Vec<Comparator>,
}

impl Range {
    #[must_use]
    pub const fn new(comparators: Vec<Comparator>) -> Self {
        Self { comparators }
    }

    /// A pre-release only matches when some comparator of this clause names
    /// a pre-release of the same `major.minor.patch`.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        if !self.comparators.iter().all(|comp| comp.matches(version)) {
            return false;
        }
        version.pre.is_empty() || self.admits_prerelease_of(version)
    }

    fn admits_prerelease_of(&self, version: &Version) -> bool {
        self.comparators
            .iter()
            .filter_map(Comparator::partial)
            .filter(|p| !p.pre.is_empty())
            .any(|p| {
                p.major == Some(version.major)
                    && p.minor == Some(version.minor)
                    && p.patch == Some(version.patch)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version_utils::parse_partial;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn p(s: &str) -> PartialVersion {
        parse_partial(s).unwrap()
    }

    #[test]
    fn test_caret_same_major() {
        let caret = Comparator::Compatible(p("1.2.3"));
        assert!(caret.matches(&v("1.2.3")));
        assert!(caret.matches(&v("1.9.0")));
        assert!(!caret.matches(&v("2.0.0")));
        assert!(!caret.matches(&v("1.2.2")));
    }

    #[test]
    fn test_caret_zero_major() {
        let caret = Comparator::Compatible(p("0.2.3"));
        assert!(caret.matches(&v("0.2.9")));
        assert!(!caret.matches(&v("0.3.0")));

        let caret = Comparator::Compatible(p("0.0.3"));
        assert!(caret.matches(&v("0.0.3")));
        assert!(!caret.matches(&v("0.0.4")));
    }

    #[test]
    fn test_tilde() {
        assert!(Comparator::Tilde(p("1.2.3")).matches(&v("1.2.9")));
        assert!(!Comparator::Tilde(p("1.2.3")).matches(&v("1.3.0")));
        assert!(Comparator::Tilde(p("1")).matches(&v("1.7.0")));
        assert!(!Comparator::Tilde(p("1")).matches(&v("2.0.0")));
    }

    #[test]
    fn test_partial_exact_and_bounds() {
        assert!(Comparator::Exact(p("1.x")).matches(&v("1.4.2")));
        assert!(!Comparator::Exact(p("1.x")).matches(&v("2.0.0")));
        assert!(Comparator::GreaterThan(p("1.2")).matches(&v("1.3.0")));
        assert!(!Comparator::GreaterThan(p("1.2")).matches(&v("1.2.9")));
        assert!(Comparator::LessThanOrEqual(p("1.2")).matches(&v("1.2.9")));
        assert!(!Comparator::LessThan(p("1.2")).matches(&v("1.2.0")));
    }

    #[test]
    fn test_range_requires_all_comparators() {
        let range = Range::new(vec![
            Comparator::GreaterThanOrEqual(p("1.0.0")),
            Comparator::LessThan(p("2.0.0")),
        ]);
        assert!(range.matches(&v("1.5.0")));
        assert!(!range.matches(&v("2.0.0")));
    }

    #[test]
    fn test_prerelease_needs_same_tuple_in_clause() {
        let range = Range::new(vec![Comparator::Compatible(p("1.0.0-beta.1"))]);
        assert!(range.matches(&v("1.0.0-beta.2")));
        assert!(range.matches(&v("1.4.0")));
        assert!(!range.matches(&v("1.5.0-rc.1")));

        let range = Range::new(vec![
            Comparator::GreaterThanOrEqual(p("1.0.0")),
            Comparator::LessThan(p("2.0.0-0")),
        ]);
        assert!(range.matches(&v("1.4.0")));
        assert!(!range.matches(&v("1.5.0-beta")));
        assert!(!range.matches(&v("2.0.0-alpha")));
    }

    #[test]
    fn test_wildcard_range_skips_prereleases() {
        let range = Range::new(vec![Comparator::Wildcard]);
        assert!(range.matches(&v("3.0.0")));
        assert!(!range.matches(&v("3.0.0-rc.1")));
    }
}
