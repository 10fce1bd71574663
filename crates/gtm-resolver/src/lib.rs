pub mod comparators;
pub mod range;
pub mod select;
pub mod version_utils;

pub use comparators::{Comparator, Range};
pub use range::parse_npm_semver_ranges;
pub use select::{VersionConstraint, max_version, select_range, select_version};
pub use version_utils::{PartialVersion, parse_partial, parse_partial_version};
