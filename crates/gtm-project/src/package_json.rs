use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The subset of `package.json` a plugin host cares about. Everything else
/// is carried through untouched.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PackageJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    // Catch-all for other fields to preserve them
    #[serde(flatten)]
    pub other: IndexMap<String, serde_json::Value>,
}

impl PackageJson {
    /// Declared entry module, ignoring blank values.
    #[must_use]
    pub fn main_entry(&self) -> Option<&str> {
        self.main
            .as_deref()
            .map(str::trim)
            .filter(|main| !main.is_empty())
    }
}
