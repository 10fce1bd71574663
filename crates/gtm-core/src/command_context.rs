use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gtm_error::{CliError, Result};

const STRIPPED_KEYS: &[&str] = &["parent", "commands", "options"];
const SECRET_MARKERS: &[&str] = &["token", "password", "secret"];

/// What a plugin process receives as its single JSON argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandContext {
    pub command_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_argument: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl CommandContext {
    /// Copies only the public fields of `metadata`.
    #[must_use]
    pub fn new(
        command_name: &str,
        raw_argument: Option<String>,
        options: Map<String, Value>,
        metadata: &Map<String, Value>,
    ) -> Self {
        Self {
            command_name: command_name.to_string(),
            raw_argument,
            options,
            metadata: sanitize_metadata(metadata),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CliError::Config(format!("cannot serialize command context: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CliError::Config(format!("invalid command context: {e}")))
    }

    /// Decodes the context a host passed to this process, given the full
    /// argv (program name first).
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let json = args
            .into_iter()
            .nth(1)
            .ok_or_else(|| CliError::Config("missing command context argument".to_string()))?;
        Self::from_json(&json)
    }
}

fn is_public_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    !key.starts_with('_')
        && !STRIPPED_KEYS.contains(&key)
        && !SECRET_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Drops private, back-reference and credential-looking keys.
#[must_use]
pub fn sanitize_metadata(metadata: &Map<String, Value>) -> Map<String, Value> {
    metadata
        .iter()
        .filter(|(key, _)| is_public_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
