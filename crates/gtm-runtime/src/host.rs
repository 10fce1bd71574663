use semver::Version;
use tokio::process::Command;

use gtm_error::{CliError, Result};
use gtm_logger;

/// The program plugin entries are handed to, e.g. `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRuntime {
    /// `None` runs the entry file itself as the executable.
    pub program: Option<String>,
    pub min_version: Option<Version>,
}

impl HostRuntime {
    #[must_use]
    pub const fn new(program: Option<String>, min_version: Option<Version>) -> Self {
        Self {
            program,
            min_version,
        }
    }

    /// Parses `--version` output such as `v18.17.1`.
    #[must_use]
    pub fn parse_version_output(output: &str) -> Option<Version> {
        let line = output.lines().map(str::trim).find(|line| !line.is_empty())?;
        let candidate = line
            .split_whitespace()
            .map(|word| word.trim_start_matches('v'))
            .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))?;
        Version::parse(candidate).ok()
    }

    pub async fn detect_version(&self) -> Result<Option<Version>> {
        let Some(program) = &self.program else {
            return Ok(None);
        };

        let output = Command::new(program)
            .arg("--version")
            .output()
            .await
            .map_err(|e| {
                CliError::EnvironmentCheck(format!("cannot run `{program} --version`: {e}"))
            })?;

        Ok(Self::parse_version_output(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    /// Fails when the runtime is older than `min_version`. Runtimes without
    /// a minimum are not probed.
    pub async fn check(&self) -> Result<()> {
        let (Some(program), Some(lowest)) = (&self.program, &self.min_version) else {
            return Ok(());
        };

        let current = self.detect_version().await?.ok_or_else(|| {
            CliError::EnvironmentCheck(format!("could not determine the `{program}` version"))
        })?;
        gtm_logger::verbose("runtime", &format!("{program} {current}"));

        if current < *lowest {
            return Err(CliError::EnvironmentCheck(format!(
                "gtm needs {program} version >= {lowest}, found {current}"
            )));
        }
        Ok(())
    }
}
