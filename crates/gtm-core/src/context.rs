use semver::Version;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gtm_constants::{
    DEFAULT_CLI_HOME, DEFAULT_REGISTRY, DEFAULT_RUNTIME, DOTENV_FILE, ENV_CLI_HOME,
    ENV_LOG_LEVEL, ENV_REGISTRY, ENV_RUNTIME, ENV_RUNTIME_MIN_VERSION, ENV_SKIP_UPDATE_CHECK,
    ENV_TARGET_PATH, LOWEST_RUNTIME_VERSION, VERBOSE_LEVEL,
};
use gtm_error::{CliError, Result};
use gtm_runtime::HostRuntime;
use gtm_store::StoreLocation;

/// Values supplied on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    pub debug: bool,
    pub target_path: Option<PathBuf>,
}

/// Everything the core needs to know about its environment. Built once at
/// startup and only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub home: PathBuf,
    pub cli_home: PathBuf,
    pub target_path: Option<PathBuf>,
    pub registry: String,
    pub verbose: bool,
    pub update_check: bool,
    pub runtime: HostRuntime,
}

impl CliContext {
    /// Reads the user home, `~/.env` and the process environment.
    pub fn load(overrides: &ContextOverrides) -> Result<Self> {
        let home = dirs::home_dir()
            .filter(|home| home.is_dir())
            .ok_or_else(|| CliError::Config("user home directory does not exist".to_string()))?;

        let mut vars = read_dotenv(&home.join(DOTENV_FILE));
        vars.extend(std::env::vars());

        Self::from_vars(home, &vars, overrides)
    }

    pub fn from_vars(
        home: PathBuf,
        vars: &HashMap<String, String>,
        overrides: &ContextOverrides,
    ) -> Result<Self> {
        let var = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let cli_home = home.join(var(ENV_CLI_HOME).unwrap_or(DEFAULT_CLI_HOME));

        let target_path = overrides
            .target_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| var(ENV_TARGET_PATH).map(PathBuf::from));

        let verbose = overrides.debug || var(ENV_LOG_LEVEL) == Some(VERBOSE_LEVEL);

        let runtime = match var(ENV_RUNTIME) {
            None => HostRuntime::new(
                Some(DEFAULT_RUNTIME.to_string()),
                Some(parse_min_version(
                    var(ENV_RUNTIME_MIN_VERSION).unwrap_or(LOWEST_RUNTIME_VERSION),
                )?),
            ),
            Some("none") => HostRuntime::new(None, None),
            Some(program) => HostRuntime::new(
                Some(program.to_string()),
                var(ENV_RUNTIME_MIN_VERSION)
                    .map(parse_min_version)
                    .transpose()?,
            ),
        };

        Ok(Self {
            home,
            cli_home,
            target_path,
            registry: var(ENV_REGISTRY).unwrap_or(DEFAULT_REGISTRY).to_string(),
            verbose,
            update_check: var(ENV_SKIP_UPDATE_CHECK).is_none(),
            runtime,
        })
    }

    /// Override mode when a target path is configured, the managed cache
    /// under `cli_home` otherwise.
    #[must_use]
    pub fn store_location(&self) -> StoreLocation {
        self.target_path.as_deref().map_or_else(
            || StoreLocation::managed(&self.cli_home),
            StoreLocation::override_path,
        )
    }
}

fn parse_min_version(raw: &str) -> Result<Version> {
    gtm_resolver::parse_partial_version(raw)
        .map_err(|e| CliError::Config(format!("{ENV_RUNTIME_MIN_VERSION}: {e}")))
}

/// Reads `KEY=value` pairs without exporting them into the process
/// environment. A missing or unreadable file yields nothing.
fn read_dotenv(path: &Path) -> HashMap<String, String> {
    if !path.is_file() {
        return HashMap::new();
    }
    dotenvy::from_path_iter(path)
        .map(|iter| iter.filter_map(std::result::Result::ok).collect())
        .unwrap_or_default()
}
