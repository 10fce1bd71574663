pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "A command line tool whose commands are versioned plugin packages";
pub const BIN_NAME: &str = "gtm";
/// Registry name of the CLI itself, used for the update notification.
pub const SELF_PACKAGE_NAME: &str = "@gtm-cli/core";

/// Command name, plugin package spec, description.
pub const COMMANDS: &[(&str, &str, &str)] = &[(
    "init",
    "@gtm-cli/init@latest",
    "Initializes a new project or component from a template",
)];

pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";
pub const DEFAULT_CLI_HOME: &str = ".gtm-cli";
pub const CACHE_DIR: &str = "dependencies";
pub const STORE_DIR: &str = "node_modules";
pub const LOCK_DIR: &str = ".locks";
pub const MANIFEST_FILE: &str = "package.json";
pub const DOTENV_FILE: &str = ".env";

pub const DEFAULT_RUNTIME: &str = "node";
pub const LOWEST_RUNTIME_VERSION: &str = "13.0.0";

pub const ENV_CLI_HOME: &str = "GTM_CLI_HOME";
pub const ENV_TARGET_PATH: &str = "GTM_TARGET_PATH";
pub const ENV_LOG_LEVEL: &str = "GTM_LOG_LEVEL";
pub const ENV_REGISTRY: &str = "GTM_REGISTRY";
pub const ENV_RUNTIME: &str = "GTM_RUNTIME";
pub const ENV_RUNTIME_MIN_VERSION: &str = "GTM_RUNTIME_MIN_VERSION";
pub const ENV_SKIP_UPDATE_CHECK: &str = "GTM_SKIP_UPDATE_CHECK";
pub const VERBOSE_LEVEL: &str = "verbose";

pub const USER_AGENT: &str = concat!("gtm/", env!("CARGO_PKG_VERSION"));
pub const MAX_ATTEMPTS: u32 = 4;
pub const REQUEST_TIMEOUT_SECS: u64 = 45;
pub const CONNECT_TIMEOUT_SECS: u64 = 20;

pub const EXAMPLES: &[(&str, &str)] = &[
    ("gtm init my-app", "Create a project named my-app"),
    ("gtm init --force", "Initialize into a non-empty directory"),
    ("gtm --debug init", "Run with verbose logging"),
    (
        "gtm --target-path ./local/init init",
        "Run a plugin from a local checkout",
    ),
    ("gtm commands", "List the available plugin commands"),
];
