use serde_json::{Map, Value};
use std::sync::Arc;

use gtm_constants::COMMANDS;
use gtm_error::{CliError, Result};
use gtm_logger;
use gtm_project::locate_entry;
use gtm_registry::{RegistryClient, VersionSource};
use gtm_runtime::{LaunchRequest, Launcher, ProcessLauncher};
use gtm_store::StoreLocation;
use gtm_utils::format_path;

use crate::command_context::CommandContext;
use crate::context::CliContext;
use crate::installer::{Installer, TarballInstaller};
use crate::package::{PackageRef, PackageStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub package: String,
    pub description: String,
}

/// Maps command names to the plugin packages that implement them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    #[must_use]
    pub fn new(entries: &[(&str, &str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, package, description)| CommandEntry {
                    name: (*name).to_string(),
                    package: (*package).to_string(),
                    description: (*description).to_string(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(COMMANDS)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }
}

/// A typed command, as captured by the front end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandInvocation {
    pub command_name: String,
    pub raw_argument: Option<String>,
    pub options: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

impl CommandInvocation {
    #[must_use]
    pub fn new(command_name: &str) -> Self {
        Self {
            command_name: command_name.to_string(),
            ..Self::default()
        }
    }
}

/// Turns a command name into a running plugin process.
pub struct Dispatcher {
    table: CommandTable,
    location: StoreLocation,
    versions: Arc<dyn VersionSource>,
    installer: Arc<dyn Installer>,
    launcher: Arc<dyn Launcher>,
    runtime: Option<String>,
}

impl Dispatcher {
    /// Registry-backed dispatcher for the built-in command table.
    #[must_use]
    pub fn new(ctx: &CliContext) -> Self {
        let registry = Arc::new(RegistryClient::new(&ctx.registry));
        Self::with_parts(
            CommandTable::builtin(),
            ctx.store_location(),
            Arc::<RegistryClient>::clone(&registry),
            Arc::new(TarballInstaller::new(registry)),
            Arc::new(ProcessLauncher),
            ctx.runtime.program.clone(),
        )
    }

    #[must_use]
    pub fn with_parts(
        table: CommandTable,
        location: StoreLocation,
        versions: Arc<dyn VersionSource>,
        installer: Arc<dyn Installer>,
        launcher: Arc<dyn Launcher>,
        runtime: Option<String>,
    ) -> Self {
        Self {
            table,
            location,
            versions,
            installer,
            launcher,
            runtime,
        }
    }

    #[must_use]
    pub const fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Runs the plugin behind `invocation` and returns its exit code.
    pub async fn dispatch(&self, invocation: CommandInvocation) -> Result<i32> {
        let entry = self.table.lookup(&invocation.command_name).ok_or_else(|| {
            CliError::UnknownCommand(invocation.command_name.clone(), self.table.names())
        })?;

        let mut pkg = PackageRef::from_spec(&entry.package);
        let store = PackageStore::new(
            self.location.clone(),
            Arc::clone(&self.versions),
            Arc::clone(&self.installer),
        );

        let package_dir = if self.location.is_override() {
            gtm_logger::verbose("targetPath", &format_path(&self.location.target_path));
            self.location.target_path.clone()
        } else {
            let store_dir = self.location.store_dir.as_deref().map(format_path);
            gtm_logger::verbose("targetPath", &format_path(&self.location.target_path));
            gtm_logger::verbose("storeDir", store_dir.as_deref().unwrap_or_default());
            if store.exists(&mut pkg).await? {
                store.update(&mut pkg).await?
            } else {
                store.install(&mut pkg, None).await?
            }
        };

        let entry_file = locate_entry(&package_dir)
            .ok_or_else(|| CliError::NoEntryPoint(format_path(&package_dir)))?;
        gtm_logger::verbose("rootFile", &entry_file);

        let context = CommandContext::new(
            &invocation.command_name,
            invocation.raw_argument,
            invocation.options,
            &invocation.metadata,
        );
        let request = LaunchRequest {
            runtime: self.runtime.clone(),
            entry: entry_file,
            context_json: context.to_json()?,
            cwd: None,
        };

        self.launcher.launch(&request).await
    }
}
