pub mod command_context;
pub mod context;
pub mod dispatch;
pub mod installer;
pub mod lifecycle;
pub mod package;
pub mod update_check;

pub use command_context::{CommandContext, sanitize_metadata};
pub use context::{CliContext, ContextOverrides};
pub use dispatch::{CommandEntry, CommandInvocation, CommandTable, Dispatcher};
pub use installer::{InstallRequest, Installer, TarballInstaller};
pub use lifecycle::{CommandArgs, CommandFailure, CommandLifecycle, Stage, run_command};
pub use package::{PackageRef, PackageStore};
pub use update_check::{check_self_update, notify_self_update};
