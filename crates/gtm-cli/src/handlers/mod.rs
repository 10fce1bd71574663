pub mod commands;
pub mod help;
pub mod plugin;

pub use commands::CommandsHandler;
pub use help::HelpHandler;
pub use plugin::{PluginCommand, PluginHandler};
