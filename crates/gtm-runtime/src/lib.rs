pub mod host;
pub mod launcher;

pub use host::HostRuntime;
pub use launcher::{LaunchRequest, Launcher, ProcessLauncher};
