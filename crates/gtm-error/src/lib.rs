use std::fmt;

#[derive(Debug)]
pub enum CliError {
    RegistryUnavailable(String, String),
    NoMatchingVersion(String, String),
    InstallFailed(String, String, String),
    UnknownCommand(String, Vec<String>),
    NoEntryPoint(String),
    NotImplemented(String),
    EnvironmentCheck(String),
    SpawnFailed(String, String),
    LockFailed(String, String),
    Config(String),
    IoError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryUnavailable(name, reason) => {
                write!(f, "Registry unavailable while looking up '{name}': {reason}")
            }
            Self::NoMatchingVersion(name, constraint) => {
                write!(f, "No published version of {name} satisfies '{constraint}'")
            }
            Self::InstallFailed(name, version, reason) => {
                write!(f, "Failed to install {name}@{version}: {reason}")
            }
            Self::UnknownCommand(command, available) => {
                write!(
                    f,
                    "Unknown command `{command}`, available commands: `{}`",
                    available.join(",")
                )
            }
            Self::NoEntryPoint(path) => {
                write!(f, "No entry point found for package at {path}")
            }
            Self::NotImplemented(hook) => {
                write!(f, "Command hook `{hook}` must be implemented")
            }
            Self::EnvironmentCheck(msg) => {
                write!(f, "Environment check failed: {msg}")
            }
            Self::SpawnFailed(program, reason) => {
                write!(f, "Failed to start `{program}`: {reason}")
            }
            Self::LockFailed(path, reason) => {
                write!(f, "Failed to lock cache entry {path}: {reason}")
            }
            Self::Config(msg) => {
                write!(f, "Configuration error: {msg}")
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::IoError(format!("{err:#}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
