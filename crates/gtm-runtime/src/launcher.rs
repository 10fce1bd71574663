use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use gtm_error::{CliError, Result};
use gtm_logger;

/// One plugin process: the entry file and its serialized context travel as
/// separate argv entries, never as generated source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub runtime: Option<String>,
    pub entry: String,
    pub context_json: String,
    pub cwd: Option<PathBuf>,
}

impl LaunchRequest {
    #[must_use]
    pub fn program_and_args(&self) -> (String, Vec<String>) {
        match &self.runtime {
            Some(runtime) => (
                runtime.clone(),
                vec![self.entry.clone(), self.context_json.clone()],
            ),
            None => (self.entry.clone(), vec![self.context_json.clone()]),
        }
    }
}

/// Starts a plugin and waits for it, yielding its exit code.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, request: &LaunchRequest) -> Result<i32>;
}

/// Runs plugins as real child processes sharing this process's stdio.
pub struct ProcessLauncher;

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn launch(&self, request: &LaunchRequest) -> Result<i32> {
        let (program, args) = request.program_and_args();
        gtm_logger::verbose("spawn", &format!("{program} {}", request.entry));

        let mut command = Command::new(&program);
        command
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(cwd) = &request.cwd {
            command.current_dir(cwd);
        }

        let mut child = command
            .spawn()
            .map_err(|e| CliError::SpawnFailed(program.clone(), e.to_string()))?;
        let status = child
            .wait()
            .await
            .map_err(|e| CliError::SpawnFailed(program.clone(), e.to_string()))?;

        // Killed by a signal: no code to forward.
        Ok(status.code().unwrap_or(1))
    }
}
