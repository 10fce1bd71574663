use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

use gtm_error::{CliError, Result};
use gtm_logger;

/// Positional argument and options as captured from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    pub raw_argument: Option<String>,
    pub options: Map<String, Value>,
}

/// The contract every plugin-hosting command follows. [`run_command`]
/// drives the hooks in declaration order.
#[async_trait]
pub trait CommandLifecycle: Send {
    async fn check_environment(&mut self) -> Result<()>;

    async fn normalize_arguments(&mut self, args: CommandArgs) -> Result<()>;

    async fn init(&mut self) -> Result<()> {
        Err(CliError::NotImplemented("init".to_string()))
    }

    /// Returns the exit code for the process.
    async fn exec(&mut self) -> Result<i32> {
        Err(CliError::NotImplemented("exec".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckEnvironment,
    NormalizeArguments,
    Init,
    Exec,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CheckEnvironment => "check_environment",
            Self::NormalizeArguments => "normalize_arguments",
            Self::Init => "init",
            Self::Exec => "exec",
        })
    }
}

#[derive(Debug)]
pub struct CommandFailure {
    pub stage: Stage,
    pub error: CliError,
}

impl CommandFailure {
    fn at(stage: Stage) -> impl FnOnce(CliError) -> Self {
        move |error| Self { stage, error }
    }
}

/// Runs the hooks in order, stopping at the first failure. The failure is
/// logged here and handed back for the caller to pick an exit status.
pub async fn run_command<C>(
    command: &mut C,
    args: CommandArgs,
) -> std::result::Result<i32, CommandFailure>
where
    C: CommandLifecycle + ?Sized,
{
    let outcome = run_stages(command, args).await;
    if let Err(failure) = &outcome {
        gtm_logger::verbose("stage", &failure.stage.to_string());
        gtm_logger::error_with_detail(&failure.error);
    }
    outcome
}

async fn run_stages<C>(
    command: &mut C,
    args: CommandArgs,
) -> std::result::Result<i32, CommandFailure>
where
    C: CommandLifecycle + ?Sized,
{
    command
        .check_environment()
        .await
        .map_err(CommandFailure::at(Stage::CheckEnvironment))?;
    command
        .normalize_arguments(args)
        .await
        .map_err(CommandFailure::at(Stage::NormalizeArguments))?;
    command.init().await.map_err(CommandFailure::at(Stage::Init))?;
    command.exec().await.map_err(CommandFailure::at(Stage::Exec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        fail_at: Option<&'static str>,
        args: Option<CommandArgs>,
    }

    impl Recorder {
        fn step(&mut self, name: &'static str) -> Result<()> {
            self.calls.push(name);
            if self.fail_at == Some(name) {
                return Err(CliError::EnvironmentCheck(format!("{name} failed")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CommandLifecycle for Recorder {
        async fn check_environment(&mut self) -> Result<()> {
            self.step("check_environment")
        }

        async fn normalize_arguments(&mut self, args: CommandArgs) -> Result<()> {
            self.args = Some(args);
            self.step("normalize_arguments")
        }

        async fn init(&mut self) -> Result<()> {
            self.step("init")
        }

        async fn exec(&mut self) -> Result<i32> {
            self.step("exec")?;
            Ok(7)
        }
    }

    /// Implements only the required hooks.
    struct Bare;

    #[async_trait]
    impl CommandLifecycle for Bare {
        async fn check_environment(&mut self) -> Result<()> {
            Ok(())
        }

        async fn normalize_arguments(&mut self, _args: CommandArgs) -> Result<()> {
            Ok(())
        }
    }

    /// Sets up but never runs.
    struct InitOnly;

    #[async_trait]
    impl CommandLifecycle for InitOnly {
        async fn check_environment(&mut self) -> Result<()> {
            Ok(())
        }

        async fn normalize_arguments(&mut self, _args: CommandArgs) -> Result<()> {
            Ok(())
        }

        async fn init(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_hooks_run_in_order() {
        let mut command = Recorder::default();
        let args = CommandArgs {
            raw_argument: Some("my-app".to_string()),
            options: Map::new(),
        };

        let code = run_command(&mut command, args.clone()).await.unwrap();

        assert_eq!(code, 7);
        assert_eq!(
            command.calls,
            vec!["check_environment", "normalize_arguments", "init", "exec"]
        );
        assert_eq!(command.args, Some(args));
    }

    #[tokio::test]
    async fn test_first_failure_short_circuits() {
        let mut command = Recorder {
            fail_at: Some("check_environment"),
            ..Recorder::default()
        };

        let failure = run_command(&mut command, CommandArgs::default())
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::CheckEnvironment);
        assert!(matches!(failure.error, CliError::EnvironmentCheck(_)));
        assert_eq!(command.calls, vec!["check_environment"]);
    }

    #[tokio::test]
    async fn test_default_init_is_not_implemented() {
        let failure = run_command(&mut Bare, CommandArgs::default())
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Init);
        assert!(matches!(failure.error, CliError::NotImplemented(ref hook) if hook == "init"));
    }

    #[tokio::test]
    async fn test_default_exec_is_not_implemented() {
        let failure = run_command(&mut InitOnly, CommandArgs::default())
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Exec);
        assert!(matches!(failure.error, CliError::NotImplemented(ref hook) if hook == "exec"));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let mut command: Box<dyn CommandLifecycle> = Box::new(Recorder::default());
        let code = run_command(command.as_mut(), CommandArgs::default())
            .await
            .unwrap();
        assert_eq!(code, 7);
    }
}
