use async_trait::async_trait;
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};

use gtm_constants::BIN_NAME;
use gtm_core::{
    CliContext, CommandArgs, CommandInvocation, CommandLifecycle, Dispatcher, notify_self_update,
    run_command,
};
use gtm_error::{CliError, Result};
use gtm_logger;

/// A command whose work is done by a plugin package in a child process.
pub struct PluginCommand<'a> {
    name: String,
    ctx: &'a CliContext,
    dispatcher: Dispatcher,
    invocation: CommandInvocation,
}

impl<'a> PluginCommand<'a> {
    #[must_use]
    pub fn new(ctx: &'a CliContext, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ctx,
            dispatcher: Dispatcher::new(ctx),
            invocation: CommandInvocation::new(name),
        }
    }

    fn metadata(&self) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("name".to_string(), json!(self.name));
        if let Some(entry) = self.dispatcher.table().lookup(&self.name) {
            metadata.insert("description".to_string(), json!(entry.description));
            metadata.insert("package".to_string(), json!(entry.package));
        }
        metadata
    }

    fn banner(&self) -> String {
        format!("{} {}", BIN_NAME.bright_cyan().bold(), self.name.bright_white())
    }
}

#[async_trait]
impl CommandLifecycle for PluginCommand<'_> {
    async fn check_environment(&mut self) -> Result<()> {
        let table = self.dispatcher.table();
        if table.lookup(&self.name).is_none() {
            return Err(CliError::UnknownCommand(self.name.clone(), table.names()));
        }
        self.ctx.runtime.check().await
    }

    async fn normalize_arguments(&mut self, args: CommandArgs) -> Result<()> {
        self.invocation.raw_argument = args.raw_argument;
        self.invocation.options = args.options;
        self.invocation.metadata = self.metadata();
        Ok(())
    }

    async fn init(&mut self) -> Result<()> {
        notify_self_update(self.ctx).await;
        gtm_logger::info(&self.banner());
        Ok(())
    }

    async fn exec(&mut self) -> Result<i32> {
        let invocation = std::mem::take(&mut self.invocation);
        gtm_logger::verbose("command", &invocation.command_name);
        self.dispatcher.dispatch(invocation).await
    }
}

pub struct PluginHandler;

impl PluginHandler {
    /// Runs the lifecycle and maps the outcome to a process exit code.
    pub async fn run(ctx: &CliContext, name: &str, args: CommandArgs) -> i32 {
        let mut command = PluginCommand::new(ctx, name);
        run_command(&mut command, args).await.unwrap_or(1)
    }

    /// Splits the raw words after an unknown subcommand into the first
    /// positional argument and `--flag[=value]` options.
    #[must_use]
    pub fn parse_external_args(words: &[String]) -> CommandArgs {
        let mut args = CommandArgs::default();
        for word in words {
            if let Some(flag) = word.strip_prefix("--").filter(|flag| !flag.is_empty()) {
                let (key, value) = match flag.split_once('=') {
                    Some((key, value)) => (key, json!(value)),
                    None => (flag, json!(true)),
                };
                args.options.insert(key.to_string(), value);
            } else if args.raw_argument.is_none() {
                args.raw_argument = Some(word.clone());
            }
        }
        args
    }
}
