pub mod commands;
pub mod handlers;

use anyhow::Context;
use clap::Parser;
use serde_json::{Map, json};

use commands::{Cli, Commands};
use gtm_core::{CliContext, CommandArgs, CommandTable, ContextOverrides};
use handlers::{CommandsHandler, HelpHandler, PluginHandler};

/// Parses the command line, runs it and returns the process exit code.
#[must_use]
pub fn run_cli() -> i32 {
    let cli = Cli::parse();

    let overrides = ContextOverrides {
        debug: cli.debug,
        target_path: cli.target_path.clone(),
    };
    let ctx = match CliContext::load(&overrides) {
        Ok(ctx) => ctx,
        Err(e) => {
            gtm_logger::init_logger(false, cli.debug);
            gtm_logger::error_with_detail(&e);
            return 1;
        }
    };
    gtm_logger::init_logger(false, ctx.verbose);

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            gtm_logger::error(&format!("{e:#}"));
            return 1;
        }
    };

    runtime.block_on(run(cli.command, &ctx))
}

fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")
}

async fn run(command: Option<Commands>, ctx: &CliContext) -> i32 {
    match command {
        None => {
            HelpHandler::show_help();
            0
        }
        Some(Commands::Commands) => {
            CommandsHandler::list(&CommandTable::builtin());
            0
        }
        Some(Commands::Init {
            project_name,
            force,
        }) => {
            let mut options = Map::new();
            options.insert("force".to_string(), json!(force));
            let args = CommandArgs {
                raw_argument: project_name,
                options,
            };
            PluginHandler::run(ctx, "init", args).await
        }
        Some(Commands::External(words)) => {
            let Some((name, rest)) = words.split_first() else {
                HelpHandler::show_help();
                return 0;
            };
            PluginHandler::run(ctx, name, PluginHandler::parse_external_args(rest)).await
        }
    }
}
