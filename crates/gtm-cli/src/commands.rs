use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gtm")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "A command line tool whose commands are versioned plugin packages", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,
    /// Run plugins from this directory instead of the managed cache
    #[arg(short = 't', long = "target-path", global = true, value_name = "PATH")]
    pub target_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initializes a new project or component from a template
    Init {
        /// Name of the project to create
        #[arg(value_name = "projectName")]
        project_name: Option<String>,
        /// Initialize even when the target directory is not empty
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// Lists the plugin commands and the packages behind them
    Commands,
    #[command(external_subcommand)]
    External(Vec<String>),
}
