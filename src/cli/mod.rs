//! Command-line interface for duke
//!
//! This module defines the CLI structure using clap derive macros.
//! Each shell is defined in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;

mod chat;
mod exec;

pub use chat::run_loop;

/// Duke - your personal task tracker
///
/// Add to-dos, deadlines and events, mark them done, and find them again.
/// Tasks are kept in a plain text file between runs.
#[derive(Parser, Debug)]
#[command(name = "duke")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task file (defaults to data/duke.txt)
    #[arg(long, global = true, env = "DUKE_DATA")]
    pub data: Option<PathBuf>,

    /// Path to the configuration file (defaults to ./duke.toml)
    #[arg(long, global = true, env = "DUKE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format (exec only)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (default)
    Chat,

    /// Run a single command, e.g. `duke exec todo read book`
    Exec {
        /// The command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

impl Cli {
    /// Run the selected shell and return the process exit code.
    pub fn run(self) -> Result<i32> {
        let config = load_config(self.config.as_deref())?;
        let data_path = config.data_path(self.data.as_deref());
        tracing::debug!(data = %data_path.display(), "using task file");

        match self.command.unwrap_or(Commands::Chat) {
            Commands::Chat => chat::run(chat::ChatOptions {
                data_path,
                console: config.console,
                quiet: self.quiet,
            }),
            Commands::Exec { words } => exec::run(exec::ExecOptions {
                data_path,
                words,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}

/// An explicit config path must exist; the default one is optional.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(CONFIG_FILE)),
    }
}
