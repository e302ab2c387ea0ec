//! duke - a command-driven personal task tracker
//!
//! Keeps to-dos, deadlines and events in a plain text file and talks to the
//! user through a simple console chat.

use clap::Parser;
use duke::cli::Cli;
use duke::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Tracing is opt-in via RUST_LOG and goes to stderr, away from the chat.
    // Ignore invalid/huge filters so startup stays robust.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = infer_command_name_from_args();
    let cli = Cli::parse();
    let json = cli.json;
    match cli.run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = emit_error(&command, &err, json);
            std::process::exit(err.exit_code());
        }
    }
}
