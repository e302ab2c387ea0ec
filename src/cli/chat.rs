//! duke chat: the interactive console shell.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::ConsoleConfig;
use crate::error::{exit_codes, Result};
use crate::output::{write_framed, GREETING};
use crate::session::Duke;

/// Options for `duke chat`
pub struct ChatOptions {
    pub data_path: PathBuf,
    pub console: ConsoleConfig,
    pub quiet: bool,
}

pub fn run(options: ChatOptions) -> Result<i32> {
    let mut duke = Duke::open(&options.data_path)?;
    let mut console = options.console;
    if options.quiet {
        console.greeting = false;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(&mut duke, &console, stdin.lock(), stdout.lock())?;
    Ok(exit_codes::SUCCESS)
}

/// Feed lines from `input` to the session until it exits or input ends.
///
/// Blank lines are ignored. A storage failure stops the loop and is
/// returned to the caller.
pub fn run_loop<R: BufRead, W: Write>(
    duke: &mut Duke,
    console: &ConsoleConfig,
    mut input: R,
    mut output: W,
) -> Result<()> {
    if console.greeting {
        write_framed(&mut output, &console.divider, GREETING)?;
    }

    let mut line = String::new();
    loop {
        if !console.prompt.is_empty() {
            write!(output, "{}", console.prompt)?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("input closed, ending chat");
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let response = duke.handle(&line)?;
        write_framed(&mut output, &console.divider, &response.text)?;
        if response.is_exit() {
            break;
        }
    }

    Ok(())
}
