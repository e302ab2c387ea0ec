//! duke exec: run one command line and exit.

use std::path::PathBuf;

use crate::error::{exit_codes, Result};
use crate::output::{emit_response, OutputOptions};
use crate::session::Duke;

/// Options for `duke exec`
pub struct ExecOptions {
    pub data_path: PathBuf,
    pub words: Vec<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: ExecOptions) -> Result<i32> {
    let mut duke = Duke::open(&options.data_path)?;
    let line = options.words.join(" ");
    let response = duke.handle(&line)?;

    emit_response(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "exec",
        &line,
        &response,
        duke.tasks().tasks(),
    )?;

    if response.is_error() {
        Ok(exit_codes::USER_ERROR)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}
