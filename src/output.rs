//! Shared output formatting for duke shells.

use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::session::Response;
use crate::task::Task;

pub const SCHEMA_VERSION: &str = "duke.v1";

pub const GREETING: &str = "Hello! I'm Duke\nWhat can I do for you?";

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Frame a response between dividers, indenting every line.
pub fn frame(divider: &str, text: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{INDENT}{divider}"));
    for line in text.lines() {
        lines.push(format!("{INDENT}{line}"));
    }
    lines.push(format!("{INDENT}{divider}"));
    lines.join("\n")
}

/// Write a framed response to `out`.
pub fn write_framed<W: Write>(out: &mut W, divider: &str, text: &str) -> Result<()> {
    writeln!(out, "{}", frame(divider, text))?;
    out.flush()?;
    Ok(())
}

/// Print the outcome of a one-shot command.
pub fn emit_response(
    options: OutputOptions,
    command: &str,
    input: &str,
    response: &Response,
    tasks: &[Task],
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Data<'a> {
            input: &'a str,
            response: &'a Response,
            tasks: &'a [Task],
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: Data<'a>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: if response.is_error() {
                "rejected"
            } else {
                "success"
            },
            data: Data {
                input,
                response,
                tasks,
            },
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet && !response.is_error() {
        return Ok(());
    }

    if response.is_error() {
        eprintln!("{}", response.text);
    } else {
        println!("{}", response.text);
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = error_hint(err);
    if json {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            message: &'a str,
            code: i32,
            kind: &'static str,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: ErrorBody<'a>,
            #[serde(skip_serializing_if = "Option::is_none")]
            hint: Option<&'a str>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: &err.to_string(),
                code: err.exit_code(),
                kind: err.kind(),
            },
            hint,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn infer_command_name_from_args() -> String {
    command_name(std::env::args().skip(1))
}

/// First subcommand name among `args`; option values are skipped over.
fn command_name<I: IntoIterator<Item = String>>(args: I) -> String {
    args.into_iter()
        .find(|arg| matches!(arg.as_str(), "chat" | "exec"))
        .unwrap_or_else(|| "chat".to_string())
}

fn error_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::Io(_) => Some("check that the task file and its directory are writable (--data)"),
        Error::InvalidConfig(_) | Error::TomlParse(_) => Some("fix duke.toml then retry"),
        _ => None,
    }
}
