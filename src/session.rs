//! A running assistant session.
//!
//! [`Duke`] owns the task list and its storage. A shell holds one session,
//! passes every input line to [`Duke::handle`], and displays the returned
//! [`Response`] until one of them asks to exit.

use std::path::PathBuf;

use serde::Serialize;

use crate::command::Command;
use crate::error::Result;
use crate::storage::Storage;
use crate::task_list::TaskList;

/// The text produced for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub text: String,
    pub exit: bool,
    /// Set when the input was rejected; the list and file are unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl Response {
    pub fn is_exit(&self) -> bool {
        self.exit
    }

    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }
}

#[derive(Debug)]
pub struct Duke {
    tasks: TaskList,
    storage: Storage,
}

impl Duke {
    /// Open a session backed by the task file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let storage = Storage::new(path);
        let tasks = storage.load()?;
        Ok(Self { tasks, storage })
    }

    /// Handle one line of user input.
    ///
    /// Input errors come back as a response describing the problem. Only
    /// storage failures are returned as `Err`, since the file and the
    /// in-memory list may no longer agree.
    pub fn handle(&mut self, line: &str) -> Result<Response> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) if err.is_user_error() => return Ok(rejected(line, &err)),
            Err(err) => return Err(err),
        };

        let exit = command.is_exit();
        tracing::debug!(?command, "dispatching command");

        match command.execute(&mut self.tasks, &self.storage) {
            Ok(text) => Ok(Response {
                text,
                exit,
                error_kind: None,
            }),
            Err(err) if err.is_user_error() => Ok(rejected(line, &err)),
            Err(err) => {
                tracing::error!(error = %err, "command failed");
                Err(err)
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

fn rejected(line: &str, err: &crate::error::Error) -> Response {
    tracing::debug!(input = line, error = %err, "rejected input");
    Response {
        text: err.to_string(),
        exit: false,
        error_kind: Some(err.kind()),
    }
}
