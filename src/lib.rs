//! duke - Personal Task Tracker Library
//!
//! This library provides the core functionality for the duke assistant:
//! turning one line of user input into a command, applying it to an
//! ordered task list, and mirroring every change into a plain text file.
//!
//! # Core Concepts
//!
//! - **Tasks**: to-dos, deadlines (with a date) and events (with a time window)
//! - **Task list**: ordered, addressed by 1-based position
//! - **Storage**: one encoded task per line, rewritten after every change
//! - **Session**: the dispatcher a shell feeds input lines to
//!
//! # Module Organization
//!
//! - `cli`: Command-line shells using clap
//! - `command`: Input parsing and command execution
//! - `config`: Configuration loading from `duke.toml`
//! - `error`: Error types and result aliases
//! - `output`: Response framing and JSON output
//! - `session`: The dispatcher owning list and storage
//! - `storage`: Task file reading and writing
//! - `task`: Task variants and their encoding
//! - `task_list`: Ordered task collection

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod storage;
pub mod task;
pub mod task_list;

pub use error::{Error, Result};
pub use session::{Duke, Response};
