//! Storage layer for duke
//!
//! Tasks live in a single UTF-8 text file, one encoded task per line
//! (see [`Task::format_text`]). The file is created empty on first use and
//! rewritten in full after every change, so decoding it again always yields
//! the in-memory list.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::task::Task;
use crate::task_list::TaskList;

/// Default location of the task file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/duke.txt";

/// Storage manager for the task file
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every task from the file, creating it if missing.
    ///
    /// Lines that are not UTF-8 or fail to decode are skipped with a warning.
    pub fn load(&self) -> Result<TaskList> {
        self.ensure_file()?;

        let data = fs::read(&self.path)?;
        let mut tasks = Vec::new();
        let mut skipped = 0usize;

        for (number, raw) in data.split(|byte| *byte == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let decoded = std::str::from_utf8(raw)
                .map_err(|err| Error::CorruptRecord(format!("invalid UTF-8: {err}")))
                .and_then(|line| {
                    if line.trim().is_empty() {
                        Ok(None)
                    } else {
                        Task::parse_line(line).map(Some)
                    }
                });
            match decoded {
                Ok(None) => {}
                Ok(Some(task)) => tasks.push(task),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(
                        path = %self.path.display(),
                        line = number + 1,
                        error = %err,
                        "skipping unreadable task record"
                    );
                }
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            loaded = tasks.len(),
            skipped,
            "loaded tasks"
        );
        Ok(TaskList::from(tasks))
    }

    /// Rewrite the file so it holds exactly the given list.
    pub fn persist(&self, tasks: &TaskList) -> Result<()> {
        let mut data = String::new();
        for line in tasks.to_lines() {
            data.push_str(&line);
            data.push('\n');
        }
        write_atomic(&self.path, data.as_bytes())?;
        tracing::debug!(path = %self.path.display(), tasks = tasks.len(), "persisted tasks");
        Ok(())
    }

    fn ensure_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        Ok(())
    }
}

/// Atomically write data to a file
///
/// Writes to a temporary sibling, syncs it, then renames it over the
/// target, so the file is either fully written or not modified at all.
/// The temporary file is removed if any step fails.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(data)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
