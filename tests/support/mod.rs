#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use duke::storage::Storage;
use duke::task_list::TaskList;
use duke::Duke;
use tempfile::TempDir;

/// A scratch directory holding one task file.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("duke.txt")
    }

    pub fn open(&self) -> Duke {
        Duke::open(self.data_file()).expect("open session")
    }

    pub fn write_data(&self, contents: &str) -> std::io::Result<()> {
        let path = self.data_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    pub fn read_data(&self) -> String {
        fs::read_to_string(self.data_file()).unwrap_or_default()
    }

    /// Decode the task file from scratch.
    pub fn reload(&self) -> TaskList {
        Storage::new(self.data_file()).load().expect("reload tasks")
    }

    pub fn duke_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("duke").expect("binary");
        cmd.current_dir(self.path())
            .env_remove("DUKE_DATA")
            .env_remove("DUKE_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
