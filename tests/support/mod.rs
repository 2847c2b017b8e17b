#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Isolated global data directory and working directory for one test
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Result<Self, std::io::Error> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("home"))?;
        fs::create_dir_all(dir.path().join("work"))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Global data directory (what `TOGO_HOME` points at)
    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Working directory for commands
    pub fn work(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn global_store(&self) -> PathBuf {
        self.home().join("todos.json")
    }

    pub fn project_store(&self) -> PathBuf {
        self.work().join(".togo")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.home().join("config.toml"), contents)
    }

    pub fn write_global_store(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.global_store(), contents)
    }

    pub fn read_json(&self, path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// `togo` with this home and working directory
    pub fn togo(&self) -> Command {
        self.togo_in(&self.work())
    }

    pub fn togo_in(&self, cwd: &Path) -> Command {
        let mut cmd = togo_cmd();
        cmd.env("TOGO_HOME", self.home()).current_dir(cwd);
        cmd
    }
}

pub fn togo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("togo").expect("binary");
    cmd.env_remove("RUST_LOG").env_remove("TOGO_HOME");
    cmd
}

/// Parse the JSON envelope printed on stdout
pub fn stdout_json(output: &std::process::Output) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_slice(&output.stdout)?)
}
