// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness: run `dmictl` against a throwaway repository and assert
//! on its exit status and output.

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// `dmictl` with no repository or config of its own.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    fn new() -> Self {
        let mut cmd = Command::cargo_bin("dmictl").expect("dmictl binary");
        cmd.env("NO_COLOR", "1").env_remove("COLOR").env_remove("DMI_LOG");
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn env_remove(mut self, key: &str) -> Self {
        self.cmd.env_remove(key);
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    fn run(mut self) -> RunAssert {
        let output = self.cmd.output().expect("spawn dmictl");
        RunAssert { output }
    }

    /// Run and require exit status 0.
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit status.
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require a specific exit code.
    pub fn exits_with(self, code: i32) -> RunAssert {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "stdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout lacks {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr lacks {needle:?}:\n{stderr}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout is JSON")
    }
}

/// A scratch directory holding a repository, an empty config file and any
/// input files a test needs.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.toml"), "").expect("config");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repository(&self) -> PathBuf {
        self.path().join("repo")
    }

    /// Write a file relative to the project root, creating parent directories.
    pub fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        std::fs::read(self.path().join(rel)).expect("read file")
    }

    /// `dmictl` run from the project root, pointed at its repository and config.
    pub fn dmictl(&self) -> CliBuilder {
        cli()
            .current_dir(self.path())
            .env("DMI_CONFIG", self.path().join("config.toml"))
            .env("DMI_REPOSITORY", self.repository())
    }

    /// Install `definition` (a JSON file under the project) and return its id.
    pub fn add(&self, definition: &str) -> String {
        let run = self.dmictl().args(&["--format", "json", "app", "add", definition]).passes();
        run.json()["id"].as_str().expect("id").to_string()
    }
}

/// Two-service definition used across specs.
pub const ORDER_FLOW: &str = r#"{
  "name": "OrderFlow",
  "description": "Routes purchase orders",
  "services": [
    {
      "name": "feeder",
      "component": "feeder",
      "ports": [{ "name": "OUT_PORT", "kind": "output", "destination": "orders.out" }]
    },
    {
      "name": "display",
      "component": "display",
      "ports": [{ "name": "IN_PORT", "kind": "input", "destination": "orders.in" }]
    }
  ],
  "routes": [
    {
      "name": "feed",
      "source": { "service": "feeder", "port": "OUT_PORT" },
      "target": { "service": "display", "port": "IN_PORT" }
    }
  ]
}"#;

