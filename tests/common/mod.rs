#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use fake::Fake;
use fake::faker::lorem::en::Words;
use std::path::Path;

/// Shared world state for CLI tests
///
/// Each world owns its own temporary repository root, so tests never
/// depend on process-wide working-directory state.
pub struct TestWorld {
    pub temp_dir: TempDir,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A world with `twig init` already run
    pub fn initialized() -> Self {
        let world = Self::new();
        world.run(&["init"]).assert().success();
        world
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn run(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("twig").expect("failed to find twig binary");
        cmd.current_dir(self.path());
        for arg in args {
            cmd.arg(arg);
        }
        cmd
    }

    pub fn write_file(&self, path: &str, content: &str) {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("failed to write file");
    }

    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("failed to read file")
    }

    pub fn index_content(&self) -> String {
        self.read_file(".twig/index")
    }

    pub fn head_content(&self) -> String {
        self.read_file(".twig/HEAD").trim().to_string()
    }

    pub fn stage_and_commit(&self, paths: &[&str], message: &str) {
        for path in paths {
            self.run(&["add", path]).assert().success();
        }
        self.run(&["commit", "-m", message]).assert().success();
    }

    /// Digests of every commit reachable from HEAD, newest first
    pub fn log_digests(&self) -> Vec<String> {
        let output = self.run(&["log"]).output().expect("failed to run log");
        assert!(output.status.success(), "log failed");

        String::from_utf8(output.stdout)
            .expect("log output is not utf8")
            .lines()
            .filter_map(|line| line.strip_prefix("commit "))
            .map(str::to_string)
            .collect()
    }

    pub fn head_digest(&self) -> String {
        self.log_digests()
            .first()
            .expect("no commits reachable from HEAD")
            .clone()
    }

    /// Stdout of `cat-file` for the given digest or prefix
    pub fn cat_file(&self, target: &str) -> String {
        let output = self
            .run(&["cat-file", target])
            .output()
            .expect("failed to run cat-file");
        assert!(output.status.success(), "cat-file {target} failed");

        String::from_utf8(output.stdout).expect("cat-file output is not utf8")
    }
}

pub fn random_content() -> String {
    Words(5..10).fake::<Vec<String>>().join(" ")
}
