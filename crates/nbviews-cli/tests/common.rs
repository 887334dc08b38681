//! Common test utilities shared across integration tests.
//!
//! Clippy cannot track usage across integration test files,
//! hence the `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
    notebook_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".nbviews");
        let notebook_dir = temp_dir.path().join("notebooks");

        fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        fs::create_dir_all(&notebook_dir).expect("Failed to create notebook dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
            notebook_dir,
        }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn notebook_dir(&self) -> &PathBuf {
        &self.notebook_dir
    }

    /// Write an nbformat 4 notebook with one code cell per id
    pub fn write_notebook(&self, file_name: &str, cell_ids: &[&str]) -> PathBuf {
        let cells: Vec<serde_json::Value> = cell_ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "cell_type": "code",
                    "id": id,
                    "metadata": {},
                    "outputs": [],
                    "source": [format!("# {}\n", id), "pass"],
                })
            })
            .collect();
        let notebook = serde_json::json!({
            "cells": cells,
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5,
        });

        let path = self.notebook_dir.join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&notebook).unwrap())
            .expect("Failed to write notebook");
        path
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nbviews");
        cmd.env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg("plain");
        cmd
    }

    /// Run a command with `--format json` and parse its stdout
    pub fn json(&self, args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let output = self
            .command()
            .args(args)
            .arg("--format")
            .arg("json")
            .output()?;

        if !output.status.success() {
            anyhow::bail!(
                "{:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Import a notebook written with [`write_notebook`](Self::write_notebook)
    /// and return its id
    pub fn import(&self, file_name: &str, cell_ids: &[&str]) -> anyhow::Result<String> {
        let path = self.write_notebook(file_name, cell_ids);
        let result = self.json(&["notebook", "import", path.to_str().unwrap()])?;
        let id = result["imported"][0]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("no notebook imported: {}", result))?;
        Ok(id.to_string())
    }

    pub fn create_view(&self, notebook_id: &str, name: &str) -> anyhow::Result<String> {
        let result = self.json(&["view", "create", notebook_id, "--name", name])?;
        Ok(result["guid"].as_str().unwrap_or_default().to_string())
    }
}
