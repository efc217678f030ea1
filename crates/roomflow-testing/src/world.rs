//! TestWorld pattern for CLI integration tests.
//!
//! Each world owns a temp data directory, optional env overrides and an
//! optional stub backend wired in through `ROOMFLOW_API_URL`.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::backend::StubBackend;
use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use roomflow_testing::TestWorld;
///
/// let world = TestWorld::new().signed_in();
/// let result = world.run(&["bookings", "upcoming"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".roomflow");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        let mut env_vars = HashMap::new();
        // Point at a closed port unless a backend is attached.
        env_vars.insert(
            "ROOMFLOW_API_URL".to_string(),
            "http://127.0.0.1:9/api/v1/".to_string(),
        );

        Self {
            temp_dir,
            data_dir,
            env_vars,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Send CLI traffic to the given stub backend.
    pub fn with_backend(self, backend: &StubBackend) -> Self {
        self.with_env("ROOMFLOW_API_URL", backend.base_url())
    }

    /// Write a stored session so commands run as a signed-in user.
    pub fn signed_in(self) -> Self {
        let path = self.data_dir.join("session.json");
        let content = serde_json::to_string_pretty(&fixtures::stored_session())
            .expect("Failed to encode session");
        std::fs::write(path, content).expect("Failed to write session file");
        self
    }

    /// Stored session entries, or an empty map when signed out.
    pub fn stored_session(&self) -> serde_json::Map<String, serde_json::Value> {
        let path = self.data_dir.join("session.json");
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).expect("Corrupt session file"),
            Err(_) => serde_json::Map::new(),
        }
    }

    /// Configure a CLI command with this environment's data dir and env vars.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg("plain");

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("ROOMFLOW_PATH");
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `roomflow` binary with the given arguments.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("roomflow")
            .map_err(|e| anyhow::anyhow!("Failed to find roomflow binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
