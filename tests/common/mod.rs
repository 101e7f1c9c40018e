//! Common test utilities for curlscope integration tests
//!
//! - CLI invocation helpers
//! - Output parsing helpers
//! - Config directory fixtures

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A host under the reserved `.invalid` TLD, never resolvable
pub const DUMMY_URL: &str = "http://this-should.never-resolve.invalid";

/// Exit status codes matching the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    ErrorTimeout = 2,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            2 => ExitStatus::ErrorTimeout,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

/// Mock environment for testing
pub struct MockEnvironment {
    /// Temporary config directory
    pub config_dir: TempDir,
    pub env_vars: HashMap<String, String>,
    pub stdin: Option<Vec<u8>>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            env_vars: HashMap::new(),
            stdin: None,
        }
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_stdin(&mut self, content: &str) -> &mut Self {
        self.stdin = Some(content.as_bytes().to_vec());
        self
    }

    /// Write `config.toml` into the config directory
    pub fn write_config(&self, content: &str) -> &Self {
        std::fs::write(self.config_dir.path().join("config.toml"), content)
            .expect("Failed to write config");
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }
}

/// Run the CLI with the given arguments (excluding the program name)
pub fn curlscope(args: &[&str]) -> CliResponse {
    curlscope_with_env(args, &MockEnvironment::new())
}

/// Run the CLI with the given arguments and environment
pub fn curlscope_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_curlscope"));
    cmd.args(args);

    cmd.env("CURLSCOPE_CONFIG_DIR", env.config_path());
    cmd.env_remove("CURLSCOPE_LOG");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(ref stdin_data) = env.stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            stdin.write_all(stdin_data).expect("Failed to write to stdin");
        }
        let output = child.wait_with_output().expect("Failed to wait for command");
        parse_output(output)
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().expect("Failed to execute command");
        parse_output(output)
    }
}

fn parse_output(output: Output) -> CliResponse {
    let exit_code = output.status.code().unwrap_or(1);
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

/// Strip the `"12.34ms"` suffix and parse the number
pub fn millis(value: &serde_json::Value) -> f64 {
    value
        .as_str()
        .and_then(|s| s.strip_suffix("ms"))
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a duration: {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_from_i32() {
        assert_eq!(ExitStatus::from(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from(1), ExitStatus::Error);
        assert_eq!(ExitStatus::from(2), ExitStatus::ErrorTimeout);
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(&serde_json::json!("12.50ms")), 12.5);
    }
}
