//! Config file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ExecutorOptions;
use crate::errors::CurlscopeError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "CURLSCOPE_CONFIG_DIR";

/// A positive number of seconds that fits in a `Duration`
pub fn timeout_from_secs(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// How the analysis is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable report
    #[default]
    Pretty,
    /// Full analysis as JSON
    Json,
    /// Persisted history record as JSON
    Record,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Seconds
    pub timeout: Option<f64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `curlscope=debug`
    pub level: Option<String>,
}

/// curlscope configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub config_dir: PathBuf,
    pub defaults: DefaultsConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load `config.toml` from the given directory, or the default one
    ///
    /// A missing file yields the defaults.
    pub fn load(config_dir: Option<&Path>) -> Result<Self, CurlscopeError> {
        let config_dir = config_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_dir);
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self { config_dir, ..Self::default() });
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| CurlscopeError::Config(format!("Failed to read config: {}", e)))?;
        let mut config = Self::from_toml(&content)?;
        config.config_dir = config_dir;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, CurlscopeError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CurlscopeError::Config(format!("Invalid config TOML: {}", e)))?;
        if let Some(timeout) = config.client.timeout {
            if timeout_from_secs(timeout).is_none() {
                return Err(CurlscopeError::Config(format!(
                    "client.timeout must be a positive number of seconds, got {}",
                    timeout
                )));
            }
        }
        Ok(config)
    }

    /// Executor options with config values applied over the defaults
    pub fn executor_options(&self) -> ExecutorOptions {
        let mut options = ExecutorOptions::default();
        if let Some(timeout) = self.client.timeout.and_then(timeout_from_secs) {
            options.timeout = timeout;
        }
        if let Some(user_agent) = &self.client.user_agent {
            options.user_agent = user_agent.clone();
        }
        options
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("curlscope"))
            .unwrap_or_else(|| PathBuf::from(".curlscope"))
    }
}
