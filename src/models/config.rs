use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::WriteMode;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "splitpull.toml";

/// Configuration loaded from splitpull.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub pull: PullConfig,
    #[serde(default)]
    pub repos: ReposConfig,
}

/// Line splitter settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Append to existing destination files instead of truncating them
    #[serde(default)]
    pub append: bool,
    /// Directory interactive prompts start from
    #[serde(default)]
    pub default_dir: String,
}

impl SplitConfig {
    pub fn write_mode(&self) -> WriteMode {
        WriteMode::from_append(self.append)
    }
}

/// Repository update settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullConfig {
    /// Update executable, usually the git binary
    #[serde(default = "default_git")]
    pub git: String,
    /// Arguments passed to the executable in every repository
    #[serde(default = "default_pull_args")]
    pub args: Vec<String>,
    /// Base directory for relative `repo add` paths
    #[serde(default)]
    pub default_repo_dir: String,
    /// Timeout in seconds for each repository
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Stop at the first repository that fails
    #[serde(default)]
    pub stop_on_fail: bool,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            git: default_git(),
            args: default_pull_args(),
            default_repo_dir: String::new(),
            timeout_seconds: default_timeout(),
            stop_on_fail: false,
        }
    }
}

impl PullConfig {
    /// The full command line, for display
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.git.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn default_pull_args() -> Vec<String> {
    vec!["pull".to_string(), "origin".to_string(), "master".to_string()]
}

fn default_timeout() -> u64 {
    300
}

/// Stored list of local working directories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReposConfig {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Load config from the given file, falling back to defaults if it is missing
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Try to load config from splitpull.toml in the given directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_or_default(&dir.join(CONFIG_FILE_NAME))
    }

    /// Save config atomically (write to temp, then rename)
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(path.to_path_buf(), e))?;

        let temp_file = path.with_extension("toml.tmp");
        fs::write(&temp_file, contents)
            .map_err(|e| ConfigError::WriteError(temp_file.clone(), e))?;
        fs::rename(&temp_file, path)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e))
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        git: Option<String>,
        timeout: Option<u64>,
        stop_on_fail: bool,
        mode: Option<WriteMode>,
    ) -> Self {
        if let Some(g) = git {
            self.pull.git = g;
        }
        if let Some(t) = timeout {
            self.pull.timeout_seconds = t;
        }
        if stop_on_fail {
            self.pull.stop_on_fail = true;
        }
        if let Some(m) = mode {
            self.split.append = m == WriteMode::Append;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
    #[error("Failed to write config file {0}: {1}")]
    WriteError(PathBuf, std::io::Error),
    #[error("Failed to serialize config for {0}: {1}")]
    SerializeError(PathBuf, toml::ser::Error),
}
