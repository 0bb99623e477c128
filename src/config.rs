use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILE: &str = "shellscope.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Glob used to discover shell files during the startup load
    #[serde(default = "default_glob_pattern")]
    pub glob_pattern: String,

    /// Cap on the number of files taken from discovery. Discovery stops
    /// once this many files have matched; the rest are simply not visited.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            glob_pattern: default_glob_pattern(),
            max_files: default_max_files(),
        }
    }
}

fn default_glob_pattern() -> String {
    "**/*.{sh,inc,bash,command}".to_string()
}

fn default_max_files() -> usize {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from `shellscope.toml` in the workspace root,
    /// falling back to defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }
}
