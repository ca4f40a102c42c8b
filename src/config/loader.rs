//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.iamctl.toml` in the working directory
//! 4. `~/.config/iamctl/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::env::Env;
use crate::output::OutputFormat;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub aws: AwsSection,
    pub output: OutputSection,
    pub log: LogSection,
}

/// Connection settings for the IAM client.
///
/// Unset fields defer to the SDK's default resolution chain, so an empty
/// section is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSection {
    /// Region override (e.g. `us-west-2`).
    pub region: Option<String>,
    /// Named credentials profile from the shared AWS config files.
    pub profile: Option<String>,
    /// Endpoint override, for IAM-compatible emulators.
    pub endpoint_url: Option<String>,
}

/// Output rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Terminal,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Filter directive for the subscriber (e.g. `warn`, `debug`,
    /// `iamctl=trace`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, then the local config in `dir`, then
    /// applies environment variable overrides. CLI flags are merged by
    /// the binary afterwards.
    pub fn load(dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        if other.aws.region.is_some() {
            self.aws.region = other.aws.region;
        }
        if other.aws.profile.is_some() {
            self.aws.profile = other.aws.profile;
        }
        if other.aws.endpoint_url.is_some() {
            self.aws.endpoint_url = other.aws.endpoint_url;
        }

        if other.output.format != OutputSection::default().format {
            self.output.format = other.output.format;
        }

        if other.log.level != LogSection::default().level {
            self.log.level = other.log.level;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.var_nonempty(crate::constants::ENV_REGION) {
            self.aws.region = Some(val);
        }
        if let Some(val) = env.var_nonempty(crate::constants::ENV_PROFILE) {
            self.aws.profile = Some(val);
        }
        if let Some(val) = env.var_nonempty(crate::constants::ENV_ENDPOINT_URL) {
            self.aws.endpoint_url = Some(val);
        }
        if let Some(val) = env.var_nonempty(crate::constants::ENV_FORMAT) {
            if let Ok(format) = val.parse::<OutputFormat>() {
                self.output.format = format;
            } else {
                eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    crate::constants::ENV_FORMAT
                );
            }
        }
        if let Some(val) = env.var_nonempty(crate::constants::ENV_LOG) {
            self.log.level = val;
        }
    }
}
