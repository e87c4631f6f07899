//! Configuration - `pycompat.toml`
//!
//! Every section and key is optional. `PYCOMPAT_LOG_*` variables take
//! precedence over the file's `[logging]` section.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::logging::{parse_level, LogConfig, LogFormat, LogOutput};

/// File name searched for by `Config::discover`
pub const CONFIG_FILE_NAME: &str = "pycompat.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid log level '{0}' (expected trace, debug, info, warn or error)")]
    InvalidLevel(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Log file path; stderr when absent
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub spans: bool,

    /// Extra `EnvFilter` directives
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How the CLI prints results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Python repr, e.g. `(-4, 1)`
    #[default]
    Repr,
    /// JSON, e.g. `[-4,1]`
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_log_format(),
            file: None,
            spans: false,
            filter: None,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.logging.level()?;
        Ok(config)
    }

    /// Find `pycompat.toml` in `start` or its parents
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest `pycompat.toml`, or defaults when there is none.
    ///
    /// A file that exists but fails to parse is an error, not a fallback.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match Self::find(start) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Logging setup from the file, with `PYCOMPAT_LOG_*` applied on top
    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        Ok(self.file_log_config()?.overlay_env())
    }

    fn file_log_config(&self) -> Result<LogConfig, ConfigError> {
        let logging = &self.logging;
        let mut config = LogConfig::new()
            .with_level(logging.level()?)
            .with_format(logging.format)
            .with_span_events(logging.spans);

        if let Some(path) = &logging.file {
            config = config.with_output(LogOutput::file(path));
        }
        if let Some(filter) = &logging.filter {
            config = config.with_filter(filter.clone());
        }

        Ok(config)
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        parse_level(&self.level).ok_or_else(|| ConfigError::InvalidLevel(self.level.clone()))
    }
}
