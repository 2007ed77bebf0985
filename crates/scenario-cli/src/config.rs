//! Application configuration
//!
//! Loaded from an optional TOML file; command-line flags override file values.
//!
//! ```toml
//! output = "text"
//! log_filter = "scenario_core=info"
//!
//! [client]
//! endpoint = "http://localhost:8080/api/analyze-scenario"
//! timeout_secs = 60
//! ```

use scenario_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Log filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain terminal text
    #[default]
    Text,
    /// HTML fragment
    Html,
    /// Raw result as pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Accepted names, for argument parsing
    pub const NAMES: [&'static str; 3] = ["text", "html", "json"];
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

/// Configuration for the terminal client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Result output format
    pub output: OutputFormat,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// With client endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.client = self.client.with_endpoint(endpoint);
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.client = self.client.with_timeout_secs(secs);
        self
    }

    /// With output format
    #[inline]
    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            output: OutputFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File is not valid configuration TOML
    #[error("invalid config{}: {message}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        /// Config file path, if parsed from a file
        path: Option<PathBuf>,
        /// Parser message
        message: String,
    },

    /// Unknown output format name
    #[error("unknown output format '{0}' (expected text, html or json)")]
    UnknownFormat(String),
}
