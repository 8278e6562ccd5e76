//! Configuration file schema for smellscan.
//!
//! A configuration overrides detector thresholds, the failing severity and
//! which paths are skipped when scanning a directory.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detect::{Severity, Thresholds};

/// File names looked up in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["smellscan.yaml", ".smellscan.yaml"];

/// Template written by `smellscan init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub thresholds: Thresholds,
    /// Lowest severity that makes `analyze` exit non-zero.
    pub fail_on: Severity,
    /// Glob patterns for paths to exclude from directory scans.
    pub excluded_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            fail_on: Severity::High,
            excluded_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration from YAML text. Does not validate.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // A document holding only comments is null, not an empty mapping.
        match serde_yaml::from_str::<serde_yaml::Value>(content)? {
            serde_yaml::Value::Null => Ok(Self::default()),
            value => serde_yaml::from_value(value),
        }
    }

    /// Read, parse and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration named on the command line, else the first
    /// default file in `dir`, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        for name in DEFAULT_CONFIG_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                tracing::debug!(config = %path.display(), "using discovered configuration");
                return Ok((Self::load(&path)?, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Check thresholds and exclusion patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = self.thresholds.problems();

        for pattern in &self.excluded_paths {
            if let Err(e) = Glob::new(pattern) {
                problems.push(format!("invalid excluded_paths pattern {:?}: {}", pattern, e));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Compiled exclusion patterns. Invalid patterns are skipped; call
    /// [`Config::validate`] first to reject them.
    pub fn exclusions(&self) -> GlobSet {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            }
        }
        builder.build().unwrap_or_else(|_| GlobSet::empty())
    }
}
