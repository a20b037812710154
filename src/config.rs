//! Application configuration: which classes exist and how big they are.
//!
//! Class sizes are configuration, not code. A config file looks like:
//!
//! ```toml
//! seed = 42
//!
//! [[classes]]
//! name = "six"
//! size = 75
//! names = "six_names.txt"
//! weights = "six_weights.txt"
//! ```
//!
//! Relative `names`/`weights` paths are resolved against the directory that
//! holds the config file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::validate_weight;
use crate::range::DEFAULT_WEIGHT;
use crate::roster::{Roster, RosterError};

/// Errors from loading or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config defines no classes")]
    NoClasses,

    #[error("class {0:?} is defined more than once")]
    DuplicateClass(String),

    #[error("class {name:?}: {reason}")]
    InvalidClass { name: String, reason: String },

    #[error("unknown class {0:?}")]
    UnknownClass(String),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Fixed seed for reproducible draws; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Joins the labels of a multi-draw on output.
    #[serde(default = "default_separator")]
    pub separator: String,

    pub classes: Vec<ClassConfig>,

    /// Directory relative paths are resolved against. Set by [`Config::load`].
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// One class (roster) definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassConfig {
    pub name: String,

    /// Number of students; IDs run `1..=size`.
    pub size: u32,

    #[serde(default = "default_weight")]
    pub default_weight: f64,

    /// Names file, one name per line.
    #[serde(default)]
    pub names: Option<PathBuf>,

    /// Weights file, `ID,weight` per line.
    #[serde(default)]
    pub weights: Option<PathBuf>,
}

fn default_separator() -> String {
    ",".to_string()
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        info!(
            "loaded {} classes from {}",
            config.classes.len(),
            path.display()
        );
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classes.is_empty() {
            return Err(ConfigError::NoClasses);
        }

        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.name.as_str()) {
                return Err(ConfigError::DuplicateClass(class.name.clone()));
            }
            if class.size == 0 {
                return Err(ConfigError::InvalidClass {
                    name: class.name.clone(),
                    reason: "size must be >= 1".to_string(),
                });
            }
            if let Err(e) = validate_weight(class.default_weight) {
                return Err(ConfigError::InvalidClass {
                    name: class.name.clone(),
                    reason: format!("default_weight: {e}"),
                });
            }
        }
        Ok(())
    }

    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Result<&ClassConfig, ConfigError> {
        self.classes
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::UnknownClass(name.to_string()))
    }

    /// Resolve `path` against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Build the roster for class `name`, loading its names and weights files.
    pub fn build_roster(&self, name: &str) -> Result<Roster<StdRng>, ConfigError> {
        let class = self.class(name)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut roster = Roster::with_rng(class.size, class.default_weight, rng)?;
        if let Some(names) = &class.names {
            roster.load_names(self.resolve(names))?;
        }
        if let Some(weights) = &class.weights {
            roster.load_weights(self.resolve(weights))?;
        }
        Ok(roster)
    }
}
