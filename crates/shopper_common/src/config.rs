//! Configuration.
//!
//! Loads settings from `$SHOPPER_CONFIG`, /etc/shopper/config.toml or
//! /var/lib/shopper/config.toml, in that order, or uses defaults.

use crate::artifacts::{
    ArtifactPaths, CLASSIFIER_FILE, MONTH_ENCODER_FILE, SCALER_FILE, VISITOR_TYPE_ENCODER_FILE,
};
use crate::domain::FieldDomain;
use crate::error::{Result, ShopperError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/shopper/config.toml";

/// Fallback config file path
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/shopper/config.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SHOPPER_CONFIG";

/// Environment variable overriding `artifacts.dir`
pub const ARTIFACT_DIR_ENV: &str = "SHOPPER_ARTIFACT_DIR";

/// Artifact locations. File names are joined onto `dir` unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_classifier")]
    pub classifier: String,

    #[serde(default = "default_scaler")]
    pub scaler: String,

    #[serde(default = "default_month_encoder")]
    pub month_encoder: String,

    #[serde(default = "default_visitor_type_encoder")]
    pub visitor_type_encoder: String,
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("/var/lib/shopper/models")
}

fn default_classifier() -> String {
    CLASSIFIER_FILE.to_string()
}

fn default_scaler() -> String {
    SCALER_FILE.to_string()
}

fn default_month_encoder() -> String {
    MONTH_ENCODER_FILE.to_string()
}

fn default_visitor_type_encoder() -> String {
    VISITOR_TYPE_ENCODER_FILE.to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            classifier: default_classifier(),
            scaler: default_scaler(),
            month_encoder: default_month_encoder(),
            visitor_type_encoder: default_visitor_type_encoder(),
        }
    }
}

impl ArtifactConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            classifier: self.dir.join(&self.classifier),
            scaler: self.dir.join(&self.scaler),
            month_encoder: self.dir.join(&self.month_encoder),
            visitor_type_encoder: self.dir.join(&self.visitor_type_encoder),
        }
    }
}

/// HTTP server settings for shopperd
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address. Localhost only by default.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:7870".to_string()
}

fn default_max_body_bytes() -> usize {
    16 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Per-column bound overrides, keyed by training column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub bounds: HashMap<String, FieldDomain>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopperConfig {
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

impl ShopperConfig {
    /// Load from the first config file that exists, or defaults.
    ///
    /// A missing file moves on to the next candidate. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load() -> Result<Self> {
        let candidates = Self::candidates(std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        Self::load_from(&candidates, std::env::var_os(ARTIFACT_DIR_ENV).map(PathBuf::from))
    }

    /// Config files to try, in order. An explicit path comes first.
    pub fn candidates(explicit: Option<PathBuf>) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = explicit.into_iter().collect();
        candidates.push(PathBuf::from(CONFIG_PATH));
        candidates.push(PathBuf::from(DEFAULT_CONFIG_PATH));
        candidates
    }

    /// Load from the first of `candidates` that exists, then apply an
    /// artifact directory override.
    pub fn load_from(candidates: &[PathBuf], artifact_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = None;
        for path in candidates {
            match Self::load_from_path(path) {
                Ok(loaded) => {
                    config = Some(loaded);
                    break;
                }
                Err(LoadError::NotFound) => continue,
                Err(LoadError::Invalid(e)) => return Err(e),
            }
        }

        let mut config = config.unwrap_or_else(|| {
            warn!("Config not found, using defaults");
            ShopperConfig::default()
        });
        config.apply_artifact_dir(artifact_dir);
        Ok(config)
    }

    /// Load an explicit config file. Missing is an error here.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = match Self::load_from_path(path) {
            Ok(config) => config,
            Err(LoadError::NotFound) => {
                return Err(ShopperError::Config(format!(
                    "{} does not exist",
                    path.display()
                )))
            }
            Err(LoadError::Invalid(e)) => return Err(e),
        };
        config.apply_artifact_dir(std::env::var_os(ARTIFACT_DIR_ENV).map(PathBuf::from));
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ShopperError::Config(e.to_string()))
    }

    fn load_from_path(path: &Path) -> std::result::Result<Self, LoadError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(LoadError::NotFound),
            Err(e) => {
                return Err(LoadError::Invalid(ShopperError::Config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                ))))
            }
        };
        let config = Self::from_toml(&content).map_err(|e| {
            LoadError::Invalid(ShopperError::Config(format!("{}: {}", path.display(), e)))
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_artifact_dir(&mut self, dir: Option<PathBuf>) {
        if let Some(dir) = dir {
            self.artifacts.dir = dir;
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShopperError::Config(e.to_string()))
    }
}

enum LoadError {
    NotFound,
    Invalid(ShopperError),
}
