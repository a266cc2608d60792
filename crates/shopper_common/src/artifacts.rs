//! Loading the fitted artifacts.
//!
//! All four files are read and checked once, up front. Any problem is a
//! `ModelUnavailable` naming the file, and the caller is expected to stop:
//! there is no partially loaded state to serve from.

use crate::classifier::Classifier;
use crate::encoding::EncodingTable;
use crate::error::{Result, ShopperError};
use crate::features::Column;
use crate::scaler::StandardScaler;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const MONTH_ENCODER_FILE: &str = "month_encoder.json";
pub const VISITOR_TYPE_ENCODER_FILE: &str = "visitor_type_encoder.json";

/// Where each artifact lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub scaler: PathBuf,
    pub month_encoder: PathBuf,
    pub visitor_type_encoder: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join(CLASSIFIER_FILE),
            scaler: dir.join(SCALER_FILE),
            month_encoder: dir.join(MONTH_ENCODER_FILE),
            visitor_type_encoder: dir.join(VISITOR_TYPE_ENCODER_FILE),
        }
    }
}

/// The fitted encoders, scaler and classifier, checked and immutable.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    month: EncodingTable,
    visitor_type: EncodingTable,
    scaler: StandardScaler,
    classifier: Classifier,
}

impl ModelArtifacts {
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let month: EncodingTable = read_artifact(&paths.month_encoder)?;
        let visitor_type: EncodingTable = read_artifact(&paths.visitor_type_encoder)?;
        let scaler: StandardScaler = read_artifact(&paths.scaler)?;
        let classifier: Classifier = read_artifact(&paths.classifier)?;

        month.check().map_err(|e| in_file(&paths.month_encoder, e))?;
        visitor_type
            .check()
            .map_err(|e| in_file(&paths.visitor_type_encoder, e))?;
        scaler.check().map_err(|e| in_file(&paths.scaler, e))?;
        classifier.check().map_err(|e| in_file(&paths.classifier, e))?;

        let artifacts = Self {
            month,
            visitor_type,
            scaler,
            classifier,
        };
        info!(
            "Loaded {} classifier ({} months, {} visitor types)",
            artifacts.classifier.kind(),
            artifacts.month.len(),
            artifacts.visitor_type.len()
        );
        Ok(artifacts)
    }

    /// Assemble from already-parsed parts, running the same checks as `load`.
    pub fn from_parts(
        month: EncodingTable,
        visitor_type: EncodingTable,
        scaler: StandardScaler,
        classifier: Classifier,
    ) -> Result<Self> {
        month.check()?;
        visitor_type.check()?;
        scaler.check()?;
        classifier.check()?;
        Ok(Self {
            month,
            visitor_type,
            scaler,
            classifier,
        })
    }

    pub fn month(&self) -> &EncodingTable {
        &self.month
    }

    pub fn visitor_type(&self) -> &EncodingTable {
        &self.visitor_type
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn info(&self) -> ModelInfo {
        let trees = match &self.classifier {
            Classifier::GradientBoosting(m) => m.trees.len(),
            Classifier::LogisticRegression(_) => 0,
        };
        ModelInfo {
            classifier_kind: self.classifier.kind().to_string(),
            trees,
            month_classes: self.month.classes().to_vec(),
            visitor_types: self.visitor_type.classes().to_vec(),
            columns: Column::ALL.iter().map(|c| c.name().to_string()).collect(),
            scaled_columns: Column::SCALED.iter().map(|c| c.name().to_string()).collect(),
        }
    }
}

/// Summary of the loaded model, for status output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub classifier_kind: String,
    pub trees: usize,
    pub month_classes: Vec<String>,
    pub visitor_types: Vec<String>,
    pub columns: Vec<String>,
    pub scaled_columns: Vec<String>,
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading artifact {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| {
        ShopperError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ShopperError::ModelUnavailable(format!("cannot parse {}: {}", path.display(), e))
    })
}

fn in_file(path: &Path, err: ShopperError) -> ShopperError {
    match err {
        ShopperError::ModelUnavailable(reason) => {
            ShopperError::ModelUnavailable(format!("{}: {}", path.display(), reason))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_uses_standard_names() {
        let paths = ArtifactPaths::in_dir("/models");
        assert_eq!(paths.classifier, PathBuf::from("/models/classifier.json"));
        assert_eq!(paths.scaler, PathBuf::from("/models/scaler.json"));
        assert_eq!(paths.month_encoder, PathBuf::from("/models/month_encoder.json"));
        assert_eq!(
            paths.visitor_type_encoder,
            PathBuf::from("/models/visitor_type_encoder.json")
        );
    }

    #[test]
    fn test_missing_directory_is_model_unavailable() {
        let err = ModelArtifacts::load(&ArtifactPaths::in_dir("/nonexistent/shopper")).unwrap_err();
        match err {
            ShopperError::ModelUnavailable(reason) => assert!(reason.contains("month_encoder.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_in_file_prefixes_path() {
        let err = in_file(
            Path::new("/m/scaler.json"),
            ShopperError::ModelUnavailable("bad".to_string()),
        );
        assert_eq!(err.to_string(), "Model unavailable: /m/scaler.json: bad");
    }
}
