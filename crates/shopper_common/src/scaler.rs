//! Pre-fitted standard scaler for the numeric columns.

use crate::error::{Result, ShopperError};
use crate::features::{Column, SCALED_COUNT};
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};

/// Per-column `(x - mean) / scale`, fitted offline.
///
/// `mean[i]` and `scale[i]` belong to `Column::SCALED[i]`. The scaler is
/// never refitted at inference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub(crate) fn check(&self) -> Result<()> {
        if self.mean.len() != SCALED_COUNT || self.scale.len() != SCALED_COUNT {
            return Err(ShopperError::ModelUnavailable(format!(
                "scaler has {} means and {} scales, expected {}",
                self.mean.len(),
                self.scale.len(),
                SCALED_COUNT
            )));
        }
        if let Some(names) = &self.feature_names {
            let expected: Vec<&str> = Column::SCALED.iter().map(|c| c.name()).collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(ShopperError::ModelUnavailable(format!(
                    "scaler was fitted on {:?}, expected {:?}",
                    names, expected
                )));
            }
        }
        for (column, (&mean, &scale)) in Column::SCALED
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
        {
            if !mean.is_finite() || !scale.is_finite() || scale == 0.0 {
                return Err(ShopperError::ModelUnavailable(format!(
                    "scaler parameters for {} are unusable (mean {}, scale {})",
                    column.name(),
                    mean,
                    scale
                )));
            }
        }
        Ok(())
    }

    /// Scale the numeric columns of `vector` in place. Encoded columns are
    /// left as they are.
    pub fn transform(&self, vector: &mut FeatureVector) {
        for (i, &column) in Column::SCALED.iter().enumerate() {
            let value = vector.get(column);
            vector.set(column, (value - self.mean[i]) / self.scale[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;

    fn unit_scaler() -> StandardScaler {
        StandardScaler {
            feature_names: None,
            mean: vec![1.0; SCALED_COUNT],
            scale: vec![2.0; SCALED_COUNT],
        }
    }

    #[test]
    fn test_only_numeric_columns_change() {
        let mut vector = FeatureVector::zeroed();
        for column in Column::ALL {
            vector.set(column, 5.0);
        }
        unit_scaler().transform(&mut vector);

        for (column, value) in vector.columns() {
            if column.is_scaled() {
                assert_eq!(value, 2.0, "{} should be scaled", column.name());
            } else {
                assert_eq!(value, 5.0, "{} should be untouched", column.name());
            }
        }
    }

    #[test]
    fn test_parameters_are_per_column() {
        let mut scaler = unit_scaler();
        scaler.mean[8] = 5.0;
        scaler.scale[8] = 20.0;
        let mut vector = FeatureVector::zeroed();
        vector.set(Column::PageValues, 10.0);
        vector.set(Column::Administrative, 3.0);
        scaler.transform(&mut vector);
        assert_eq!(vector[Column::PageValues], 0.25);
        assert_eq!(vector[Column::Administrative], 1.0);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let scaler = StandardScaler {
            feature_names: None,
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        };
        assert!(matches!(
            scaler.check(),
            Err(ShopperError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut scaler = unit_scaler();
        scaler.scale[3] = 0.0;
        let err = scaler.check().unwrap_err();
        assert!(err.to_string().contains("Informational_Duration"));
    }

    #[test]
    fn test_feature_names_must_match_order() {
        let mut names: Vec<String> = Column::SCALED.iter().map(|c| c.name().to_string()).collect();
        let mut scaler = unit_scaler();
        scaler.feature_names = Some(names.clone());
        assert!(scaler.check().is_ok());

        names.swap(6, 7);
        scaler.feature_names = Some(names);
        assert!(scaler.check().is_err());
    }
}
