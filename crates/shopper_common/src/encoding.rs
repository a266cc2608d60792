//! Categorical encodings.
//!
//! The fitted label encoder is the only source of codes. A category's code is
//! its index in the encoder's sorted `classes` list.

use crate::error::{Result, ShopperError};
use serde::{Deserialize, Serialize};

/// A fitted categorical → code table for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingTable {
    classes: Vec<String>,
}

impl EncodingTable {
    /// Build a table, enforcing the fitted encoder's invariants:
    /// non-empty, strictly sorted, no duplicates.
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let table = Self { classes };
        table.check()?;
        Ok(table)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(ShopperError::ModelUnavailable(
                "encoder has no classes".to_string(),
            ));
        }
        if let Some(pair) = self.classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ShopperError::ModelUnavailable(format!(
                "encoder classes are not strictly sorted ('{}' before '{}')",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Code for `value`, or `UnknownCategory` naming `field`.
    pub fn encode(&self, field: &'static str, value: &str) -> Result<f64> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map(|index| index as f64)
            .map_err(|_| ShopperError::UnknownCategory {
                field,
                value: value.to_string(),
            })
    }
}

/// Weekend flag as the model saw it.
pub fn encode_flag(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> EncodingTable {
        EncodingTable::new(
            ["Aug", "Dec", "Feb", "Jul", "June", "Mar", "May", "Nov", "Oct", "Sep"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_code_is_sorted_position() {
        let table = months();
        assert_eq!(table.encode("Month", "Aug").unwrap(), 0.0);
        assert_eq!(table.encode("Month", "Feb").unwrap(), 2.0);
        assert_eq!(table.encode("Month", "June").unwrap(), 4.0);
        assert_eq!(table.encode("Month", "Sep").unwrap(), 9.0);
    }

    #[test]
    fn test_unknown_month_rejected() {
        let err = months().encode("Month", "Xyz").unwrap_err();
        assert_eq!(
            err,
            ShopperError::UnknownCategory {
                field: "Month",
                value: "Xyz".to_string(),
            }
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(months().encode("Month", "feb").is_err());
        assert!(months().encode("Month", "Jun").is_err());
    }

    #[test]
    fn test_unsorted_classes_rejected() {
        let err = EncodingTable::new(vec!["Returning_Visitor".into(), "New_Visitor".into()])
            .unwrap_err();
        assert!(matches!(err, ShopperError::ModelUnavailable(_)));
    }

    #[test]
    fn test_duplicate_classes_rejected() {
        assert!(EncodingTable::new(vec!["Other".into(), "Other".into()]).is_err());
    }

    #[test]
    fn test_empty_classes_rejected() {
        assert!(EncodingTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_encode_flag() {
        assert_eq!(encode_flag(true), 1.0);
        assert_eq!(encode_flag(false), 0.0);
    }
}
