//! Numeric field domains.
//!
//! Out-of-range values are rejected. There is no clamping mode: a clamped
//! value would still produce a prediction, just not for the session the
//! caller described.

use crate::error::{Result, ShopperError};
use crate::features::{Column, SessionFeatures};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Inclusive `[min, max]` range for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDomain {
    pub min: f64,
    pub max: f64,
}

impl FieldDomain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN and infinities are never contained.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Default ranges, taken from the input form's widget limits.
const DEFAULT_BOUNDS: [(Column, FieldDomain); 14] = [
    (Column::Administrative, FieldDomain::new(0.0, 50.0)),
    (Column::AdministrativeDuration, FieldDomain::new(0.0, 5000.0)),
    (Column::Informational, FieldDomain::new(0.0, 30.0)),
    (Column::InformationalDuration, FieldDomain::new(0.0, 3000.0)),
    (Column::ProductRelated, FieldDomain::new(0.0, 1000.0)),
    (Column::ProductRelatedDuration, FieldDomain::new(0.0, 70000.0)),
    (Column::BounceRates, FieldDomain::new(0.0, 1.0)),
    (Column::ExitRates, FieldDomain::new(0.0, 1.0)),
    (Column::PageValues, FieldDomain::new(0.0, 400.0)),
    (Column::SpecialDay, FieldDomain::new(0.0, 1.0)),
    (Column::OperatingSystems, FieldDomain::new(1.0, 8.0)),
    (Column::Browser, FieldDomain::new(1.0, 13.0)),
    (Column::Region, FieldDomain::new(1.0, 9.0)),
    (Column::TrafficType, FieldDomain::new(1.0, 20.0)),
];

/// Bounds for every numeric and code column.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainBounds {
    bounds: BTreeMap<Column, FieldDomain>,
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self {
            bounds: DEFAULT_BOUNDS.into_iter().collect(),
        }
    }
}

impl DomainBounds {
    /// Defaults with per-column overrides keyed by training column name.
    pub fn with_overrides(overrides: &HashMap<String, FieldDomain>) -> Result<Self> {
        let mut bounds = Self::default();
        for (name, domain) in overrides {
            let column = Column::from_name(name)
                .filter(|c| bounds.bounds.contains_key(c))
                .ok_or_else(|| {
                    ShopperError::Config(format!("'{}' is not a bounded numeric column", name))
                })?;
            if !domain.min.is_finite() || !domain.max.is_finite() || domain.min > domain.max {
                return Err(ShopperError::Config(format!(
                    "invalid bounds for {}: [{}, {}]",
                    name, domain.min, domain.max
                )));
            }
            bounds.bounds.insert(column, *domain);
        }
        Ok(bounds)
    }

    pub fn get(&self, column: Column) -> Option<FieldDomain> {
        self.bounds.get(&column).copied()
    }

    /// Check every bounded column, in column order. The first violation wins.
    pub fn validate(&self, features: &SessionFeatures) -> Result<()> {
        for (&column, domain) in &self.bounds {
            let Some(value) = features.raw_numeric(column) else {
                continue;
            };
            if !domain.contains(value) {
                return Err(ShopperError::OutOfDomain {
                    field: column.name(),
                    value,
                    min: domain.min,
                    max: domain.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_session_is_in_domain() {
        assert!(DomainBounds::default()
            .validate(&SessionFeatures::default())
            .is_ok());
    }

    #[test]
    fn test_every_numeric_column_is_bounded() {
        let bounds = DomainBounds::default();
        let features = SessionFeatures::default();
        for column in Column::ALL {
            assert_eq!(
                bounds.get(column).is_some(),
                features.raw_numeric(column).is_some(),
                "{}",
                column.name()
            );
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let features = SessionFeatures {
            administrative: -1,
            ..SessionFeatures::default()
        };
        let err = DomainBounds::default().validate(&features).unwrap_err();
        assert_eq!(
            err,
            ShopperError::OutOfDomain {
                field: "Administrative",
                value: -1.0,
                min: 0.0,
                max: 50.0,
            }
        );
    }

    #[test]
    fn test_ratio_above_one_rejected() {
        let features = SessionFeatures {
            bounce_rates: 1.5,
            ..SessionFeatures::default()
        };
        let err = DomainBounds::default().validate(&features).unwrap_err();
        assert!(matches!(
            err,
            ShopperError::OutOfDomain {
                field: "BounceRates",
                ..
            }
        ));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let features = SessionFeatures {
            exit_rates: 1.0,
            special_day: 0.0,
            traffic_type: 20,
            operating_systems: 1,
            ..SessionFeatures::default()
        };
        assert!(DomainBounds::default().validate(&features).is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let features = SessionFeatures {
            page_values: f64::NAN,
            ..SessionFeatures::default()
        };
        let err = DomainBounds::default().validate(&features).unwrap_err();
        assert!(matches!(
            err,
            ShopperError::OutOfDomain {
                field: "PageValues",
                ..
            }
        ));
    }

    #[test]
    fn test_code_zero_rejected() {
        let features = SessionFeatures {
            region: 0,
            ..SessionFeatures::default()
        };
        assert!(DomainBounds::default().validate(&features).is_err());
    }

    #[test]
    fn test_first_violation_in_column_order() {
        let features = SessionFeatures {
            browser: 99,
            informational: -5,
            ..SessionFeatures::default()
        };
        let err = DomainBounds::default().validate(&features).unwrap_err();
        assert!(matches!(
            err,
            ShopperError::OutOfDomain {
                field: "Informational",
                ..
            }
        ));
    }

    #[test]
    fn test_override_widens_range() {
        let mut overrides = HashMap::new();
        overrides.insert("ProductRelated".to_string(), FieldDomain::new(0.0, 2000.0));
        let bounds = DomainBounds::with_overrides(&overrides).unwrap();

        let features = SessionFeatures {
            product_related: 1500,
            ..SessionFeatures::default()
        };
        assert!(bounds.validate(&features).is_ok());
        assert!(DomainBounds::default().validate(&features).is_err());
    }

    #[test]
    fn test_override_on_categorical_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("Month".to_string(), FieldDomain::new(0.0, 11.0));
        let err = DomainBounds::with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, ShopperError::Config(_)));
    }

    #[test]
    fn test_override_unknown_column_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("CartSize".to_string(), FieldDomain::new(0.0, 1.0));
        assert!(DomainBounds::with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_inverted_override_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("Region".to_string(), FieldDomain::new(9.0, 1.0));
        assert!(DomainBounds::with_overrides(&overrides).is_err());
    }
}
