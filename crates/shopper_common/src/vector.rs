//! The encoded, ordered feature vector.

use crate::features::{Column, FEATURE_COUNT};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::Index;

/// Seventeen numbers in training column order.
///
/// Values can only be placed by [`Column`], so the position of a value is
/// always the position its column had when the model was fitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
        }
    }

    pub fn set(&mut self, column: Column, value: f64) {
        self.values[column.index()] = value;
    }

    pub fn get(&self, column: Column) -> f64 {
        self.values[column.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(column, value)` pairs in vector order.
    pub fn columns(&self) -> impl Iterator<Item = (Column, f64)> + '_ {
        Column::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl Index<Column> for FeatureVector {
    type Output = f64;

    fn index(&self, column: Column) -> &f64 {
        &self.values[column.index()]
    }
}

/// Serialized as an object keyed by column name, in column order.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (column, value) in self.columns() {
            map.serialize_entry(column.name(), &value)?;
        }
        map.end()
    }
}

/// Read back from the keyed form. Every column must be present and no other key.
impl<'de> Deserialize<'de> for FeatureVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut keyed = BTreeMap::<String, f64>::deserialize(deserializer)?;
        let mut vector = FeatureVector::zeroed();
        for column in Column::ALL {
            let value = keyed
                .remove(column.name())
                .ok_or_else(|| D::Error::missing_field(column.name()))?;
            vector.set(column, value);
        }
        if let Some(name) = keyed.keys().next() {
            return Err(D::Error::custom(format!("unknown column '{}'", name)));
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_lands_at_column_index() {
        let mut vector = FeatureVector::zeroed();
        vector.set(Column::Month, 2.0);
        vector.set(Column::Weekend, 1.0);
        assert_eq!(vector.as_slice()[10], 2.0);
        assert_eq!(vector.as_slice()[16], 1.0);
        assert_eq!(vector[Column::Month], 2.0);
    }

    #[test]
    fn test_columns_iterates_in_order() {
        let mut vector = FeatureVector::zeroed();
        for column in Column::ALL {
            vector.set(column, column.index() as f64);
        }
        let seen: Vec<Column> = vector.columns().map(|(c, _)| c).collect();
        assert_eq!(seen, Column::ALL.to_vec());
        assert!(vector.columns().all(|(c, v)| v == c.index() as f64));
    }

    #[test]
    fn test_serializes_with_column_names() {
        let mut vector = FeatureVector::zeroed();
        vector.set(Column::PageValues, 0.25);
        let json = serde_json::to_value(vector).unwrap();
        assert_eq!(json["PageValues"], 0.25);
        assert_eq!(json.as_object().unwrap().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_deserializes_from_column_names() {
        let mut vector = FeatureVector::zeroed();
        for column in Column::ALL {
            vector.set(column, column.index() as f64 * 0.5);
        }
        let json = serde_json::to_string(&vector).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);
    }

    #[test]
    fn test_deserialize_rejects_missing_and_unknown_columns() {
        let mut json = serde_json::to_value(FeatureVector::zeroed()).unwrap();
        json.as_object_mut().unwrap().remove("Weekend");
        let err = serde_json::from_value::<FeatureVector>(json.clone()).unwrap_err();
        assert!(err.to_string().contains("Weekend"));

        json["Weekend"] = serde_json::json!(0.0);
        json["Revenue"] = serde_json::json!(1.0);
        let err = serde_json::from_value::<FeatureVector>(json).unwrap_err();
        assert!(err.to_string().contains("Revenue"));
    }
}
