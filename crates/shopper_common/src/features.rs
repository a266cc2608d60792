//! Session features and the training-time column contract.
//!
//! The model and scaler were fitted on seventeen columns in one fixed order.
//! [`Column::ALL`] is that order. Nothing else in the crate is allowed to
//! decide where a value lands in the feature vector.

use serde::{Deserialize, Serialize};

/// Number of columns the classifier was fitted on.
pub const FEATURE_COUNT: usize = 17;

/// Number of leading columns that pass through the scaler.
pub const SCALED_COUNT: usize = 10;

/// One column of the feature vector, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Administrative,
    AdministrativeDuration,
    Informational,
    InformationalDuration,
    ProductRelated,
    ProductRelatedDuration,
    BounceRates,
    ExitRates,
    PageValues,
    SpecialDay,
    Month,
    OperatingSystems,
    Browser,
    Region,
    TrafficType,
    VisitorType,
    Weekend,
}

impl Column {
    pub const ALL: [Column; FEATURE_COUNT] = [
        Column::Administrative,
        Column::AdministrativeDuration,
        Column::Informational,
        Column::InformationalDuration,
        Column::ProductRelated,
        Column::ProductRelatedDuration,
        Column::BounceRates,
        Column::ExitRates,
        Column::PageValues,
        Column::SpecialDay,
        Column::Month,
        Column::OperatingSystems,
        Column::Browser,
        Column::Region,
        Column::TrafficType,
        Column::VisitorType,
        Column::Weekend,
    ];

    /// Columns transformed by the scaler. Everything else is already encoded.
    pub const SCALED: [Column; SCALED_COUNT] = [
        Column::Administrative,
        Column::AdministrativeDuration,
        Column::Informational,
        Column::InformationalDuration,
        Column::ProductRelated,
        Column::ProductRelatedDuration,
        Column::BounceRates,
        Column::ExitRates,
        Column::PageValues,
        Column::SpecialDay,
    ];

    /// Column name as it appeared in the training frame.
    pub fn name(self) -> &'static str {
        match self {
            Column::Administrative => "Administrative",
            Column::AdministrativeDuration => "Administrative_Duration",
            Column::Informational => "Informational",
            Column::InformationalDuration => "Informational_Duration",
            Column::ProductRelated => "ProductRelated",
            Column::ProductRelatedDuration => "ProductRelated_Duration",
            Column::BounceRates => "BounceRates",
            Column::ExitRates => "ExitRates",
            Column::PageValues => "PageValues",
            Column::SpecialDay => "SpecialDay",
            Column::Month => "Month",
            Column::OperatingSystems => "OperatingSystems",
            Column::Browser => "Browser",
            Column::Region => "Region",
            Column::TrafficType => "TrafficType",
            Column::VisitorType => "VisitorType",
            Column::Weekend => "Weekend",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Position in the feature vector.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_scaled(self) -> bool {
        self.index() < SCALED_COUNT
    }
}

/// Raw field values for one shopping session, as supplied by a caller.
///
/// Keys on the wire are the training column names. Integer fields are
/// signed so negative counts reach validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFeatures {
    #[serde(rename = "Administrative")]
    pub administrative: i64,
    #[serde(rename = "Administrative_Duration")]
    pub administrative_duration: f64,
    #[serde(rename = "Informational")]
    pub informational: i64,
    #[serde(rename = "Informational_Duration")]
    pub informational_duration: f64,
    #[serde(rename = "ProductRelated")]
    pub product_related: i64,
    #[serde(rename = "ProductRelated_Duration")]
    pub product_related_duration: f64,
    #[serde(rename = "BounceRates")]
    pub bounce_rates: f64,
    #[serde(rename = "ExitRates")]
    pub exit_rates: f64,
    #[serde(rename = "PageValues")]
    pub page_values: f64,
    #[serde(rename = "SpecialDay")]
    pub special_day: f64,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "OperatingSystems")]
    pub operating_systems: i64,
    #[serde(rename = "Browser")]
    pub browser: i64,
    #[serde(rename = "Region")]
    pub region: i64,
    #[serde(rename = "TrafficType")]
    pub traffic_type: i64,
    #[serde(rename = "VisitorType")]
    pub visitor_type: String,
    #[serde(rename = "Weekend")]
    pub weekend: bool,
}

impl SessionFeatures {
    /// Raw value of a numeric or code column, before any encoding.
    ///
    /// Returns `None` for Month, VisitorType and Weekend, which need an
    /// encoder (or the 1/0 rule) to become numbers.
    pub fn raw_numeric(&self, column: Column) -> Option<f64> {
        let value = match column {
            Column::Administrative => self.administrative as f64,
            Column::AdministrativeDuration => self.administrative_duration,
            Column::Informational => self.informational as f64,
            Column::InformationalDuration => self.informational_duration,
            Column::ProductRelated => self.product_related as f64,
            Column::ProductRelatedDuration => self.product_related_duration,
            Column::BounceRates => self.bounce_rates,
            Column::ExitRates => self.exit_rates,
            Column::PageValues => self.page_values,
            Column::SpecialDay => self.special_day,
            Column::OperatingSystems => self.operating_systems as f64,
            Column::Browser => self.browser as f64,
            Column::Region => self.region as f64,
            Column::TrafficType => self.traffic_type as f64,
            Column::Month | Column::VisitorType | Column::Weekend => return None,
        };
        Some(value)
    }
}

impl Default for SessionFeatures {
    /// The reference session: the values a fresh form starts with.
    fn default() -> Self {
        Self {
            administrative: 2,
            administrative_duration: 80.0,
            informational: 0,
            informational_duration: 40.0,
            product_related: 10,
            product_related_duration: 1200.0,
            bounce_rates: 0.02,
            exit_rates: 0.05,
            page_values: 10.0,
            special_day: 0.0,
            month: "Feb".to_string(),
            operating_systems: 2,
            browser: 2,
            region: 1,
            traffic_type: 1,
            visitor_type: "Returning_Visitor".to_string(),
            weekend: false,
        }
    }
}
