//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use shopper_common::SessionFeatures;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shopperctl")]
#[command(about = "Shopper Intent - predict whether a shopping session ends in a purchase", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $SHOPPER_CONFIG, /etc/shopper/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Artifact directory, overriding the config
    #[arg(long, global = true)]
    pub artifacts: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict purchase intent for one session
    #[command(allow_negative_numbers = true)]
    Predict(PredictArgs),

    /// Load the model artifacts and describe them
    Check,

    /// Show the feature column order the model expects
    Columns,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Read session features from a JSON file ("-" for stdin). Flags override its values.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the encoded and scaled feature vectors
    #[arg(long)]
    pub explain: bool,

    /// Ask a running shopperd (e.g. http://127.0.0.1:7870) instead of loading artifacts
    #[arg(long)]
    pub remote: Option<String>,
}

/// One flag per session field. Unset flags keep the base session's value.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Administrative pages visited
    #[arg(long)]
    pub administrative: Option<i64>,

    /// Seconds spent on administrative pages
    #[arg(long)]
    pub administrative_duration: Option<f64>,

    /// Informational pages visited
    #[arg(long)]
    pub informational: Option<i64>,

    /// Seconds spent on informational pages
    #[arg(long)]
    pub informational_duration: Option<f64>,

    /// Product pages visited
    #[arg(long)]
    pub product_related: Option<i64>,

    /// Seconds spent on product pages
    #[arg(long)]
    pub product_related_duration: Option<f64>,

    #[arg(long)]
    pub bounce_rates: Option<f64>,

    #[arg(long)]
    pub exit_rates: Option<f64>,

    #[arg(long)]
    pub page_values: Option<f64>,

    /// Closeness to a special day, 0-1
    #[arg(long)]
    pub special_day: Option<f64>,

    /// Month abbreviation as the model knows it (Feb, Mar, June, ...)
    #[arg(long)]
    pub month: Option<String>,

    #[arg(long)]
    pub operating_systems: Option<i64>,

    #[arg(long)]
    pub browser: Option<i64>,

    #[arg(long)]
    pub region: Option<i64>,

    #[arg(long)]
    pub traffic_type: Option<i64>,

    /// New_Visitor, Returning_Visitor or Other
    #[arg(long)]
    pub visitor_type: Option<String>,

    /// Session happened on a weekend ("--weekend" or "--weekend false")
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub weekend: Option<bool>,
}

impl SessionArgs {
    /// Overlay the flags that were given onto `base`.
    pub fn apply(self, base: SessionFeatures) -> SessionFeatures {
        SessionFeatures {
            administrative: self.administrative.unwrap_or(base.administrative),
            administrative_duration: self
                .administrative_duration
                .unwrap_or(base.administrative_duration),
            informational: self.informational.unwrap_or(base.informational),
            informational_duration: self
                .informational_duration
                .unwrap_or(base.informational_duration),
            product_related: self.product_related.unwrap_or(base.product_related),
            product_related_duration: self
                .product_related_duration
                .unwrap_or(base.product_related_duration),
            bounce_rates: self.bounce_rates.unwrap_or(base.bounce_rates),
            exit_rates: self.exit_rates.unwrap_or(base.exit_rates),
            page_values: self.page_values.unwrap_or(base.page_values),
            special_day: self.special_day.unwrap_or(base.special_day),
            month: self.month.unwrap_or(base.month),
            operating_systems: self.operating_systems.unwrap_or(base.operating_systems),
            browser: self.browser.unwrap_or(base.browser),
            region: self.region.unwrap_or(base.region),
            traffic_type: self.traffic_type.unwrap_or(base.traffic_type),
            visitor_type: self.visitor_type.unwrap_or(base.visitor_type),
            weekend: self.weekend.unwrap_or(base.weekend),
        }
    }
}
