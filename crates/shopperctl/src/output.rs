//! Output formatting - plain ASCII, color on the status tags only.

use owo_colors::OwoColorize;
use shopper_common::{Column, ErrorResponse, ModelInfo, PredictionResult, PredictionTrace};

pub fn format_result(result: &PredictionResult) -> String {
    let tag = if result.will_purchase {
        "[PURCHASE]".bright_green().to_string()
    } else {
        "[NO PURCHASE]".yellow().to_string()
    };
    format!("{}  {}", tag, result.summary())
}

/// Both vectors side by side, one row per column.
pub fn format_trace(trace: &PredictionTrace) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<3} {:<24} {:>14} {:>14}\n",
        "#", "Column", "Encoded", "Scaled"
    ));
    for (column, encoded) in trace.encoded.columns() {
        let marker = if column.is_scaled() { "" } else { "  (unscaled)" };
        out.push_str(&format!(
            "{:<3} {:<24} {:>14.6} {:>14.6}{}\n",
            column.index(),
            column.name(),
            encoded,
            trace.scaled[column],
            marker
        ));
    }
    out.push_str(&format!("Decision value: {:.6}\n", trace.decision));
    out
}

pub fn format_info(info: &ModelInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  Model artifacts loaded\n", "[OK]".green()));
    out.push_str(&format!("  Classifier:     {}", info.classifier_kind));
    if info.trees > 0 {
        out.push_str(&format!(" ({} trees)", info.trees));
    }
    out.push('\n');
    out.push_str(&format!("  Months:         {}\n", info.month_classes.join(", ")));
    out.push_str(&format!("  Visitor types:  {}\n", info.visitor_types.join(", ")));
    out.push_str(&format!(
        "  Columns:        {} ({} scaled)\n",
        info.columns.len(),
        info.scaled_columns.len()
    ));
    out
}

pub fn format_columns() -> String {
    let mut out = String::new();
    for column in Column::ALL {
        let scaled = if column.is_scaled() { "scaled" } else { "as-is" };
        out.push_str(&format!("{:>2}  {:<24} {}\n", column.index(), column.name(), scaled));
    }
    out
}

pub fn format_rejection(err: &ErrorResponse) -> String {
    format!("{}  {}", "[REJECTED]".bright_red(), err.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_result_includes_summary() {
        let text = format_result(&PredictionResult::from_probability(0.7310585786300049));
        assert!(text.contains("[PURCHASE]"));
        assert!(text.contains("73.11%"));
    }

    #[test]
    fn test_format_columns_in_order() {
        let text = format_columns();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert!(lines[0].contains("Administrative") && lines[0].contains("scaled"));
        assert!(lines[10].contains("Month") && lines[10].contains("as-is"));
        assert!(lines[16].contains("Weekend"));
    }

    #[test]
    fn test_format_rejection() {
        let err = ErrorResponse {
            code: -32010,
            kind: "unknown_category".to_string(),
            message: "Unknown Month category: 'Xyz'".to_string(),
        };
        assert!(format_rejection(&err).contains("Unknown Month category"));
    }
}
