pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use market_study_core::formatting::Locale;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: OutputFormat, locale: Locale, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, locale),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The quarterly series inside a projection or analysis envelope, if any.
pub(crate) fn projected_periods(value: &Value) -> Option<&Vec<Value>> {
    let result = value.get("result")?;
    result
        .get("periods")
        .or_else(|| result.get("projection").and_then(|p| p.get("periods")))
        .and_then(Value::as_array)
}

pub(crate) const PERIOD_FIGURES: [&str; 5] = [
    "new_clients",
    "clients",
    "revenue",
    "costs",
    "cumulative_profit_loss",
];

/// Flat `(column, value)` pairs for one quarter: label, then each figure for
/// baseline and assisted.
pub(crate) fn flatten_period(point: &Value) -> Vec<(String, Value)> {
    let mut row = vec![(
        "quarter".to_string(),
        point.get("label").cloned().unwrap_or(Value::Null),
    )];
    for scenario in ["baseline", "assisted"] {
        for field in PERIOD_FIGURES {
            let v = point
                .get(scenario)
                .and_then(|s| s.get(field))
                .cloned()
                .unwrap_or(Value::Null);
            row.push((format!("{scenario}_{field}"), v));
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point() -> Value {
        json!({
            "period": 1,
            "label": "Q1",
            "baseline": {"new_clients": "13", "clients": "11.245", "revenue": "3002.42",
                         "costs": "57350", "cumulative_profit_loss": "-54347.58"},
            "assisted": {"new_clients": "17", "clients": "15.27875", "revenue": "4079.43",
                         "costs": "63055", "cumulative_profit_loss": "-58975.57"}
        })
    }

    #[test]
    fn test_periods_found_in_projection_and_analysis() {
        let projection = json!({"result": {"periods": [point()]}});
        let analysis = json!({"result": {"projection": {"periods": [point(), point()]}}});
        assert_eq!(projected_periods(&projection).map(Vec::len), Some(1));
        assert_eq!(projected_periods(&analysis).map(Vec::len), Some(2));
        assert!(projected_periods(&json!({"result": {"period": 3}})).is_none());
    }

    #[test]
    fn test_flatten_period_columns() {
        let row = flatten_period(&point());
        assert_eq!(row.len(), 11);
        assert_eq!(row[0], ("quarter".to_string(), json!("Q1")));
        assert_eq!(row[3], ("baseline_revenue".to_string(), json!("3002.42")));
        assert_eq!(row[10].0, "assisted_cumulative_profit_loss");
    }
}
