use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "display",
        "financial_benefit",
        "summary",
        "time_gain_quarters",
        "period",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Projection: closing cumulative P&L for both scenarios
        if let Some(last) = map
            .get("periods")
            .and_then(Value::as_array)
            .and_then(|p| p.last())
        {
            for scenario in ["baseline", "assisted"] {
                if let Some(pl) = last.get(scenario).and_then(|s| s.get("cumulative_profit_loss")) {
                    println!("{}: {}", scenario, format_minimal(pl));
                }
            }
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(map) => map
            .get("financial_benefit")
            .map(format_minimal)
            .unwrap_or_else(|| serde_json::to_string(value).unwrap_or_default()),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
