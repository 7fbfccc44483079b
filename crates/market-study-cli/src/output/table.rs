use market_study_core::formatting::{format_currency, format_number, Locale};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::{flatten_period, projected_periods};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value, locale: Locale) {
    match value {
        Value::Object(map) => {
            if let Some(periods) = projected_periods(value) {
                print_periods_table(periods, locale);
                print_envelope_notes(map);
            } else if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                println!("{}", format_value(item));
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

/// One row per quarter, amounts rendered for `locale`.
fn print_periods_table(periods: &[Value], locale: Locale) {
    let Some(first) = periods.first() else {
        println!("(empty)");
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(flatten_period(first).into_iter().map(|(k, _)| k));
    for point in periods {
        builder.push_record(
            flatten_period(point)
                .iter()
                .map(|(column, v)| format_figure(column, v, locale)),
        );
    }
    println!("{}", Table::from(builder));
}

fn format_figure(column: &str, value: &Value, locale: Locale) -> String {
    let Some(amount) = value.as_str().and_then(|s| Decimal::from_str(s).ok()) else {
        return format_value(value);
    };
    if column.ends_with("clients") {
        format_number(amount, Some(1), locale)
    } else {
        format_currency(amount, locale)
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    print_envelope_notes(envelope);
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
