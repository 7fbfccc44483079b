use serde_json::Value;
use std::io;

use super::{flatten_period, projected_periods};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(periods) = projected_periods(value) {
        write_periods_csv(&mut wtr, periods);
        let _ = wtr.flush();
        return;
    }

    match value {
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// One row per quarter.
fn write_periods_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, periods: &[Value]) {
    let Some(first) = periods.first() else {
        return;
    };
    let headers: Vec<String> = flatten_period(first).into_iter().map(|(k, _)| k).collect();
    let _ = wtr.write_record(&headers);

    for point in periods {
        let row: Vec<String> = flatten_period(point)
            .iter()
            .map(|(_, v)| format_csv_value(v))
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
