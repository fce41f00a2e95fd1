use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;

/// Print a serializable value as pretty JSON
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output a list of names in the appropriate format
pub fn output_names(output_format: OutputFormat, key: &str, names: &[String]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(&json!({ key: names, "count": names.len() })),
        OutputFormat::Text => {
            if names.is_empty() {
                println!("No {} found", key);
            }
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Output rows as JSON or as tab-separated text with a header line
pub fn output_rows(output_format: OutputFormat, rows: &[Map<String, Value>], count: i64) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(&json!({ "data": rows, "count": count })),
        OutputFormat::Text => {
            if let Some(first) = rows.first() {
                let header: Vec<&str> = first.keys().map(String::as_str).collect();
                println!("{}", header.join("\t"));
            }
            for row in rows {
                let cells: Vec<String> = row.values().map(cell_text).collect();
                println!("{}", cells.join("\t"));
            }
            println!("({} of {} rows)", rows.len(), count);
            Ok(())
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.replace(['\t', '\n'], " "),
        other => other.to_string(),
    }
}
