use serde_json::Value;

use crate::database::rows::RowMap;

/// Collapse a `content` field holding `[{"title": .., "body": ..}, ..]` into
/// readable text: each section as `"title:\nbody"`, joined by newlines.
///
/// The field may arrive as JSON text or as an already-decoded json/jsonb
/// value. Anything that does not parse as such a list is left untouched.
pub fn flatten_content(row: &mut RowMap) {
    let sections = match row.get("content") {
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => parsed,
            Err(_) => return,
        },
        Some(value @ Value::Array(_)) => value.clone(),
        _ => return,
    };

    if let Some(text) = render_sections(&sections) {
        row.insert("content".to_string(), Value::String(text));
    }
}

fn render_sections(sections: &Value) -> Option<String> {
    let parts = sections
        .as_array()?
        .iter()
        .map(|section| {
            let title = text_of(section.get("title")?);
            let body = text_of(section.get("body")?);
            Some(format!("{}:\n{}", title, body))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("\n"))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
