//! Turning backend error payloads into something a person can read.

use serde_json::Value;

/// Message used when the payload carries nothing useful.
pub const GENERIC_FAILURE: &str = "The server rejected the request";

/// Describe an error response body.
///
/// Validation errors shaped as `{"detail": [{"loc": [...], "msg": "..."}]}`
/// become one `path: message` line per entry. A string `detail` is used
/// as-is, other JSON is echoed compactly, and anything else falls back to
/// [`GENERIC_FAILURE`].
pub fn describe_failure(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return GENERIC_FAILURE.to_string();
    };

    match value.get("detail") {
        Some(Value::Array(items)) => match describe_field_errors(items) {
            Some(lines) => lines,
            None => value.to_string(),
        },
        Some(Value::String(text)) => text.clone(),
        _ if value.is_null() => GENERIC_FAILURE.to_string(),
        _ => value.to_string(),
    }
}

fn describe_field_errors(items: &[Value]) -> Option<String> {
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let msg = item.get("msg")?.as_str()?;
        let path = item
            .get("loc")
            .and_then(Value::as_array)
            .map(|loc| field_path(loc))
            .unwrap_or_default();

        if path.is_empty() {
            lines.push(msg.to_string());
        } else {
            lines.push(format!("{}: {}", path, msg));
        }
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn field_path(loc: &[Value]) -> String {
    loc.iter()
        .filter_map(|segment| match segment {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .skip_while(|s| s == "body")
        .collect::<Vec<_>>()
        .join(".")
}
