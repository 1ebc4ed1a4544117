use serde_json::Value;

/// Flattens a chat-JSON document into plain text: servers send either a
/// bare string or an object tree with `text`/`extra`/`translate` nodes.
/// Used for human-readable disconnect reasons and chat logging.
pub fn chat_to_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            let mut out = String::new();
            collect_text(&value, &mut out);
            if out.is_empty() {
                raw.to_string()
            } else {
                out
            }
        }
        // Some servers skip JSON for kick reasons entirely.
        Err(_) => raw.to_string(),
    }
}

fn collect_text(node: &Value, out: &mut String) {
    match node {
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            } else if let Some(Value::String(translate)) = map.get("translate") {
                out.push_str(translate);
            }
            if let Some(extra) = map.get("extra") {
                collect_text(extra, out);
            }
        }
        _ => {}
    }
}
