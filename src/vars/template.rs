use std::collections::BTreeMap;

/// Replaces every `{{name}}` marker with its bound value.
///
/// Markers with no binding are left verbatim so a chain that references a
/// failed or future extraction degrades instead of aborting.
#[must_use]
pub fn render_template(input: &str, vars: &BTreeMap<String, String>) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    while let Some(start) = rest.find("{{") {
        let (before, marker_on) = rest.split_at(start);
        output.push_str(before);

        let Some(inner) = marker_on.strip_prefix("{{") else {
            output.push_str(marker_on);
            return output;
        };
        let Some(end) = inner.find("}}") else {
            // Unterminated marker; emit the tail untouched.
            output.push_str(marker_on);
            return output;
        };
        let (raw_name, after) = inner.split_at(end);
        let name = raw_name.trim();
        match vars.get(name) {
            Some(value) => output.push_str(value),
            None => {
                output.push_str("{{");
                output.push_str(raw_name);
                output.push_str("}}");
            }
        }
        rest = after.strip_prefix("}}").unwrap_or(after);
    }

    output.push_str(rest);
    output
}

/// Recursive substitution over a JSON structure.
///
/// String leaves are rendered as templates; arrays and objects recurse;
/// every other leaf passes through untouched.
#[must_use]
pub fn render_json(value: &serde_json::Value, vars: &BTreeMap<String, String>) -> serde_json::Value {
    match value {
        serde_json::Value::String(text) => serde_json::Value::String(render_template(text, vars)),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(|item| render_json(item, vars)).collect())
        }
        serde_json::Value::Object(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(key, item)| (key.clone(), render_json(item, vars)))
                .collect(),
        ),
        serde_json::Value::Null | serde_json::Value::Bool(_) | serde_json::Value::Number(_) => {
            value.clone()
        }
    }
}
