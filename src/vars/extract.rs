use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use crate::config::{VariableRule, VariableSource};

use super::{VarEnvironment, VarValue};

/// Walks a parsed JSON document along a dot-separated path.
///
/// Numeric segments index into arrays; any missing segment yields `None`.
#[must_use]
pub fn lookup_json_path<'doc>(
    root: &'doc serde_json::Value,
    path: &str,
) -> Option<&'doc serde_json::Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            serde_json::Value::Object(fields) => fields.get(segment)?,
            serde_json::Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Number(_)
            | serde_json::Value::String(_) => return None,
        };
    }
    Some(current)
}

/// Evaluates every extraction rule of an endpoint against one response.
///
/// Missing paths or headers are skipped with a warning; they never fail the
/// run. Returns the number of bindings written.
#[must_use]
pub fn apply_extraction_rules(
    endpoint: &str,
    rules: &[VariableRule],
    env: &VarEnvironment,
    headers: &HeaderMap,
    body: &[u8],
) -> usize {
    let parsed_body: Option<serde_json::Value> = match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(err) => {
            if rules
                .iter()
                .any(|rule| rule.from == VariableSource::ResponseBody)
            {
                warn!(
                    "Endpoint '{}': response body is not JSON, body extractions skipped: {}",
                    endpoint, err
                );
            }
            None
        }
    };

    let mut bound: usize = 0;
    for rule in rules {
        let value = match rule.from {
            VariableSource::ResponseBody => parsed_body
                .as_ref()
                .and_then(|root| lookup_json_path(root, &rule.path))
                .map(|found| VarValue::from_json(found.clone())),
            VariableSource::ResponseHeaders => headers
                .get(&rule.path)
                .and_then(|header| header.to_str().ok())
                .map(|text| VarValue::Text(text.to_owned())),
        };

        match value {
            Some(value) => {
                debug!(
                    "Endpoint '{}': bound variable '{}' from '{}'.",
                    endpoint, rule.name, rule.path
                );
                env.set(&rule.name, value);
                bound = bound.saturating_add(1);
            }
            None => {
                warn!(
                    "Endpoint '{}': extraction path '{}' for variable '{}' not found, skipped.",
                    endpoint, rule.path, rule.name
                );
            }
        }
    }
    bound
}
