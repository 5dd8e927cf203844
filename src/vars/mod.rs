//! Run-scoped variable environment.
//!
//! Values captured from responses live here for the rest of the run and are
//! substituted into later requests via `{{name}}` templates. The store is
//! created empty when a run starts and dropped with the run.

mod extract;
mod template;


use std::collections::BTreeMap;
use std::sync::RwLock;

pub use extract::{apply_extraction_rules, lookup_json_path};
pub use template::{render_json, render_template};

/// Closed value variant for extracted bindings, so substitution and logging
/// stay exhaustively handled.
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Json(serde_json::Value),
}

impl VarValue {
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => VarValue::Text(text),
            serde_json::Value::Number(number) => VarValue::Number(number),
            serde_json::Value::Bool(flag) => VarValue::Bool(flag),
            other => VarValue::Json(other),
        }
    }

    /// String form used for template substitution.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            VarValue::Text(text) => text.clone(),
            VarValue::Number(number) => number.to_string(),
            VarValue::Bool(flag) => flag.to_string(),
            VarValue::Json(value) => value.to_string(),
        }
    }
}

/// Shared name-to-value store. Writes happen under a short-lived lock; the
/// scheduler snapshots rendered values once per request before substitution.
#[derive(Debug, Default)]
pub struct VarEnvironment {
    values: RwLock<BTreeMap<String, VarValue>>,
}

impl VarEnvironment {
    #[must_use]
    pub fn new() -> Self {
        VarEnvironment::default()
    }

    pub fn set(&self, name: &str, value: VarValue) {
        if let Ok(mut values) = self.values.write() {
            values.insert(name.to_owned(), value);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<VarValue> {
        self.values
            .read()
            .ok()
            .and_then(|values| values.get(name).cloned())
    }

    /// Rendered copy of every binding, for one round of substitution.
    #[must_use]
    pub fn rendered_snapshot(&self) -> BTreeMap<String, String> {
        self.values.read().map_or_else(
            |_| BTreeMap::new(),
            |values| {
                values
                    .iter()
                    .map(|(name, value)| (name.clone(), value.render()))
                    .collect()
            },
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().map_or(0, |values| values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
