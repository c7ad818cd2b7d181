//! Response shape extraction.
//!
//! A response's shape is the set of dot-joined key paths of its nested
//! objects. Arrays contribute only their first element's shape and add no
//! path segment of their own, so `{"items": [{"id": 1}]}` has the shape
//! `{items, items.id}`.

use serde_json::Value;
use std::collections::BTreeSet;

/// Field paths of `body`, or `None` when the body has no comparable shape
/// (null, a scalar, or the harness's parse-failure sentinel string).
pub fn field_paths(body: &Value) -> Option<BTreeSet<String>> {
    match body {
        Value::Object(_) | Value::Array(_) => {
            let mut out = BTreeSet::new();
            collect(body, "", &mut out);
            Some(out)
        }
        _ => None,
    }
}

fn collect(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                if child.is_object() || child.is_array() {
                    collect(child, &path, out);
                }
                out.insert(path);
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                collect(first, prefix, out);
            }
        }
        _ => {}
    }
}

/// Paths removed from and added to a response shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeDelta {
    /// In baseline, absent from current (sorted)
    pub missing: Vec<String>,
    /// In current, absent from baseline (sorted)
    pub added: Vec<String>,
}

impl ShapeDelta {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.added.is_empty()
    }
}

/// Compare the shapes of two response bodies.
///
/// Returns `None` when either body has no comparable shape.
pub fn shape_delta(baseline: &Value, current: &Value) -> Option<ShapeDelta> {
    let a = field_paths(baseline)?;
    let b = field_paths(current)?;
    Some(ShapeDelta {
        missing: a.difference(&b).cloned().collect(),
        added: b.difference(&a).cloned().collect(),
    })
}
