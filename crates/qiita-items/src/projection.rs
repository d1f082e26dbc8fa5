//! Field projection over raw item records.
//!
//! Items are handled as open JSON mappings so upstream schema drift never
//! turns into a type error. Projection starts from a fixed default field set
//! and merges caller-requested additional fields on top:
//!
//! - plain names (`"likes_count"`) copy the top-level value as is;
//! - dotted names (`"user.id"`) copy one child of an object-valued parent;
//! - anything missing or of the wrong shape is dropped without error.
//!
//! Everything here is pure and synchronous.

use serde_json::{Map, Value};

/// Top-level scalar fields always projected.
pub const DEFAULT_FIELDS: &[&str] = &["title", "url", "created_at"];

/// Nested fields always projected, as `(parent, child)`.
pub const DEFAULT_NESTED_FIELDS: &[(&str, &str)] = &[("user", "name")];

/// Projects one raw item onto the default fields plus `additional_fields`.
///
/// A non-object `raw` value projects to an empty object.
pub fn project(raw: &Value, additional_fields: &[String]) -> Value {
    let defaults = default_projection(raw);
    if additional_fields.is_empty() {
        return Value::Object(defaults);
    }
    let staged = stage_additional(raw, additional_fields);
    Value::Object(merge_staged(defaults, staged))
}

/// Projects every item, preserving order.
pub fn project_all(raws: &[Value], additional_fields: &[String]) -> Vec<Value> {
    raws.iter()
        .map(|raw| project(raw, additional_fields))
        .collect()
}

/// Reads the default field set off a raw item.
///
/// Only non-null values are copied. For nested defaults only the named child
/// is copied, never the whole parent object.
pub fn default_projection(raw: &Value) -> Map<String, Value> {
    let mut out = Map::new();

    for &field in DEFAULT_FIELDS {
        if let Some(value) = raw.get(field).filter(|v| !v.is_null()) {
            out.insert(field.to_string(), value.clone());
        }
    }

    for &(parent, child) in DEFAULT_NESTED_FIELDS {
        let Some(value) = raw
            .get(parent)
            .and_then(Value::as_object)
            .and_then(|obj| obj.get(child))
            .filter(|v| !v.is_null())
        else {
            continue;
        };
        let slot = out
            .entry(parent.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(nested) = slot {
            nested.insert(child.to_string(), value.clone());
        }
    }

    out
}

/// Collects requested additional fields into an accumulator.
///
/// Later entries win on key conflicts. A dotted entry uses its first two
/// segments as `parent.child`.
pub fn stage_additional(raw: &Value, additional_fields: &[String]) -> Map<String, Value> {
    let mut staged = Map::new();

    for field in additional_fields {
        match split_path(field) {
            Some((parent, child)) => {
                let Some(value) = raw
                    .get(parent)
                    .and_then(Value::as_object)
                    .and_then(|obj| obj.get(child))
                else {
                    continue;
                };
                let slot = staged
                    .entry(parent.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(nested) = slot {
                    nested.insert(child.to_string(), value.clone());
                }
            }
            None => {
                if let Some(value) = raw.get(field.as_str()) {
                    staged.insert(field.clone(), value.clone());
                }
            }
        }
    }

    staged
}

/// Merges staged fields onto the defaults.
///
/// Where both sides hold an object the merge is shallow and staged keys win;
/// otherwise the staged value replaces the default outright.
pub fn merge_staged(
    mut defaults: Map<String, Value>,
    staged: Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in staged {
        match value {
            Value::Object(incoming) if defaults.get(&key).is_some_and(Value::is_object) => {
                if let Some(Value::Object(existing)) = defaults.get_mut(&key) {
                    existing.extend(incoming);
                }
            }
            value => {
                defaults.insert(key, value);
            }
        }
    }
    defaults
}

fn split_path(field: &str) -> Option<(&str, &str)> {
    let mut parts = field.split('.');
    let parent = parts.next()?;
    let child = parts.next()?;
    Some((parent, child))
}
