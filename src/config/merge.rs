//! Deep merge functionality for configuration layers.
//!
//! Record-like containers are merged key by key, with `overlay` taking precedence.
//! List-like containers are replaced entirely, never concatenated or merged element-wise.
//! Whether a container is list-like is decided by the shape of the *base* value.

use serde_json::{Map, Value};

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// For every key of `overlay`:
/// - missing in `base`, or a scalar in `overlay`: the overlay value replaces
/// - a container in `base` that consists of numeric keys: the overlay value replaces
/// - any other container in `base`: merged recursively
/// - a scalar in `base`: the overlay value replaces (merging into an empty mapping)
///
/// Keys present only in `base` are kept in place.
///
/// At the top level a sequence is treated as a mapping keyed by its indices, and two
/// sequences merge index by index. A scalar `overlay` has no keys and leaves `base`
/// untouched.
///
/// # Example
/// ```
/// use serde_json::json;
/// use envconf::config::deep_merge;
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// });
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(
///     result,
///     json!({ "server": { "port": 9000, "host": "localhost" }, "features": ["c"] })
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                merge_key(&mut base_map, key, overlay_value);
            }
            Value::Object(base_map)
        }
        (Value::Object(mut base_map), Value::Array(overlay_items)) => {
            for (index, overlay_value) in overlay_items.into_iter().enumerate() {
                merge_key(&mut base_map, index.to_string(), overlay_value);
            }
            Value::Object(base_map)
        }
        (Value::Array(mut base_items), Value::Array(overlay_items)) => {
            for (index, overlay_value) in overlay_items.into_iter().enumerate() {
                match base_items.get_mut(index) {
                    Some(slot) => {
                        let base_value = std::mem::take(slot);
                        *slot = merge_entry(base_value, overlay_value);
                    }
                    None => base_items.push(overlay_value),
                }
            }
            Value::Array(base_items)
        }
        (Value::Array(base_items), overlay @ Value::Object(_)) => {
            deep_merge(Value::Object(indexed_map(base_items)), overlay)
        }
        // Nothing to iterate: the base survives
        (base @ (Value::Object(_) | Value::Array(_)), _) => base,
        // Scalar base behaves like an empty mapping
        (_, overlay) => overlay,
    }
}

/// Whether a container behaves like a plain ordered list rather than a record.
///
/// Every sequence qualifies. A mapping qualifies when all of its keys are
/// non-negative integers, so an empty mapping qualifies too. Scalars never do.
pub fn consists_of_numeric_keys(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(map) => map.keys().all(|key| is_index_key(key)),
        _ => false,
    }
}

/// Whether a value can take part in a merge (a mapping or a sequence).
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn merge_key(base_map: &mut Map<String, Value>, key: String, overlay_value: Value) {
    // get_mut + take keeps the key at its original position
    match base_map.get_mut(&key) {
        Some(slot) => {
            let base_value = std::mem::take(slot);
            *slot = merge_entry(base_value, overlay_value);
        }
        None => {
            base_map.insert(key, overlay_value);
        }
    }
}

fn merge_entry(base_value: Value, overlay_value: Value) -> Value {
    if is_container(&overlay_value)
        && is_container(&base_value)
        && !consists_of_numeric_keys(&base_value)
    {
        deep_merge(base_value, overlay_value)
    } else {
        overlay_value
    }
}

fn indexed_map(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, value)| (index.to_string(), value))
        .collect()
}

/// Position addressed by a sequence key, when the key is a canonical index.
pub(super) fn sequence_index(key: &str) -> Option<usize> {
    if is_index_key(key) { key.parse().ok() } else { None }
}

/// Canonical non-negative decimal integer: "0", "42", but not "01", "-1" or "1.0".
fn is_index_key(key: &str) -> bool {
    match key.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_simple_objects() {
        let base = json!({"a": 1, "b": 2});
        let overlay = json!({"b": 3, "c": 4});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_merge_empty_overlay_is_identity() {
        let base = json!({"a": {"b": [1, 2]}, "c": "x", "d": null});
        let result = deep_merge(base.clone(), json!({}));
        assert_eq!(result, base);
    }

    #[test]
    fn test_scalar_right_biased() {
        assert_eq!(deep_merge(json!({"x": 1}), json!({"x": 2})), json!({"x": 2}));
    }

    #[test]
    fn test_null_overlay_replaces() {
        let result = deep_merge(json!({"a": 1, "b": {"c": 2}}), json!({"a": null}));
        assert_eq!(result, json!({"a": null, "b": {"c": 2}}));
    }

    #[test]
    fn test_merge_nested_objects() {
        let base = json!({"a": {"b": 1, "c": 2}});
        let overlay = json!({"a": {"c": 3, "d": 4}});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"a": {"b": 1, "c": 3, "d": 4}}));
    }

    #[test]
    fn test_arrays_replaced_not_merged() {
        let base = json!({"x": [1, 2, 3]});
        let overlay = json!({"x": [9]});
        assert_eq!(deep_merge(base, overlay), json!({"x": [9]}));
    }

    #[test]
    fn test_array_of_objects_replaced_wholesale() {
        let base = json!({"servers": [{"host": "a", "port": 1}, {"host": "b", "port": 2}]});
        let overlay = json!({"servers": [{"port": 3}]});
        assert_eq!(deep_merge(base, overlay), json!({"servers": [{"port": 3}]}));
    }

    #[test]
    fn test_numeric_keyed_mapping_replaced() {
        // Classification follows the base: an integer-keyed mapping is a list
        let base = json!({"slots": {"0": "a", "1": "b", "2": "c"}});
        let overlay = json!({"slots": {"1": "z"}});
        assert_eq!(deep_merge(base, overlay), json!({"slots": {"1": "z"}}));
    }

    #[test]
    fn test_record_base_with_list_overlay_merges_by_index() {
        let base = json!({"a": {"name": "n", "0": "old"}});
        let overlay = json!({"a": ["new"]});
        assert_eq!(deep_merge(base, overlay), json!({"a": {"name": "n", "0": "new"}}));
    }

    #[test]
    fn test_sequence_base_with_mapping_overlay() {
        let base = json!(["a", "b"]);
        let overlay = json!({"x": 1, "0": "z"});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"0": "z", "1": "b", "x": 1}));
        let keys: Vec<&str> = result.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["0", "1", "x"]);
    }

    #[test]
    fn test_sequence_index() {
        assert_eq!(sequence_index("0"), Some(0));
        assert_eq!(sequence_index("12"), Some(12));
        assert_eq!(sequence_index("01"), None);
        assert_eq!(sequence_index("ios"), None);
    }

    #[test]
    fn test_overlay_replaces_primitive_with_object() {
        let base = json!({"value": 42});
        let overlay = json!({"value": {"nested": true}});
        assert_eq!(deep_merge(base, overlay), json!({"value": {"nested": true}}));
    }

    #[test]
    fn test_overlay_replaces_object_with_primitive() {
        let base = json!({"value": {"nested": true}});
        let overlay = json!({"value": 42});
        assert_eq!(deep_merge(base, overlay), json!({"value": 42}));
    }

    #[test]
    fn test_empty_base_mapping_replaced() {
        let base = json!({"a": {}});
        let overlay = json!({"a": {"b": 1}});
        assert_eq!(deep_merge(base, overlay), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_top_level_sequences_merge_by_index() {
        let result = deep_merge(json!([1, {"a": 1, "b": 2}, 3]), json!([9, {"b": 5}]));
        assert_eq!(result, json!([9, {"a": 1, "b": 5}, 3]));

        let longer = deep_merge(json!([1]), json!([7, 8]));
        assert_eq!(longer, json!([7, 8]));
    }

    #[test]
    fn test_scalar_overlay_at_top_level_keeps_base() {
        let base = json!({"a": 1});
        assert_eq!(deep_merge(base.clone(), json!("ignored")), base);
    }

    #[test]
    fn test_key_order_preserved() {
        let base = json!({"first": 1, "second": {"x": 1}, "third": 3});
        let overlay = json!({"second": {"y": 2}, "fourth": 4});
        let result = deep_merge(base, overlay);
        let keys: Vec<&str> = result.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_consists_of_numeric_keys() {
        assert!(consists_of_numeric_keys(&json!([])));
        assert!(consists_of_numeric_keys(&json!([1, 2])));
        assert!(consists_of_numeric_keys(&json!({})));
        assert!(consists_of_numeric_keys(&json!({"0": 1, "5": 2})));
        assert!(!consists_of_numeric_keys(&json!({"0": 1, "name": 2})));
        assert!(!consists_of_numeric_keys(&json!({"-1": 1})));
        assert!(!consists_of_numeric_keys(&json!({"01": 1})));
        assert!(!consists_of_numeric_keys(&json!("0")));
    }
}
