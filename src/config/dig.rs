//! Dotted-path lookup into a configuration tree.

use serde_json::Value;

/// Look up `path` (segments separated by `.`) in `tree`.
///
/// Each segment indexes the current mapping by key. Returns `None` as soon as a
/// segment is missing or the current value is not a mapping. A `null` stored at
/// the path is found, not missing.
pub fn dig<'a>(path: &str, tree: &'a Value) -> Option<&'a Value> {
    path.split('.').try_fold(tree, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        _ => None,
    })
}

/// Look up `path`, falling back to `default` when it does not resolve.
pub fn dig_or<'a>(path: &str, tree: &'a Value, default: &'a Value) -> &'a Value {
    dig(path, tree).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dig_nested() {
        let tree = json!({"a": {"b": {"c": 3}}});
        assert_eq!(dig("a.b.c", &tree), Some(&json!(3)));
        assert_eq!(dig("a.b", &tree), Some(&json!({"c": 3})));
    }

    #[test]
    fn test_dig_missing_leaf() {
        let tree = json!({"a": {"b": {}}});
        assert_eq!(dig("a.b.c", &tree), None);
        assert_eq!(dig_or("a.b.c", &tree, &json!(42)), &json!(42));
    }

    #[test]
    fn test_dig_through_non_mapping() {
        let tree = json!({"a": [{"b": 1}], "s": "text"});
        assert_eq!(dig("a.0.b", &tree), None);
        assert_eq!(dig("s.len", &tree), None);
    }

    #[test]
    fn test_dig_finds_null() {
        let tree = json!({"a": null});
        assert_eq!(dig("a", &tree), Some(&Value::Null));
        assert_eq!(dig_or("a", &tree, &json!(1)), &Value::Null);
    }

    #[test]
    fn test_dig_numeric_keyed_mapping() {
        let tree = json!({"levels": {"1": "easy", "2": "hard"}});
        assert_eq!(dig("levels.2", &tree), Some(&json!("hard")));
    }
}
