//! Environment-scoped extraction of a parsed configuration file.
//!
//! A configuration file is keyed by environment name. The `all` section is the
//! common layer shared by every environment; the active environment's section
//! (if any) is merged on top of it.

use super::merge::{deep_merge, is_container};
use serde_json::{Map, Value};

/// Reserved environment name for the common layer.
pub const COMMON_ENVIRONMENT: &str = "all";

/// Extract the tree for `environment` from a raw parsed file.
///
/// - A non-container `all` value is returned as is.
/// - With the active environment equal to `all`, the common layer is returned untouched.
/// - A non-container environment section replaces the common layer entirely.
/// - Otherwise the environment section is deep merged over the common layer.
///
/// A root that is not a mapping (including an empty document) is not keyed by
/// environment and is returned unchanged.
pub fn extract_environment(raw: &Value, environment: &str) -> Value {
    let Value::Object(sections) = raw else {
        return raw.clone();
    };

    let base = match sections.get(COMMON_ENVIRONMENT) {
        Some(common) if !is_container(common) => return common.clone(),
        Some(common) => common.clone(),
        None => Value::Object(Map::new()),
    };

    if environment == COMMON_ENVIRONMENT {
        return base;
    }

    match sections.get(environment) {
        Some(layer) if !is_container(layer) => layer.clone(),
        Some(layer) => deep_merge(base, layer.clone()),
        None => base,
    }
}
