//! Secondary, data-driven overrides.
//!
//! An override rule names a target section and a key to search for inside it.
//! When the key is present its value is promoted over the whole tree; the target
//! section is then dropped whether or not the key was found.

use super::merge::{deep_merge, is_container, sequence_index};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// A registered (target key, search key) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    /// Top-level section holding the candidate overrides (e.g. `device`)
    pub target_key: String,
    /// Key inside the target section to promote (e.g. `ios`)
    pub search_key: String,
}

impl OverrideRule {
    pub fn new(target_key: impl Into<String>, search_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            search_key: search_key.into(),
        }
    }
}

impl fmt::Display for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.target_key, self.search_key)
    }
}

impl FromStr for OverrideRule {
    type Err = String;

    /// Parse `target=search`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((target, search)) if !target.trim().is_empty() && !search.trim().is_empty() => {
                Ok(Self::new(target.trim(), search.trim()))
            }
            _ => Err(format!("expected TARGET=SEARCH, got '{}'", s)),
        }
    }
}

/// Ordered set of override rules, applied in registration order.
///
/// Registering a target key that already has a rule replaces its search key
/// without moving the rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRules {
    rules: Vec<OverrideRule>,
}

impl OverrideRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule.
    pub fn add(&mut self, rule: OverrideRule) {
        match self
            .rules
            .iter_mut()
            .find(|existing| existing.target_key == rule.target_key)
        {
            Some(existing) => existing.search_key = rule.search_key,
            None => self.rules.push(rule),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverrideRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<OverrideRule> for OverrideRules {
    fn from_iter<I: IntoIterator<Item = OverrideRule>>(iter: I) -> Self {
        let mut rules = Self::new();
        for rule in iter {
            rules.add(rule);
        }
        rules
    }
}

/// Apply every rule in order against the progressively updated tree.
///
/// Only mapping trees carry target sections; anything else is returned unchanged.
pub fn apply_overrides(mut tree: Value, rules: &OverrideRules) -> Value {
    for rule in rules.iter() {
        let Some(section) = tree.get(&rule.target_key) else {
            continue;
        };

        let promoted = match section {
            Value::Object(candidates) => candidates.get(&rule.search_key).cloned(),
            Value::Array(candidates) => sequence_index(&rule.search_key)
                .and_then(|index| candidates.get(index))
                .cloned(),
            _ => None,
        };

        match promoted {
            Some(overlay) if is_container(&overlay) => {
                debug!(rule = %rule, "Promoting override section");
                tree = deep_merge(tree, overlay);
            }
            Some(_) => {
                warn!(rule = %rule, "Override value is not a mapping, ignoring it");
            }
            None => {
                debug!(rule = %rule, "Override key not present in target section");
            }
        }

        if let Value::Object(map) = &mut tree {
            map.shift_remove(&rule.target_key);
        }
    }
    tree
}
