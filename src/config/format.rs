//! Configuration file formats and parsing into the generic tree.

use crate::error::{ConfigError, ParseError};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A supported configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

/// Known formats, in the order candidate file names are tried.
pub const KNOWN_FORMATS: [ConfigFormat; 2] = [ConfigFormat::Yaml, ConfigFormat::Json];

impl ConfigFormat {
    /// File extension used when synthesising candidate file names.
    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
        }
    }

    /// Format named by a known extension (as used when locating files).
    pub fn from_known_extension(ext: &str) -> Option<Self> {
        KNOWN_FORMATS
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    /// Format detected from a file path when loading; also accepts `yml`.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("yml") {
            return Some(ConfigFormat::Yaml);
        }
        Self::from_known_extension(ext)
    }

    /// Parse file contents into a tree.
    ///
    /// An empty YAML document is `Null`; an empty or `null` JSON document is an error.
    pub fn parse(self, text: &str) -> Result<Value, ParseError> {
        match self {
            ConfigFormat::Json => match serde_json::from_str::<Value>(text)? {
                Value::Null => Err(ParseError::NullDocument),
                tree => Ok(tree),
            },
            ConfigFormat::Yaml => {
                if text.trim().is_empty() {
                    return Ok(Value::Null);
                }
                let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
                Ok(yaml_to_tree(yaml))
            }
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Which format to use for a logical config name or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPreference {
    /// Try every known format (locating) or detect from the extension (loading)
    #[default]
    Auto,
    Explicit(ConfigFormat),
}

impl FromStr for FormatPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" | "" => Ok(FormatPreference::Auto),
            "yaml" | "yml" => Ok(FormatPreference::Explicit(ConfigFormat::Yaml)),
            "json" => Ok(FormatPreference::Explicit(ConfigFormat::Json)),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for FormatPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatPreference::Auto => write!(f, "auto"),
            FormatPreference::Explicit(format) => write!(f, "{}", format),
        }
    }
}

/// Convert a YAML value, stringifying non-string mapping keys.
fn yaml_to_tree(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_tree).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_tree(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_tree(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        complex => yaml_to_tree(complex).to_string(),
    }
}
