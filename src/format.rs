//! Output formatting for resolved configuration values.

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;

/// Output format for printed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render a whole tree in the given format.
pub fn format_tree(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
    }
}

/// Render a single looked-up value; strings are printed bare.
pub fn format_value(value: &Value, format: OutputFormat) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) | Value::Array(_) => format_tree(value, format),
        scalar => Ok(scalar.to_string()),
    }
}
