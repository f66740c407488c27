//! Resolver settings and the resolved configuration accessor.

use super::dig::{dig, dig_or};
use super::environment::COMMON_ENVIRONMENT;
use super::format::{ConfigFormat, FormatPreference};
use super::overrides::{OverrideRule, OverrideRules};
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Environment variable holding the search directories (platform path-list syntax).
pub const ENV_CONFIG_DIRS: &str = "ENVCONF_DIRS";
/// Environment variable holding the active environment name.
pub const ENV_ENVIRONMENT: &str = "ENVCONF_ENV";
/// Environment variable holding the preferred format (`auto`, `yaml`, `json`).
pub const ENV_FORMAT: &str = "ENVCONF_FORMAT";
/// Environment variable holding override rules (`target=search,target2=search2`).
pub const ENV_OVERRIDES: &str = "ENVCONF_OVERRIDES";

/// Settings shared by every resolution.
///
/// Set up once before the first resolution; the repository owns them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Search directories, tried in order
    pub config_dirs: Vec<PathBuf>,
    /// Preferred format for synthesised file names
    pub format: FormatPreference,
    /// Format used when a loaded file has no recognised extension
    pub fallback_format: ConfigFormat,
    /// Active environment name
    pub environment: String,
    /// Override rules, applied in registration order
    pub overrides: OverrideRules,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            config_dirs: Vec::new(),
            format: FormatPreference::Auto,
            fallback_format: ConfigFormat::Json,
            environment: COMMON_ENVIRONMENT.to_string(),
            overrides: OverrideRules::new(),
        }
    }
}

impl ResolverSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from `ENVCONF_*` environment variables.
    ///
    /// Without `ENVCONF_DIRS` the search path is `./config` followed by the
    /// user config directory (e.g. `~/.config/envconf`).
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut settings = Self::default();

        settings.config_dirs = match lookup(ENV_CONFIG_DIRS) {
            Some(dirs) => std::env::split_paths(&dirs)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect(),
            None => default_config_dirs(),
        };

        if let Some(environment) = lookup(ENV_ENVIRONMENT).filter(|e| !e.trim().is_empty()) {
            settings.environment = environment.trim().to_string();
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            settings.format = format.parse()?;
        }

        if let Some(overrides) = lookup(ENV_OVERRIDES) {
            for entry in overrides.split(',').filter(|e| !e.trim().is_empty()) {
                let rule = entry
                    .parse::<OverrideRule>()
                    .map_err(ConfigError::InvalidOverride)?;
                settings.overrides.add(rule);
            }
        }

        Ok(settings)
    }

    /// Append a search directory.
    pub fn add_config_dir(&mut self, dir: impl Into<PathBuf>) {
        self.config_dirs.push(dir.into());
    }

    pub fn set_format(&mut self, format: FormatPreference) {
        self.format = format;
    }

    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = environment.into();
    }

    /// Register an override rule (see [`OverrideRules::add`]).
    pub fn add_override_key(&mut self, target_key: impl Into<String>, search_key: impl Into<String>) {
        self.overrides.add(OverrideRule::new(target_key, search_key));
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.add_config_dir(dir);
        self
    }

    pub fn with_format(mut self, format: FormatPreference) -> Self {
        self.format = format;
        self
    }

    pub fn with_fallback_format(mut self, format: ConfigFormat) -> Self {
        self.fallback_format = format;
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.set_environment(environment);
        self
    }

    pub fn with_override(
        mut self,
        target_key: impl Into<String>,
        search_key: impl Into<String>,
    ) -> Self {
        self.add_override_key(target_key, search_key);
        self
    }
}

fn default_config_dirs() -> Vec<PathBuf> {
    let mut search_dirs = vec![PathBuf::from("config")];
    if let Some(user_dir) = dirs::config_dir() {
        search_dirs.push(user_dir.join("envconf"));
    }
    search_dirs
}

/// Read-only view over a resolved configuration mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    tree: Value,
    config_path: Option<PathBuf>,
}

impl Config {
    pub fn new(tree: Map<String, Value>) -> Self {
        Self {
            tree: Value::Object(tree),
            config_path: None,
        }
    }

    /// Record the file this configuration came from (used in error messages).
    pub fn with_config_path(mut self, config_path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(config_path.into());
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The whole resolved tree (always a mapping).
    pub fn as_value(&self) -> &Value {
        &self.tree
    }

    /// Value at a dotted path such as `path.to.setting`.
    pub fn dig(&self, path: &str) -> Option<&Value> {
        dig(path, &self.tree)
    }

    /// Value at a dotted path, or `default` when the path does not resolve.
    pub fn dig_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        dig_or(path, &self.tree, default)
    }

    /// Value at a dotted path, failing when the path does not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPath`] naming the path and the origin file.
    pub fn dig_or_fail(&self, path: &str) -> ConfigResult<&Value> {
        self.dig(path).ok_or_else(|| ConfigError::MissingPath {
            path: path.to_string(),
            config: self.config_path.clone(),
        })
    }

    /// Deserialize the value at a dotted path, `None` when absent or of another shape.
    pub fn dig_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.dig(path)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
