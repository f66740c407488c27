//! Config file loading with environment extraction and override promotion.
//!
//! Each file is read, parsed, scoped to the active environment and passed
//! through the override rules once; the result is memoized by absolute path.

use super::environment::extract_environment;
use super::format::{ConfigFormat, FormatPreference};
use super::merge::is_container;
use super::overrides::{OverrideRules, apply_overrides};
use super::types::ResolverSettings;
use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Loads config files and memoizes the resolved tree per absolute path.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Active environment name
    environment: String,
    /// Override rules applied after extraction
    overrides: OverrideRules,
    /// Format for files without a recognised extension
    fallback_format: ConfigFormat,
    /// Resolved trees keyed by absolute file path
    cache: HashMap<PathBuf, Arc<Value>>,
}

impl ConfigLoader {
    pub fn new(settings: &ResolverSettings) -> Self {
        Self {
            environment: settings.environment.clone(),
            overrides: settings.overrides.clone(),
            fallback_format: settings.fallback_format,
            cache: HashMap::new(),
        }
    }

    /// Load a config file.
    ///
    /// Returns `Ok(None)` when the file does not exist. Only container results
    /// (mappings and sequences) are memoized; a missing file is probed again on
    /// every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid for its format.
    pub fn load(
        &mut self,
        file_path: &Path,
        preference: FormatPreference,
    ) -> ConfigResult<Option<Arc<Value>>> {
        if !file_path.exists() {
            return Ok(None);
        }

        let cache_key = absolute_path(file_path);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(path = %cache_key.display(), "Config cache hit");
            return Ok(Some(Arc::clone(cached)));
        }

        let format = match preference {
            FormatPreference::Explicit(format) => format,
            FormatPreference::Auto => ConfigFormat::detect(file_path).unwrap_or(self.fallback_format),
        };

        let content = std::fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;
        let raw = format.parse(&content).map_err(|source| ConfigError::Parse {
            path: file_path.to_path_buf(),
            source,
        })?;
        info!(path = %file_path.display(), %format, "Parsed config file");

        let resolved = Arc::new(self.edit(&raw));
        if is_container(&resolved) {
            self.cache.insert(cache_key, Arc::clone(&resolved));
        }
        Ok(Some(resolved))
    }

    /// Drop every memoized file.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of memoized files.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn edit(&self, raw: &Value) -> Value {
        let scoped = extract_environment(raw, &self.environment);
        if is_container(&scoped) {
            apply_overrides(scoped, &self.overrides)
        } else {
            scoped
        }
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
