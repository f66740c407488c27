//! Logical config names resolved to cached accessors.

use super::dig::dig;
use super::files::find_config;
use super::format::FormatPreference;
use super::loader::ConfigLoader;
use super::types::{Config, ResolverSettings};
use crate::error::ConfigResult;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolves logical config names against the search directories.
///
/// Every outcome except an error is cached under the name (and root path), so
/// repeated lookups do not touch the filesystem. `None` means the config is
/// absent or does not resolve to a mapping.
#[derive(Debug)]
pub struct ConfigRepository {
    settings: ResolverSettings,
    loader: ConfigLoader,
    resolved: HashMap<String, Option<Arc<Config>>>,
}

impl ConfigRepository {
    pub fn new(settings: ResolverSettings) -> Self {
        let loader = ConfigLoader::new(&settings);
        Self {
            settings,
            loader,
            resolved: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// The file loader and its per-path memo.
    pub fn loader_mut(&mut self) -> &mut ConfigLoader {
        &mut self.loader
    }

    /// Find the file backing a logical config name.
    pub fn locate(&self, config_name: &str) -> Option<PathBuf> {
        find_config(config_name, &self.settings.config_dirs, self.settings.format)
    }

    /// Resolve a logical config name, optionally descending into `root_path`
    /// (dotted) before wrapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the located file cannot be read or parsed. Errors are
    /// never cached.
    pub fn load(
        &mut self,
        config_name: &str,
        root_path: Option<&str>,
    ) -> ConfigResult<Option<Arc<Config>>> {
        let config_key = config_key(config_name, root_path);
        if let Some(cached) = self.resolved.get(&config_key) {
            debug!(key = %config_key, found = cached.is_some(), "Resolved config cache hit");
            return Ok(cached.clone());
        }

        let instance = match self.locate(config_name) {
            Some(config_path) => {
                let tree = self.loader.load(&config_path, FormatPreference::Auto)?;
                wrap(tree.as_deref(), root_path).map(|map| {
                    Arc::new(Config::new(map).with_config_path(config_path))
                })
            }
            None => None,
        };

        debug!(key = %config_key, found = instance.is_some(), "Caching resolved config");
        self.resolved.insert(config_key, instance.clone());
        Ok(instance)
    }

    /// Drop every cached logical-name result; the loader's file memo is kept.
    pub fn clear_cache(&mut self) {
        self.resolved.clear();
    }
}

fn config_key(config_name: &str, root_path: Option<&str>) -> String {
    match root_path {
        Some(root_path) => format!("{}|{}", config_name, root_path),
        None => config_name.to_string(),
    }
}

fn wrap(tree: Option<&Value>, root_path: Option<&str>) -> Option<serde_json::Map<String, Value>> {
    let tree = match root_path {
        Some(root_path) => dig(root_path, tree?)?,
        None => tree?,
    };
    match tree {
        Value::Object(map) => Some(map.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn repository(temp: &TempDir) -> ConfigRepository {
        ConfigRepository::new(ResolverSettings::new().with_dir(temp.path()))
    }

    #[test]
    fn test_config_key() {
        assert_eq!(config_key("db", None), "db");
        assert_eq!(config_key("db", Some("primary.pool")), "db|primary.pool");
    }

    #[test]
    fn test_load_returns_cached_instance() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.json"), r#"{"all": {"v": 1}}"#).unwrap();

        let mut repo = repository(&temp);
        let first = repo.load("app", None).unwrap().unwrap();
        std::fs::remove_file(temp.path().join("app.json")).unwrap();
        let second = repo.load("app", None).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.config_path(), Some(temp.path().join("app.json").as_path()));
    }

    #[test]
    fn test_not_found_is_cached() {
        let temp = TempDir::new().unwrap();
        let mut repo = repository(&temp);
        assert!(repo.load("app", None).unwrap().is_none());

        // A file appearing later is not seen until the cache is cleared
        std::fs::write(temp.path().join("app.json"), r#"{"all": {"v": 1}}"#).unwrap();
        assert!(repo.load("app", None).unwrap().is_none());

        repo.clear_cache();
        assert!(repo.load("app", None).unwrap().is_some());
    }

    #[test]
    fn test_root_path_descends() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("db.yaml"),
            "all:\n  primary:\n    host: db1\n    pool: {size: 5}\n  port: 5432\n",
        )
        .unwrap();

        let mut repo = repository(&temp);
        let primary = repo.load("db", Some("primary")).unwrap().unwrap();
        assert_eq!(primary.as_value(), &json!({"host": "db1", "pool": {"size": 5}}));

        let pool = repo.load("db", Some("primary.pool")).unwrap().unwrap();
        assert_eq!(pool.dig("size"), Some(&json!(5)));

        // Scalar and missing roots are not mappings
        assert!(repo.load("db", Some("port")).unwrap().is_none());
        assert!(repo.load("db", Some("replica")).unwrap().is_none());
    }

    #[test]
    fn test_same_file_parsed_once_for_different_roots() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("db.json"), r#"{"all": {"a": {"x": 1}, "b": {"y": 2}}}"#)
            .unwrap();

        let mut repo = repository(&temp);
        repo.load("db", Some("a")).unwrap().unwrap();
        repo.load("db", Some("b")).unwrap().unwrap();
        repo.load("db.json", None).unwrap().unwrap();
        assert_eq!(repo.loader_mut().cached_len(), 1);
    }

    #[test]
    fn test_non_mapping_results_are_not_found() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("list.json"), r#"{"all": [1, 2, 3]}"#).unwrap();
        std::fs::write(temp.path().join("empty.yaml"), "").unwrap();

        let mut repo = repository(&temp);
        assert!(repo.load("list", None).unwrap().is_none());
        assert!(repo.load("empty", None).unwrap().is_none());
    }

    #[test]
    fn test_parse_error_propagates_and_is_not_cached() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut repo = repository(&temp);
        assert!(repo.load("app", None).is_err());

        std::fs::write(&path, r#"{"all": {"fixed": true}}"#).unwrap();
        let config = repo.load("app", None).unwrap().unwrap();
        assert_eq!(config.dig("fixed"), Some(&json!(true)));
    }
}
