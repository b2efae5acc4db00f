use std::path::PathBuf;

use tracing::warn;

pub const ENV_DATA_DIR: &str = "FLATDB_DATA_DIR";
pub const ENV_METADATA_FILE: &str = "FLATDB_METADATA_FILE";
pub const ENV_CACHE_CAPACITY: &str = "FLATDB_CACHE_CAPACITY";
pub const ENV_CONFIRM: &str = "FLATDB_CONFIRM";

/// Runtime configuration of a database instance.
///
/// - `data_dir` holds one `<table>.json` file per table.
/// - `metadata_file` holds the schema store.
/// - `cache_capacity` bounds the select cache; `0` disables it.
/// - `confirm_destructive` asks before `drop_table` and `delete`.
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    /// Directory for table data files
    pub data_dir: PathBuf,
    /// Path of the schema file
    pub metadata_file: PathBuf,
    /// Maximum number of cached select results
    pub cache_capacity: usize,
    /// Whether destructive commands need a `y` confirmation
    pub confirm_destructive: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            metadata_file: PathBuf::from("db_meta.json"),
            cache_capacity: 64,
            confirm_destructive: true,
        }
    }
}

impl DbConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep both the schema file and the table files under `root`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            metadata_file: root.join("db_meta.json"),
            ..Self::default()
        }
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self { self.cache_capacity = capacity; self }
    pub fn with_confirmation(mut self, confirm: bool) -> Self { self.confirm_destructive = confirm; self }

    /// Defaults overlaid with `FLATDB_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`DbConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_METADATA_FILE) {
            config.metadata_file = PathBuf::from(file);
        }
        if let Some(capacity) = lookup(ENV_CACHE_CAPACITY) {
            match capacity.trim().parse::<usize>() {
                Ok(capacity) => config.cache_capacity = capacity,
                Err(_) => warn!(value = %capacity, "ignoring invalid {ENV_CACHE_CAPACITY}"),
            }
        }
        if let Some(confirm) = lookup(ENV_CONFIRM) {
            match confirm.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.confirm_destructive = true,
                "0" | "false" | "no" => config.confirm_destructive = false,
                _ => warn!(value = %confirm, "ignoring invalid {ENV_CONFIRM}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DbConfig::new();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.metadata_file, PathBuf::from("db_meta.json"));
        assert_eq!(config.cache_capacity, 64);
        assert!(config.confirm_destructive);
    }

    #[test]
    fn test_env_overlay() {
        let config = DbConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/tables"),
            (ENV_CACHE_CAPACITY, "8"),
            (ENV_CONFIRM, "no"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tables"));
        assert_eq!(config.metadata_file, PathBuf::from("db_meta.json"));
        assert_eq!(config.cache_capacity, 8);
        assert!(!config.confirm_destructive);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = DbConfig::from_lookup(lookup_from(&[(ENV_CACHE_CAPACITY, "lots"), (ENV_CONFIRM, "perhaps")]));
        assert_eq!(config, DbConfig::default());
    }

    #[test]
    fn test_rooted_at() {
        let config = DbConfig::rooted_at("/srv/db").with_cache_capacity(0);
        assert_eq!(config.data_dir, PathBuf::from("/srv/db/data"));
        assert_eq!(config.metadata_file, PathBuf::from("/srv/db/db_meta.json"));
        assert_eq!(config.cache_capacity, 0);
    }
}
