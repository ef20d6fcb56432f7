use std::{env, time::Duration};

use itemsync_core::schema::{KeySchema, DEFAULT_STACK_NAME};
use itemsync_core::storage::CollisionPolicy;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// A configuration variable that is set but cannot be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid value for {name}: {value:?} ({reason})")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Stack name the table and index names are derived from (default: "ItemsyncStack")
    pub stack_name: String,
    /// Overrides the derived table name
    pub table_name: Option<String>,
    /// Overrides the derived secondary index name
    pub index_name: Option<String>,
    /// What `addItem` does when the id is already stored (default: reject)
    pub collision_policy: CollisionPolicy,
    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STACK_NAME` - Stack name (default: "ItemsyncStack")
    /// - `ITEMSYNC_TABLE_NAME` - Table name (default: derived from the stack name)
    /// - `ITEMSYNC_INDEX_NAME` - Secondary index name (default: derived from the stack name)
    /// - `ID_COLLISION_POLICY` - `reject` or `overwrite` (default: `reject`)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let collision_policy = match lookup("ID_COLLISION_POLICY") {
            Some(value) => value.parse().map_err(|reason| ConfigError {
                name: "ID_COLLISION_POLICY",
                value,
                reason,
            })?,
            None => CollisionPolicy::default(),
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError {
                        name: "REQUEST_TIMEOUT_SECS",
                        value,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError {
                        name: "REQUEST_TIMEOUT_SECS",
                        value,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            stack_name: lookup("STACK_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_STACK_NAME.to_string()),
            table_name: lookup("ITEMSYNC_TABLE_NAME").filter(|name| !name.is_empty()),
            index_name: lookup("ITEMSYNC_INDEX_NAME").filter(|name| !name.is_empty()),
            collision_policy,
            request_timeout_secs,
        })
    }

    /// Physical table and index names, with overrides applied.
    pub fn key_schema(&self) -> KeySchema {
        let mut schema = KeySchema::from_stack_name(&self.stack_name);
        if let Some(table_name) = &self.table_name {
            schema = schema.with_table_name(table_name);
        }
        if let Some(index_name) = &self.index_name {
            schema = schema.with_index_name(index_name);
        }
        schema
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            table_name: None,
            index_name: None,
            collision_policy: CollisionPolicy::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = load(&[]).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.collision_policy, CollisionPolicy::Reject);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.key_schema().table_name, "itemsync-table");
        assert_eq!(config.key_schema().index_name, "itemsync-gsi");
    }

    #[test]
    fn test_names_follow_stack_name() {
        let config = load(&[("STACK_NAME", "LibraryStack")]).unwrap();

        let schema = config.key_schema();
        assert_eq!(schema.table_name, "library-table");
        assert_eq!(schema.index_name, "library-gsi");
    }

    #[test]
    fn test_name_overrides() {
        let config = load(&[
            ("ITEMSYNC_TABLE_NAME", "books"),
            ("ITEMSYNC_INDEX_NAME", "books-by-title"),
        ])
        .unwrap();

        let schema = config.key_schema();
        assert_eq!(schema.table_name, "books");
        assert_eq!(schema.index_name, "books-by-title");
    }

    #[test]
    fn test_collision_policy() {
        let config = load(&[("ID_COLLISION_POLICY", "overwrite")]).unwrap();
        assert_eq!(config.collision_policy, CollisionPolicy::Overwrite);

        let error = load(&[("ID_COLLISION_POLICY", "merge")]).unwrap_err();
        assert_eq!(error.name, "ID_COLLISION_POLICY");
        assert_eq!(error.value, "merge");
    }

    #[test]
    fn test_request_timeout() {
        let config = load(&[("REQUEST_TIMEOUT_SECS", "30")]).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));

        assert!(load(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }
}
