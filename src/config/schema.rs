//! Configuration schema types
//!
//! This module defines the configuration structure for ADE Bridge.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Database client family a store type is queried with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbClient {
    /// PostgreSQL
    Postgres,
    /// Microsoft SQL Server
    Mssql,
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbClient::Postgres => f.write_str("postgres"),
            DbClient::Mssql => f.write_str("mssql"),
        }
    }
}

/// Main ADE Bridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Exchange API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Per-characteristic unit overrides (`SCC = "x1000 cells/ml"`)
    #[serde(default)]
    pub units: HashMap<String, String>,

    /// Location directory: scheme -> location id -> store
    #[serde(default)]
    pub locations: HashMap<String, HashMap<String, LocationConfig>>,

    /// SQL templates keyed by store type
    #[serde(default)]
    pub queries: HashMap<String, QuerySetConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AdeConfig {
    /// Validates the configuration
    ///
    /// Template structure and unit codes are checked when the catalog is built;
    /// this covers the plain values and cross-references.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;

        for (scheme, ids) in &self.locations {
            for (id, location) in ids {
                location
                    .validate()
                    .map_err(|e| format!("locations.{scheme}.{id}: {e}"))?;
                if !self.queries.contains_key(&location.db_type) {
                    return Err(format!(
                        "locations.{scheme}.{id}: no [queries.{}] section for db_type '{}'",
                        location.db_type, location.db_type
                    ));
                }
            }
        }

        for (db_type, set) in &self.queries {
            if set.operations.is_empty() {
                return Err(format!("queries.{db_type}: at least one operation is required"));
            }
        }

        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Exchange API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Page size used when a request does not give one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_page_size == 0 {
            return Err("api.default_page_size must be > 0".to_string());
        }
        if self.max_page_size < self.default_page_size {
            return Err(format!(
                "api.max_page_size ({}) must be >= api.default_page_size ({})",
                self.max_page_size, self.default_page_size
            ));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Farm store behind one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Store type; selects the `[queries.<db_type>]` template set
    pub db_type: String,

    /// Host or URL of the store
    pub db_url: String,

    /// Database name
    pub db_name: String,

    /// Database user
    #[serde(default)]
    pub db_user: Option<String>,

    /// Database password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub db_password: Option<SecretString>,

    /// Value for `meta.source` when rows do not carry one (defaults to `db_url`)
    #[serde(default)]
    pub source: Option<String>,
}

impl LocationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.db_type.trim().is_empty() {
            return Err("db_type cannot be empty".to_string());
        }
        if self.db_url.trim().is_empty() {
            return Err("db_url cannot be empty".to_string());
        }
        if self.db_name.trim().is_empty() {
            return Err("db_name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// SQL templates for one store type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySetConfig {
    /// Client family used to run the templates
    pub db_client: DbClient,

    /// Operation id (`get-milking-visits`, `get-animals`) -> SQL template
    #[serde(default)]
    pub operations: HashMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_local_path() -> String {
    "/var/log/ade-bridge".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
