//! Configuration management for ADE Bridge.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `ADE_*` environment
//! overrides, serde defaults, and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ade_bridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ade-bridge.toml")?;
//!
//! for (scheme, ids) in &config.locations {
//!     for (id, store) in ids {
//!         println!("{scheme}/{id} -> {} ({})", store.db_name, store.db_type);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`ApiConfig`] - default and maximum page size
//! - `units` - per-characteristic default unit overrides
//! - [`LocationConfig`] - one farm store per `[locations.<scheme>.<id>]`
//! - [`QuerySetConfig`] - SQL templates per store type
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! Location schemes contain dots, so quote them in table headers.
//!
//! ```toml
//! [api]
//! default_page_size = 50
//!
//! [locations."be.herd".farm-1]
//! db_type = "exampleDB"
//! db_url = "db.farm.local"
//! db_name = "herd"
//! db_user = "reader"
//! db_password = "${HERD_DB_PASSWORD}"
//!
//! [queries.exampleDB]
//! db_client = "postgres"
//!
//! [queries.exampleDB.operations]
//! get-animals = "SELECT * FROM animals ORDER BY id OFFSET ':offset' LIMIT ':pageSize'"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    AdeConfig, ApiConfig, ApplicationConfig, DbClient, LocationConfig, LoggingConfig,
    QuerySetConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
