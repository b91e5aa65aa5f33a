//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Beyond loading and
//! validating the file it builds the catalog, so malformed templates and
//! unknown codes are reported here rather than on the first request.

use crate::config::load_config;
use crate::core::catalog::Catalog;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let catalog = match Catalog::from_config(&config) {
            Ok(c) => {
                println!("✅ Query templates and unit codes are valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Page Size: {} (max {})",
            config.api.default_page_size, config.api.max_page_size
        );
        if !config.units.is_empty() {
            println!("  Unit Overrides: {}", config.units.len());
        }

        println!("  Locations:");
        for store in catalog.stores() {
            let operations = catalog
                .query_set(&store.db_type)
                .map(|set| {
                    set.operations()
                        .iter()
                        .map(|op| op.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            // Credentials stay out of the summary
            println!(
                "    {} -> {} ({}) {}/{} [{}]",
                store.location, store.db_type, store.db_client, store.db_url, store.db_name, operations
            );
        }

        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"
[locations."be.herd".farm-1]
db_type = "exampleDB"
db_url = "db.farm.local"
db_name = "herd"
db_password = "hunter2"

[queries.exampleDB]
db_client = "mssql"

[queries.exampleDB.operations]
get-animals = "SELECT * FROM animals ORDER BY id OFFSET ':offset' LIMIT ':pageSize'"
"#;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_validate_valid_config() {
        let file = write(VALID);
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_malformed_template() {
        let file = write(&VALID.replace(" ORDER BY id", ""));
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/ade-bridge.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
