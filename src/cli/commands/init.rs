//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ade-bridge.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ADE Bridge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Add one [locations.\"<scheme>\".<id>] table per farm store");
                println!("  2. Adapt the [queries.<db_type>.operations] templates to your schema");
                println!("  3. Create a .env file with the store passwords:");
                println!("     - Set ADE_FARM_1_DB_PASSWORD (referenced as ${{ADE_FARM_1_DB_PASSWORD}})");
                println!("  4. Validate configuration: ade-bridge validate-config");
                println!("  5. Preview a query: ade-bridge query --scheme be.herd --id farm-1 --operation get-animals");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# ADE Bridge Configuration File
# Farm-management database rows to ICAR ADE resources

[application]
log_level = "info"

[api]
default_page_size = 50
max_page_size = 1000

[locations."be.herd".farm-1]
db_type = "exampleDB"
db_url = "db.farm.local"
db_name = "herd"
db_user = "ade_reader"
db_password = "${ADE_FARM_1_DB_PASSWORD}"

[queries.exampleDB]
db_client = "postgres"

[queries.exampleDB.operations]
get-milking-visits = """
SELECT v.*, COUNT(*) OVER() AS totalitems FROM ade_milking_visits v
WHERE v.modified BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime'
WHERE v.modified > ':metaModifiedFromDateTime'
WHERE v.modified < ':metaModifiedToDateTime'
ORDER BY v.modified OFFSET ':offset' LIMIT ':pageSize'
"""
get-animals = """
SELECT a.*, COUNT(*) OVER() AS totalitems FROM ade_animals a
WHERE a.modified BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime'
WHERE a.modified > ':metaModifiedFromDateTime'
WHERE a.modified < ':metaModifiedToDateTime'
ORDER BY a.modified OFFSET ':offset' LIMIT ':pageSize'
"""

[logging]
local_enabled = false
local_path = "/var/log/ade-bridge"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# ADE Bridge Configuration File
# Farm-management database rows to ICAR ADE resources
#
# Values of the form ${VAR} are substituted from the environment (a .env file
# in the working directory is loaded first). Every setting can also be
# overridden with an ADE_* environment variable, e.g. ADE_APPLICATION_LOG_LEVEL
# or ADE_LOCATION_BE_HERD_FARM_1_DB_URL.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Exchange API
# ============================================================================
[api]
# Page size when a request carries no pageSize parameter
default_page_size = 50

# Requests asking for more items per page are rejected
max_page_size = 1000

# ============================================================================
# Unit overrides
# ============================================================================
# Default unit per milk characteristic code, used when a row carries a value
# but no unit. Unlisted codes keep their built-in default.
[units]
# UREA = "mmol/l"
# SCC = "10^3 cells/ml"

# ============================================================================
# Locations
# ============================================================================
# One table per location, keyed by scheme and id. Quote schemes containing
# dots. db_type selects the [queries.<db_type>] templates below.
[locations."be.herd".farm-1]
db_type = "exampleDB"
db_url = "db.farm.local"
db_name = "herd"
db_user = "ade_reader"
db_password = "${ADE_FARM_1_DB_PASSWORD}"
# meta.source for rows that do not carry one (defaults to db_url)
source = "farm-1.herd.local"

# [locations."nl.ubn".1234567]
# db_type = "robotDB"
# db_url = "10.0.0.12"
# db_name = "VMSDB"

# ============================================================================
# Query templates
# ============================================================================
# Each template has one ORDER clause and either no WHERE clause before it or
# exactly three: a BETWEEN clause with both range tokens, a '>' clause with
# the from token and a '<' clause with the to token. Only the clause matching
# the requested range is kept. Rows must expose the flat column names of the
# ADE resource (meta.modified, animal.id, quartermilkings.LF.quartermilkingweight.value, ...)
# and the first row a totalitems column.
[queries.exampleDB]
# postgres | mssql
db_client = "postgres"

[queries.exampleDB.operations]
get-milking-visits = """
SELECT v.*, COUNT(*) OVER() AS totalitems FROM ade_milking_visits v
WHERE v.modified BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime'
WHERE v.modified > ':metaModifiedFromDateTime'
WHERE v.modified < ':metaModifiedToDateTime'
ORDER BY v.modified OFFSET ':offset' LIMIT ':pageSize'
"""
get-animals = """
SELECT a.*, COUNT(*) OVER() AS totalitems FROM ade_animals a
WHERE a.modified BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime'
WHERE a.modified > ':metaModifiedFromDateTime'
WHERE a.modified < ':metaModifiedToDateTime'
ORDER BY a.modified OFFSET ':offset' LIMIT ':pageSize'
"""

# [queries.robotDB]
# db_client = "mssql"
#
# [queries.robotDB.operations]
# get-animals = "SELECT a.*, COUNT(*) OVER() AS totalitems FROM ade_animals a ORDER BY a.id OFFSET ':offset' ROWS FETCH NEXT ':pageSize' ROWS ONLY"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files next to console output
local_enabled = false
local_path = "/var/log/ade-bridge"

# daily | hourly; files rotate by time only
local_rotation = "daily"
"#
        .to_string()
    }
}
