//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ADE Bridge using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ADE Bridge - farm-store rows to ICAR ADE resources
#[derive(Parser, Debug)]
#[command(name = "ade-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ade-bridge.toml", env = "ADE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ADE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the SQL an operation would run for a location
    Query(commands::query::QueryArgs),

    /// Convert a JSON row dump into an ADE collection
    Convert(commands::convert::ConvertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperationId;

    #[test]
    fn test_cli_parse_query() {
        let cli = Cli::parse_from([
            "ade-bridge",
            "query",
            "--scheme",
            "be.herd",
            "--id",
            "farm-1",
            "--operation",
            "get-milking-visits",
            "--from",
            "2023-05-01",
        ]);
        assert_eq!(cli.config, "ade-bridge.toml");
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.request.operation, OperationId::GetMilkingVisits);
                assert_eq!(args.request.from.as_deref(), Some("2023-05-01"));
                assert_eq!(args.request.to, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from([
            "ade-bridge",
            "convert",
            "--scheme",
            "be.herd",
            "--id",
            "farm-1",
            "--operation",
            "get-animals",
            "--rows",
            "rows.json",
            "--page-size",
            "20",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.rows, "rows.json");
                assert_eq!(args.request.page_size, Some(20));
                assert_eq!(args.request.operation, OperationId::GetAnimals);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_operation() {
        let result = Cli::try_parse_from([
            "ade-bridge",
            "query",
            "--scheme",
            "be.herd",
            "--id",
            "farm-1",
            "--operation",
            "get-feed",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["ade-bridge", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ade-bridge", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["ade-bridge", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
