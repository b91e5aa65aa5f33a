//! Convert command implementation
//!
//! Runs an operation end-to-end against a captured JSON row dump instead of
//! a live store and prints the resulting `{view, member}` collection.

use super::{exit_code, load_catalog, RequestArgs};
use crate::adapters::source::JsonRowsSource;
use crate::core::exchange::{ExchangeRequest, ExchangeService};
use crate::domain::{Animal, MilkingVisit, OperationId, Result};
use clap::Args;
use std::sync::Arc;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// JSON file holding an array of row objects
    #[arg(long)]
    pub rows: String,

    /// Request path used for pagination links (defaults to the collection path)
    #[arg(long)]
    pub path: Option<String>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,

    /// Fail when a resource lacks a required field
    #[arg(long)]
    pub strict: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            config_path = %config_path,
            rows = %self.rows,
            operation = %self.request.operation,
            "Converting row dump"
        );

        let catalog = match load_catalog(config_path) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        let service = ExchangeService::new(catalog, Arc::new(JsonRowsSource::new(&self.rows)));

        match self.run(&service).await {
            Ok(json) => {
                println!("{json}");
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Conversion failed");
                eprintln!("❌ {e}");
                Ok(exit_code(&e))
            }
        }
    }

    async fn run(&self, service: &ExchangeService) -> Result<String> {
        let request = ExchangeRequest::new(
            &self.request.scheme,
            &self.request.id,
            self.path
                .clone()
                .unwrap_or_else(|| self.request.collection_path()),
            self.request.query_params(),
        )?;

        let value = match self.request.operation {
            OperationId::GetMilkingVisits => {
                let collection = service.milking_visits(&request).await?;
                if self.strict {
                    collection.member.iter().try_for_each(MilkingVisit::ensure_complete)?;
                }
                serde_json::to_value(collection)?
            }
            OperationId::GetAnimals => {
                let collection = service.animals(&request).await?;
                if self.strict {
                    collection.member.iter().try_for_each(Animal::ensure_complete)?;
                }
                serde_json::to_value(collection)?
            }
        };

        let json = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        Ok(json)
    }
}
