//! Query command implementation
//!
//! Prints the SQL an operation would send to a location's store, with the
//! modification range and page substituted. Nothing is executed.

use super::{exit_code, load_catalog, RequestArgs};
use crate::domain::LocationKey;
use clap::Args;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

impl QueryArgs {
    /// Execute the query command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            config_path = %config_path,
            operation = %self.request.operation,
            "Rendering query"
        );

        let catalog = match load_catalog(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let rendered = LocationKey::parse(&self.request.scheme, &self.request.id).and_then(
            |location| {
                catalog.render(self.request.operation, &location, &self.request.query_params())
            },
        );

        match rendered {
            Ok(rendered) => {
                tracing::debug!(
                    db_type = %rendered.store.db_type,
                    db_client = %rendered.store.db_client,
                    offset = rendered.page.offset(),
                    "Query rendered"
                );
                println!("{}", rendered.sql);
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to render query");
                eprintln!("❌ {e}");
                Ok(exit_code(&e))
            }
        }
    }
}
