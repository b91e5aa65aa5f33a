//! CLI command implementations
//!
//! `query` and `convert` share [`RequestArgs`], the command-line form of one
//! exchange request.

pub mod convert;
pub mod init;
pub mod query;
pub mod validate;

use crate::config::load_config;
use crate::core::catalog::Catalog;
use crate::core::exchange::{META_MODIFIED_FROM_PARAM, META_MODIFIED_TO_PARAM};
use crate::core::pagination::{QueryParams, CURRENT_PAGE_PARAM, PAGE_SIZE_PARAM};
use crate::domain::{AdeError, OperationId, Result};
use clap::Args;

/// Location, operation, range and page of one request
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Location scheme, e.g. `be.herd`
    #[arg(long)]
    pub scheme: String,

    /// Location id within the scheme
    #[arg(long)]
    pub id: String,

    /// Operation (get-milking-visits, get-animals)
    #[arg(long)]
    pub operation: OperationId,

    /// Lower modification bound (meta-modified-from)
    #[arg(long)]
    pub from: Option<String>,

    /// Upper modification bound (meta-modified-to)
    #[arg(long)]
    pub to: Option<String>,

    /// Zero-based page index
    #[arg(long)]
    pub current_page: Option<u64>,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<u64>,
}

impl RequestArgs {
    /// Query parameters in the order a router would pass them
    pub fn query_params(&self) -> QueryParams {
        let mut query = QueryParams::default();
        if let Some(from) = &self.from {
            query.set(META_MODIFIED_FROM_PARAM, from.as_str());
        }
        if let Some(to) = &self.to {
            query.set(META_MODIFIED_TO_PARAM, to.as_str());
        }
        if let Some(page) = self.current_page {
            query.set(CURRENT_PAGE_PARAM, page.to_string());
        }
        if let Some(size) = self.page_size {
            query.set(PAGE_SIZE_PARAM, size.to_string());
        }
        query
    }

    /// Collection path the operation is served under
    pub fn collection_path(&self) -> String {
        let resource = match self.operation {
            OperationId::GetMilkingVisits => "milking-visits",
            OperationId::GetAnimals => "animals",
        };
        format!("/locations/{}/{}/{resource}", self.scheme, self.id)
    }
}

/// Loads the configuration file and builds the catalog
pub(crate) fn load_catalog(config_path: &str) -> Result<Catalog> {
    let config = load_config(config_path)?;
    Catalog::from_config(&config)
}

/// Exit code for a failed request: 2 for configuration defects and bad
/// input, 5 otherwise
pub(crate) fn exit_code(error: &AdeError) -> i32 {
    match error {
        AdeError::Configuration(_) | AdeError::TemplateMalformed(_) => 2,
        e if e.is_bad_request() => 2,
        _ => 5,
    }
}
