//! Core translation logic for ADE Bridge.
//!
//! # Modules
//!
//! - [`query`] - SQL template parsing and rendering for a modification range
//! - [`decode`] - rebuilding repeated substructures from flat rows
//! - [`assemble`] - composing complete ADE resources
//! - [`prune`] - dropping empty substructures
//! - [`pagination`] - page requests and the collection `view`
//! - [`catalog`] - startup-built locations, templates and units
//! - [`exchange`] - the per-request service tying these together
//!
//! # Request Flow
//!
//! 1. **Resolve**: location scheme/id to a store via the [`catalog::Catalog`]
//! 2. **Render**: the store type's template with range and page substituted
//! 3. **Fetch**: rows from the [`crate::adapters::source::RecordSource`]
//! 4. **Assemble**: one resource per row
//! 5. **Paginate**: build the `view` from the first row's `totalitems`
//!
//! # Example
//!
//! ```rust,no_run
//! use ade_bridge::adapters::source::JsonRowsSource;
//! use ade_bridge::config::load_config;
//! use ade_bridge::core::catalog::Catalog;
//! use ade_bridge::core::exchange::{ExchangeRequest, ExchangeService};
//! use ade_bridge::core::pagination::QueryParams;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ade-bridge.toml")?;
//! let catalog = Arc::new(Catalog::from_config(&config)?);
//! let service = ExchangeService::new(catalog, Arc::new(JsonRowsSource::new("rows.json")));
//!
//! let request = ExchangeRequest::new(
//!     "be.herd",
//!     "farm-1",
//!     "/locations/be.herd/farm-1/milking-visits",
//!     QueryParams::parse("meta-modified-from=2023-05-01&pageSize=20"),
//! )?;
//! let visits = service.milking_visits(&request).await?;
//! println!("{} of {}", visits.member.len(), visits.view.total_items);
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod catalog;
pub mod decode;
pub mod exchange;
pub mod pagination;
pub mod prune;
pub mod query;
