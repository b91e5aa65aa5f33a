// ADE Bridge - ICAR ADE exchange translation
// Copyright (c) 2025 ADE Bridge Contributors
// Licensed under the MIT License

//! # ADE Bridge - farm-store rows to ICAR ADE resources
//!
//! ADE Bridge sits between a farm-management database and the ICAR Animal
//! Data Exchange API. Each store exposes its data through configured SQL
//! templates returning one flat row per resource; ADE Bridge rewrites those
//! templates for the requested modification range and page, and rebuilds the
//! nested ADE documents from the flat rows.
//!
//! ## Overview
//!
//! - **Rewriting** SQL templates for `meta-modified-from`/`meta-modified-to`
//!   ranges and `currentPage`/`pageSize` paging
//! - **Decoding** repeated substructures (quarter milkings, milk
//!   characteristics, samples, remarks) out of flat rows
//! - **Assembling** `icarMilkingVisitEventResource` and
//!   `icarAnimalCoreResource` documents with empty parts pruned
//! - **Paginating** collections with a `view` of first/last/next/prev links
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Query rewriting, decoding, assembly and the exchange service
//! - [`adapters`] - Record sources
//! - [`domain`] - Identifiers, ICAR codes, flat rows and ADE resources
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ade_bridge::core::query::rewrite_query;
//! use ade_bridge::core::pagination::PageRequest;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let template = "SELECT * FROM visits \
//!     WHERE modified BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime' \
//!     WHERE modified > ':metaModifiedFromDateTime' \
//!     WHERE modified < ':metaModifiedToDateTime' \
//!     ORDER BY modified OFFSET ':offset' LIMIT ':pageSize'";
//!
//! let page = PageRequest { current_page: 0, page_size: 50 };
//! let sql = rewrite_query(template, Some("2023-05-01"), None, &page)?;
//! assert!(sql.contains("> '2023-05-01T00:00:00.000Z'"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error is
//! [`domain::AdeError`]. [`domain::AdeError::is_bad_request`] separates caller
//! mistakes from configuration and store failures.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
