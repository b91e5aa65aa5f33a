//! SQL template rewriting
//!
//! # Example
//!
//! ```rust
//! use ade_bridge::core::pagination::PageRequest;
//! use ade_bridge::core::query::rewrite_query;
//!
//! let template = "SELECT * FROM v \
//!     WHERE m BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime' \
//!     WHERE m > ':metaModifiedFromDateTime' \
//!     WHERE m < ':metaModifiedToDateTime' \
//!     ORDER BY m OFFSET ':offset' LIMIT ':pageSize'";
//!
//! let page = PageRequest { current_page: 1, page_size: 20 };
//! let sql = rewrite_query(template, Some("2023-05-01"), None, &page).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM v WHERE m > '2023-05-01T00:00:00.000Z' ORDER BY m OFFSET 20 LIMIT 20"
//! );
//! ```

pub mod range;
pub mod template;

pub use range::{canonical_datetime, RangeFilter};
pub use template::{QueryTemplate, SegmentKind};

use crate::core::pagination::PageRequest;
use crate::domain::Result;

/// Parses and renders a template in one step
///
/// Services render catalog templates parsed at startup instead; this is for
/// one-off use such as the `query` command.
///
/// # Errors
///
/// Returns `AdeError::InvalidDateFormat` for an unparsable bound and
/// `AdeError::TemplateMalformed` for a template without the expected structure.
pub fn rewrite_query(
    template: &str,
    from: Option<&str>,
    to: Option<&str>,
    page: &PageRequest,
) -> Result<String> {
    let range = RangeFilter::from_bounds(from, to)?;
    QueryTemplate::parse(template)?.render(&range, page)
}
