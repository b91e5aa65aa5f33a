//! Paging parameters and the collection `view` block
//!
//! Page numbers are zero-based. Links reproduce the caller's query string in
//! its original order with `currentPage`/`pageSize` overridden in place, or
//! appended when the caller did not send them.

use crate::domain::{AdeError, Result};
use serde::Serialize;
use url::form_urlencoded;

pub const CURRENT_PAGE_PARAM: &str = "currentPage";
pub const PAGE_SIZE_PARAM: &str = "pageSize";

/// Ordered request query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Decodes a raw query string (without the leading `?`)
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect()
    }

    /// First value of a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets a parameter at its first position, or appends it when absent;
    /// later repeats of the same name are dropped
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|(key, _)| key == name) {
            Some(first) => {
                self.0[first].1 = value;
                let mut index = 0;
                self.0.retain(|(key, _)| {
                    let keep = index <= first || key != name;
                    index += 1;
                    keep
                });
            }
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// URL-encoded `key=value&...` form
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub current_page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Reads `currentPage`/`pageSize`, defaulting to page 0 and the
    /// configured page size
    ///
    /// # Errors
    ///
    /// Returns `AdeError::Validation` for non-integer values, a zero page size
    /// or a page size above `max_page_size`.
    pub fn from_query(
        query: &QueryParams,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Result<Self> {
        let current_page = match query.get(CURRENT_PAGE_PARAM) {
            Some(raw) => parse_param(CURRENT_PAGE_PARAM, raw)?,
            None => 0,
        };
        let page_size = match query.get(PAGE_SIZE_PARAM) {
            Some(raw) => parse_param(PAGE_SIZE_PARAM, raw)?,
            None => default_page_size,
        };

        if page_size == 0 {
            return Err(AdeError::Validation(format!(
                "{PAGE_SIZE_PARAM} must be greater than 0"
            )));
        }
        if page_size > max_page_size {
            return Err(AdeError::Validation(format!(
                "{PAGE_SIZE_PARAM} must not exceed {max_page_size}, got {page_size}"
            )));
        }

        Ok(Self {
            current_page,
            page_size,
        })
    }

    /// Rows to skip
    pub fn offset(&self) -> u64 {
        self.current_page.saturating_mul(self.page_size)
    }
}

fn parse_param(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        AdeError::Validation(format!("{name} must be a non-negative integer, got '{raw}'"))
    })
}

/// The `view` block of an ADE collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub total_items: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    pub last: String,
}

/// Builds the view for one page of results
pub fn build_view(
    path: &str,
    query: &QueryParams,
    page: &PageRequest,
    total_items: u64,
) -> PaginationView {
    let total_pages = total_items.div_ceil(page.page_size.max(1));
    let current = page.current_page;
    let link = |target: u64| page_link(path, query, target, page.page_size);

    PaginationView {
        total_items,
        total_pages,
        page_size: page.page_size,
        current_page: current,
        first: link(0),
        next: current
            .checked_add(1)
            .filter(|&next| next < total_pages)
            .map(link),
        prev: (current > 0).then(|| link(current - 1)),
        last: link(total_pages.saturating_sub(1)),
    }
}

fn page_link(path: &str, query: &QueryParams, current_page: u64, page_size: u64) -> String {
    let mut params = query.clone();
    params.set(CURRENT_PAGE_PARAM, current_page.to_string());
    params.set(PAGE_SIZE_PARAM, page_size.to_string());
    format!("{path}?{}", params.to_query_string())
}
