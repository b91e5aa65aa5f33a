//! Row dumps as a record source
//!
//! Reads a JSON array of row objects, as exported from a farm store, and
//! serves it for any query. Lets operations run end to end without a database
//! driver.

use super::traits::RecordSource;
use crate::core::catalog::StoreTarget;
use crate::domain::record::FlatRecord;
use crate::domain::{AdeError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonRowsSource {
    path: PathBuf,
}

impl JsonRowsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses a JSON array of row objects
///
/// # Errors
///
/// Returns `AdeError::Serialization` if the text is not an array of objects.
pub fn parse_rows(text: &str) -> Result<Vec<FlatRecord>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(rows) => rows.into_iter().map(FlatRecord::from_value).collect(),
        other => Err(AdeError::Serialization(format!(
            "Expected a JSON array of rows, got: {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl RecordSource for JsonRowsSource {
    async fn fetch(&self, store: &StoreTarget, sql: &str) -> Result<Vec<FlatRecord>> {
        tracing::debug!(
            location = %store.location,
            db_client = %store.db_client,
            db_name = %store.db_name,
            sql = %sql,
            rows_file = %self.path.display(),
            "Serving query from row dump"
        );

        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AdeError::Database(format!(
                "Failed to read row dump {}: {}",
                self.path.display(),
                e
            ))
        })?;
        parse_rows(&text)
    }
}
