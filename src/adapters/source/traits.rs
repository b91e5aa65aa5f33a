//! Record source abstraction
//!
//! The exchange service never talks to a database driver directly. It renders
//! SQL for a store and hands it to a [`RecordSource`], which returns the rows
//! as [`FlatRecord`]s.

use crate::core::catalog::StoreTarget;
use crate::domain::record::FlatRecord;
use crate::domain::Result;
use async_trait::async_trait;

/// Runs rendered SQL against a location's store
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Executes `sql` against `store` and returns every row
    ///
    /// # Errors
    ///
    /// Returns `AdeError::Database` if the store cannot be reached or the
    /// query fails, and `AdeError::Serialization` if a row is not an object.
    async fn fetch(&self, store: &StoreTarget, sql: &str) -> Result<Vec<FlatRecord>>;
}
