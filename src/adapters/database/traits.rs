//! Record store trait
//!
//! This module defines the trait that durable store adapters must implement
//! to receive clean production records from the pipeline.

use crate::core::load::Statistics;
use crate::domain::record::CleanRecord;
use crate::domain::Result;
use async_trait::async_trait;

/// Durable store for clean production records
///
/// Implementations must be safe to share across tasks; the pipeline holds
/// the store behind an `Arc` for the whole run.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name used in logs (e.g. "postgresql")
    fn backend_name(&self) -> &str;

    /// Test the store connection
    ///
    /// The pipeline calls this once per run, when it reaches the load
    /// stage, to choose between durable and in-memory loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the production table and its index exist
    ///
    /// Must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert records, one row per record, in order
    ///
    /// There is no enclosing transaction: if an insert fails, rows inserted
    /// before it remain.
    ///
    /// # Returns
    ///
    /// The number of rows inserted, which equals `records.len()` on success.
    ///
    /// # Errors
    ///
    /// Returns the first insert error.
    async fn insert_records(&self, records: &[CleanRecord]) -> Result<usize>;

    /// Compute aggregate statistics over every stored row
    ///
    /// Returns empty statistics when the table has no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregate query fails.
    async fn fetch_statistics(&self) -> Result<Statistics>;
}
