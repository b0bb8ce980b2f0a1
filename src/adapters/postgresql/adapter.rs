//! PostgreSQL adapter implementing the record store trait

use crate::adapters::database::traits::RecordStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    ProductionRow, StatisticsRow, INSERT_PRODUCTION_SQL, STATISTICS_SQL,
};
use crate::core::load::Statistics;
use crate::domain::record::CleanRecord;
use crate::domain::{DerrickError, Result};
use async_trait::async_trait;

/// PostgreSQL implementation of [`RecordStore`]
///
/// This wraps the PostgreSQLClient and writes to the `well_production` table.
pub struct PostgreSQLAdapter {
    client: PostgreSQLClient,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for PostgreSQLAdapter {
    fn backend_name(&self) -> &str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn insert_records(&self, records: &[CleanRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let conn = self.client.get_connection().await?;
        let statement = conn
            .prepare_cached(INSERT_PRODUCTION_SQL)
            .await
            .map_err(|e| DerrickError::Database(format!("Failed to prepare insert: {e}")))?;

        let mut inserted = 0;
        for record in records {
            let row = ProductionRow::from(record);
            conn.execute(
                &statement,
                &[
                    &row.well_id,
                    &row.production_date,
                    &row.oil_production,
                    &row.gas_production,
                    &row.water_production,
                    &row.wellhead_pressure,
                    &row.temperature,
                    &row.status,
                    &row.comments,
                    &row.oil_gas_ratio,
                    &row.water_cut,
                ],
            )
            .await
            .map_err(|e| {
                DerrickError::Database(format!(
                    "Insert failed for well {} on {} after {} rows: {}",
                    row.well_id, row.production_date, inserted, e
                ))
            })?;

            inserted += 1;
        }

        tracing::debug!(inserted, "Inserted production rows");
        Ok(inserted)
    }

    async fn fetch_statistics(&self) -> Result<Statistics> {
        let rows = self.client.query(STATISTICS_SQL, &[]).await?;
        let row = rows.first().ok_or_else(|| {
            DerrickError::Database("Statistics query returned no rows".to_string())
        })?;

        Ok(StatisticsRow::from_row(row)?.into_statistics())
    }
}
