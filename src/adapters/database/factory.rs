//! Record store factory
//!
//! This module provides the factory function that builds the durable store
//! from configuration.

use crate::adapters::database::traits::RecordStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::DerrickConfig;
use crate::domain::{DerrickError, Result};
use std::sync::Arc;

/// Create the durable record store described by the configuration
///
/// Building the store does not open a connection; reachability is checked
/// later with [`RecordStore::test_connection`].
///
/// # Arguments
///
/// * `config` - The Derrick configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements RecordStore
///
/// # Errors
///
/// Returns an error if the `[postgresql]` section is missing or the pool
/// cannot be built (for example, an unparseable connection string).
pub async fn create_record_store(config: &DerrickConfig) -> Result<Arc<dyn RecordStore>> {
    let pg_config = config.postgresql.as_ref().ok_or_else(|| {
        DerrickError::Configuration(
            "postgresql configuration is required for the durable store".to_string(),
        )
    })?;

    tracing::info!("Creating PostgreSQL record store");
    let client = PostgreSQLClient::new(pg_config.clone()).await?;
    tracing::debug!(
        connection = %client.connection_string_safe(),
        "PostgreSQL pool created"
    );

    Ok(Arc::new(PostgreSQLAdapter::new(client)) as Arc<dyn RecordStore>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const BASE: &str = r#"
[paths]
input_dir = "in"
processed_dir = "done"
error_dir = "err"
"#;

    #[tokio::test]
    async fn test_missing_postgresql_section() {
        let config = parse_config(BASE).unwrap();
        let result = create_record_store(&config).await;
        assert!(matches!(result, Err(DerrickError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_store_built_without_connecting() {
        let toml = format!(
            "{BASE}\n[postgresql]\nconnection_string = \"postgresql://etl:pw@127.0.0.1:1/wells\"\n"
        );
        let config = parse_config(&toml).unwrap();

        let store = create_record_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "postgresql");
    }
}
