//! Load stage: clean records → store or in-memory statistics
//!
//! Two mutually exclusive modes:
//!
//! - **Durable**: ensure the schema exists and insert every record into a
//!   [`RecordStore`]. A failed insert is fatal; rows inserted before it stay
//!   inserted.
//! - **In-memory**: aggregate the records into [`Statistics`] without
//!   persisting anything.

pub mod stats;

use crate::adapters::database::RecordStore;
use crate::domain::record::CleanRecord;
use crate::domain::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub use stats::{StatValue, Statistics};

/// Load strategy chosen for a run
#[derive(Clone)]
pub enum LoadMode {
    /// Persist to the given store
    Durable(Arc<dyn RecordStore>),
    /// Compute statistics only
    InMemory,
}

impl LoadMode {
    pub fn strategy(&self) -> LoadStrategy {
        match self {
            LoadMode::Durable(_) => LoadStrategy::Durable,
            LoadMode::InMemory => LoadStrategy::InMemory,
        }
    }
}

impl fmt::Debug for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Durable(store) => f.debug_tuple("Durable").field(&store.backend_name()).finish(),
            LoadMode::InMemory => f.write_str("InMemory"),
        }
    }
}

/// Label for the load strategy, as reported in results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    Durable,
    InMemory,
}

impl fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStrategy::Durable => f.write_str("durable"),
            LoadStrategy::InMemory => f.write_str("in-memory"),
        }
    }
}

/// Output of the load stage
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Records persisted (durable) or aggregated (in-memory)
    pub loaded: usize,

    /// Aggregates; empty in durable mode and for empty input
    pub statistics: Statistics,
}

/// Load records using the given mode
///
/// # Errors
///
/// In durable mode, returns the store's error if the schema cannot be
/// created or any insert fails. In-memory mode never fails.
pub async fn load(records: &[CleanRecord], mode: &LoadMode) -> Result<LoadOutcome> {
    match mode {
        LoadMode::Durable(store) => {
            tracing::info!(
                backend = store.backend_name(),
                count = records.len(),
                "Loading records into durable store"
            );

            store.ensure_schema().await?;
            let loaded = store.insert_records(records).await?;

            tracing::info!(loaded, "Durable load finished");
            Ok(LoadOutcome {
                loaded,
                statistics: Statistics::empty(),
            })
        }
        LoadMode::InMemory => {
            tracing::info!(count = records.len(), "Computing in-memory statistics");

            let statistics = Statistics::from_records(records);
            statistics.log();

            Ok(LoadOutcome {
                loaded: records.len(),
                statistics,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::transform;
    use crate::domain::errors::DerrickError;
    use crate::domain::record::RawRecord;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        rows: Mutex<Vec<CleanRecord>>,
        schema_calls: Mutex<usize>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl RecordStore for RecordingStore {
        fn backend_name(&self) -> &str {
            "recording"
        }

        async fn test_connection(&self) -> Result<()> {
            Ok(())
        }

        async fn ensure_schema(&self) -> Result<()> {
            *self.schema_calls.lock().unwrap() += 1;
            Ok(())
        }

        async fn insert_records(&self, records: &[CleanRecord]) -> Result<usize> {
            let mut rows = self.rows.lock().unwrap();
            for record in records {
                if Some(rows.len()) == self.fail_after {
                    return Err(DerrickError::Database("insert failed".to_string()));
                }
                rows.push(record.clone());
            }
            Ok(records.len())
        }

        async fn fetch_statistics(&self) -> Result<Statistics> {
            Ok(Statistics::from_records(&self.rows.lock().unwrap()))
        }
    }

    fn records(n: u32) -> Vec<CleanRecord> {
        let raws = (1..=n)
            .map(|day| {
                RawRecord::builder()
                    .well_id(format!("W-{day}"))
                    .production_date(NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
                    .oil_production(10.0)
                    .build()
                    .unwrap()
            })
            .collect();
        transform(raws).records
    }

    #[tokio::test]
    async fn test_in_memory_load() {
        let outcome = load(&records(3), &LoadMode::InMemory).await.unwrap();
        assert_eq!(outcome.loaded, 3);
        assert_eq!(
            outcome.statistics.get(stats::TOTAL_RECORDS),
            Some(&StatValue::Count(3))
        );
    }

    #[tokio::test]
    async fn test_in_memory_load_empty() {
        let outcome = load(&[], &LoadMode::InMemory).await.unwrap();
        assert_eq!(outcome.loaded, 0);
        assert!(outcome.statistics.is_empty());
    }

    #[tokio::test]
    async fn test_durable_load() {
        let store = Arc::new(RecordingStore::default());
        let mode = LoadMode::Durable(store.clone());

        let outcome = load(&records(2), &mode).await.unwrap();
        assert_eq!(outcome.loaded, 2);
        assert!(outcome.statistics.is_empty());
        assert_eq!(*store.schema_calls.lock().unwrap(), 1);
        assert_eq!(store.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_durable_insert_failure_is_fatal() {
        let store = Arc::new(RecordingStore {
            fail_after: Some(1),
            ..RecordingStore::default()
        });
        let mode = LoadMode::Durable(store.clone());

        let result = load(&records(3), &mode).await;
        assert!(matches!(result, Err(DerrickError::Database(_))));
        // No batch transaction: the first row stays inserted
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(LoadMode::InMemory.strategy(), LoadStrategy::InMemory);
        assert_eq!(LoadStrategy::InMemory.to_string(), "in-memory");
        assert_eq!(
            serde_json::to_value(LoadStrategy::Durable).unwrap(),
            "durable"
        );
    }
}
