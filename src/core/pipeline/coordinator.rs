//! Pipeline coordinator - runs Extract → Transform → Load once
//!
//! The coordinator owns the run's state machine:
//!
//! ```text
//! Idle → Extracting → Transforming → Loading → Succeeded
//!            │              │            │
//!            └──────────────┴────────────┴────→ Failed
//! ```
//!
//! An extraction that yields no records goes straight to `Succeeded`.

use crate::adapters::database::{create_record_store, RecordStore};
use crate::config::DerrickConfig;
use crate::core::extract::Extractor;
use crate::core::load::{load, LoadMode};
use crate::core::pipeline::summary::PipelineResult;
use crate::core::transform::transform;
use crate::domain::Result;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Pipeline run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Extracting,
    Transforming,
    Loading,
    Succeeded,
    Failed,
}

impl PipelineState {
    /// True for `Succeeded` and `Failed`
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Extracting => "extracting",
            PipelineState::Transforming => "transforming",
            PipelineState::Loading => "loading",
            PipelineState::Succeeded => "succeeded",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// ETL pipeline over one input directory
pub struct Pipeline {
    extractor: Extractor,
    use_database: bool,
    store: Option<Arc<dyn RecordStore>>,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline with an explicit store
    ///
    /// `store` is only used when `config.load.use_database` is set; passing
    /// `None` in that case makes every run fall back to in-memory loading.
    pub fn new(config: &DerrickConfig, store: Option<Arc<dyn RecordStore>>) -> Self {
        Self {
            extractor: Extractor::new(&config.paths),
            use_database: config.load.use_database,
            store,
            state: PipelineState::Idle,
        }
    }

    /// Create a pipeline, building the durable store when the database is enabled
    ///
    /// A store that cannot be built is logged and treated like an
    /// unreachable one.
    pub async fn from_config(config: &DerrickConfig) -> Self {
        let store = if config.load.use_database {
            match create_record_store(config).await {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create record store");
                    None
                }
            }
        } else {
            None
        };

        Self::new(config, store)
    }

    /// Current state; terminal after [`Pipeline::run`] returns
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the pipeline once
    ///
    /// Never returns an error: failures are reported through
    /// [`PipelineResult::success`] and [`PipelineResult::error_message`].
    /// A pipeline that has already reached a terminal state does not run
    /// again; the returned result is a failure and the state is unchanged.
    pub async fn run(&mut self) -> PipelineResult {
        let start_time = Instant::now();
        let mut result = PipelineResult::new();

        if self.state.is_terminal() {
            tracing::warn!(state = %self.state, "Pipeline already finished; not running again");
            result.fail(format!("pipeline already finished ({})", self.state));
            return result.with_duration(start_time.elapsed());
        }

        tracing::info!(
            input_dir = %self.extractor.input_dir().display(),
            use_database = self.use_database,
            "Starting pipeline run"
        );

        match self.execute(&mut result).await {
            Ok(()) => {
                result.success = true;
                self.transition(PipelineState::Succeeded);
            }
            Err(e) => {
                result.fail(e.to_string());
                self.transition(PipelineState::Failed);
            }
        }

        let result = result.with_duration(start_time.elapsed());
        result.log_summary();
        result
    }

    async fn execute(&mut self, result: &mut PipelineResult) -> Result<()> {
        self.transition(PipelineState::Extracting);
        let extraction = self.extractor.extract_all()?;

        result.records_extracted = extraction.records.len();
        result.files_processed = extraction.files_processed();
        result.files_failed = extraction.files_failed();
        result.rows_skipped = extraction.rows_skipped();

        if extraction.records.is_empty() {
            tracing::info!("No records extracted; skipping transform and load");
            return Ok(());
        }

        self.transition(PipelineState::Transforming);
        let transformed = transform(extraction.records);
        result.records_transformed = transformed.records.len();
        result.records_rejected = transformed.rejected;

        self.transition(PipelineState::Loading);
        let mode = self.select_load_mode().await;
        result.load_mode = Some(mode.strategy());

        let outcome = load(&transformed.records, &mode).await?;
        result.records_loaded = outcome.loaded;
        result.statistics = outcome.statistics;

        Ok(())
    }

    /// Probe the store; fall back to in-memory on any failure
    async fn select_load_mode(&self) -> LoadMode {
        if !self.use_database {
            return LoadMode::InMemory;
        }

        let Some(store) = &self.store else {
            tracing::warn!("Database load requested but no store is available; using in-memory mode");
            return LoadMode::InMemory;
        };

        match store.test_connection().await {
            Ok(()) => LoadMode::Durable(Arc::clone(store)),
            Err(e) => {
                tracing::warn!(
                    backend = store.backend_name(),
                    error = %e,
                    "Record store unreachable; falling back to in-memory mode"
                );
                LoadMode::InMemory
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::debug!(from = %self.state, to = %next, "Pipeline state transition");
        self.state = next;
    }
}
