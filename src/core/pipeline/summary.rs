//! Pipeline result and reporting
//!
//! This module defines the single result value produced by a pipeline run.

use crate::core::load::{LoadStrategy, Statistics};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Outcome of one pipeline run
///
/// Built up by the coordinator while the run progresses and returned once the
/// run reaches a terminal state. On failure, counts reached before the error
/// are kept.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Valid records taken from input files
    pub records_extracted: usize,

    /// Records that passed transformation
    pub records_transformed: usize,

    /// Records persisted or aggregated by the load stage
    pub records_loaded: usize,

    /// Records dropped by the transformer's re-validation
    pub records_rejected: usize,

    /// Input files moved to the processed directory
    pub files_processed: usize,

    /// Input files that could not be read or moved
    pub files_failed: usize,

    /// Rows skipped during extraction
    pub rows_skipped: usize,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Wall-clock time of the run
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,

    /// Load strategy actually used; `None` if the load stage was not reached
    pub load_mode: Option<LoadStrategy>,

    /// Aggregates from in-memory loading; empty otherwise
    pub statistics: Statistics,
}

impl PipelineResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self {
            records_extracted: 0,
            records_transformed: 0,
            records_loaded: 0,
            records_rejected: 0,
            files_processed: 0,
            files_failed: 0,
            rows_skipped: 0,
            success: false,
            error_message: None,
            duration: Duration::from_secs(0),
            load_mode: None,
            statistics: Statistics::empty(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Mark the run as failed with the given message
    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = false;
        self.error_message = Some(message.into());
    }

    /// Log the result
    pub fn log_summary(&self) {
        let load_mode = self
            .load_mode
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string());

        if self.success {
            tracing::info!(
                records_extracted = self.records_extracted,
                records_transformed = self.records_transformed,
                records_loaded = self.records_loaded,
                records_rejected = self.records_rejected,
                files_processed = self.files_processed,
                files_failed = self.files_failed,
                rows_skipped = self.rows_skipped,
                load_mode = %load_mode,
                duration_ms = self.duration.as_millis() as u64,
                "Pipeline completed"
            );
        } else {
            tracing::error!(
                records_extracted = self.records_extracted,
                records_transformed = self.records_transformed,
                records_loaded = self.records_loaded,
                load_mode = %load_mode,
                duration_ms = self.duration.as_millis() as u64,
                error = self.error_message.as_deref().unwrap_or("unknown error"),
                "Pipeline failed"
            );
        }

        if self.files_failed > 0 {
            tracing::warn!(
                files_failed = self.files_failed,
                "Some input files were routed to the error directory"
            );
        }
    }
}

impl Default for PipelineResult {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
