//! Pipeline orchestration
//!
//! This module runs the ETL stages in order and reports the outcome:
//! - Run coordination and the state machine
//! - Result summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::{Pipeline, PipelineState};
pub use summary::PipelineResult;
