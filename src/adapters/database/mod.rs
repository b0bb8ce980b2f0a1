//! Record store abstraction
//!
//! This module provides a trait-based abstraction over the durable store,
//! so the pipeline can be exercised against in-process stores in tests.

pub mod factory;
pub mod traits;

pub use factory::create_record_store;
pub use traits::RecordStore;
