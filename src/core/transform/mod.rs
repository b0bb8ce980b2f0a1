//! Transform stage: raw records → clean records
//!
//! Each record is normalized, re-validated and, if it still passes, turned
//! into a [`CleanRecord`] with its derived metrics. Order is preserved and
//! nothing is deduplicated.

pub mod normalize;

use crate::core::validate::is_valid;
use crate::domain::record::{CleanRecord, RawRecord};

pub use normalize::normalize;

/// Output of the transform stage
#[derive(Debug, Default)]
pub struct TransformOutcome {
    /// Clean records, in input order
    pub records: Vec<CleanRecord>,

    /// Number of records dropped because they failed validation after normalization
    pub rejected: usize,
}

/// Normalize and validate each record
///
/// # Examples
///
/// ```
/// use derrick::core::transform::transform;
/// use derrick::domain::RawRecord;
/// use chrono::NaiveDate;
///
/// let raw = RawRecord::builder()
///     .well_id("WELL-001")
///     .production_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .oil_production(500.0)
///     .gas_production(2000.0)
///     .status("inactive")
///     .build()
///     .unwrap();
///
/// let outcome = transform(vec![raw]);
/// assert_eq!(outcome.records[0].oil_gas_ratio(), 250.0);
/// assert_eq!(outcome.records[0].reading().status, "Shutdown");
/// ```
pub fn transform(records: Vec<RawRecord>) -> TransformOutcome {
    let mut outcome = TransformOutcome {
        records: Vec::with_capacity(records.len()),
        rejected: 0,
    };

    for record in records {
        let record = normalize(record);
        if is_valid(&record) {
            outcome.records.push(CleanRecord::from_valid(record));
        } else {
            tracing::warn!(
                well_id = %record.well_id,
                production_date = %record.production_date,
                "Rejecting record that failed validation after normalization"
            );
            outcome.rejected += 1;
        }
    }

    tracing::info!(
        transformed = outcome.records.len(),
        rejected = outcome.rejected,
        "Transformation finished"
    );

    outcome
}
