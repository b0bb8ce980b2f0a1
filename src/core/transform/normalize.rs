//! Business normalization rules applied before re-validation

use crate::domain::record::RawRecord;

/// Canonical status for wells reported as "inactive"
pub const SHUTDOWN_STATUS: &str = "Shutdown";

/// Apply normalization rules to a record
///
/// - a status of "inactive" (any case) becomes [`SHUTDOWN_STATUS`]
/// - negative oil, gas and water volumes are clamped to zero
///
/// Normalizing an already-normalized record returns it unchanged.
pub fn normalize(mut record: RawRecord) -> RawRecord {
    if record.status.trim().eq_ignore_ascii_case("inactive") {
        record.status = SHUTDOWN_STATUS.to_string();
    }

    record.oil_production = clamp_volume(record.oil_production);
    record.gas_production = clamp_volume(record.gas_production);
    record.water_production = clamp_volume(record.water_production);

    record
}

// NaN is left alone so the validator still rejects it
fn clamp_volume(volume: f64) -> f64 {
    if volume < 0.0 {
        0.0
    } else {
        volume
    }
}
