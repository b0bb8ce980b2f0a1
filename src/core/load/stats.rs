//! Aggregate production statistics
//!
//! [`Statistics`] is built once, either from clean records in memory or from
//! an aggregate query against the store, and is read-only afterwards.

use crate::domain::record::CleanRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

pub const TOTAL_RECORDS: &str = "total_records";
pub const UNIQUE_WELLS: &str = "unique_wells";
pub const TOTAL_OIL_PRODUCTION: &str = "total_oil_production";
pub const AVG_OIL_PRODUCTION: &str = "avg_oil_production";
pub const AVG_GAS_PRODUCTION: &str = "avg_gas_production";
pub const AVG_WATER_CUT: &str = "avg_water_cut";
pub const AVG_OIL_GAS_RATIO: &str = "avg_oil_gas_ratio";
pub const EARLIEST_DATE: &str = "earliest_date";
pub const LATEST_DATE: &str = "latest_date";
pub const ACTIVE_RECORDS: &str = "active_records";
pub const SHUTDOWN_RECORDS: &str = "shutdown_records";
pub const MAINTENANCE_RECORDS: &str = "maintenance_records";

/// A single statistic value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Number(f64),
    Date(NaiveDate),
}

impl StatValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            StatValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            StatValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{n}"),
            StatValue::Number(n) => write!(f, "{n:.2}"),
            StatValue::Date(d) => write!(f, "{d}"),
        }
    }
}

/// Immutable mapping of statistic name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Statistics(BTreeMap<String, StatValue>);

impl Statistics {
    /// Empty statistics, used when there is nothing to aggregate
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build statistics from name/value pairs
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, StatValue)>,
        K: Into<String>,
    {
        Self(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Aggregate clean records in memory
    ///
    /// Returns empty statistics for an empty slice. The oil/gas ratio average
    /// only includes records with a positive ratio; status counts compare
    /// case-insensitively.
    pub fn from_records(records: &[CleanRecord]) -> Self {
        if records.is_empty() {
            return Self::empty();
        }

        let count = records.len() as f64;
        let mut wells = HashSet::new();
        let mut total_oil = 0.0;
        let mut total_gas = 0.0;
        let mut total_water_cut = 0.0;
        let mut ratio_sum = 0.0;
        let mut ratio_count = 0usize;
        let mut earliest = records[0].production_date();
        let mut latest = earliest;
        let mut active = 0u64;
        let mut shutdown = 0u64;
        let mut maintenance = 0u64;

        for record in records {
            let reading = record.reading();
            wells.insert(record.well_id());
            total_oil += reading.oil_production;
            total_gas += reading.gas_production;
            total_water_cut += record.water_cut();

            if record.oil_gas_ratio() > 0.0 {
                ratio_sum += record.oil_gas_ratio();
                ratio_count += 1;
            }

            earliest = earliest.min(reading.production_date);
            latest = latest.max(reading.production_date);

            let status = reading.status.trim();
            if status.eq_ignore_ascii_case("active") {
                active += 1;
            } else if status.eq_ignore_ascii_case("shutdown") {
                shutdown += 1;
            } else if status.eq_ignore_ascii_case("maintenance") {
                maintenance += 1;
            }
        }

        let avg_ratio = if ratio_count > 0 {
            ratio_sum / ratio_count as f64
        } else {
            0.0
        };

        Self::from_entries([
            (TOTAL_RECORDS, StatValue::Count(records.len() as u64)),
            (UNIQUE_WELLS, StatValue::Count(wells.len() as u64)),
            (TOTAL_OIL_PRODUCTION, StatValue::Number(total_oil)),
            (AVG_OIL_PRODUCTION, StatValue::Number(total_oil / count)),
            (AVG_GAS_PRODUCTION, StatValue::Number(total_gas / count)),
            (AVG_WATER_CUT, StatValue::Number(total_water_cut / count)),
            (AVG_OIL_GAS_RATIO, StatValue::Number(avg_ratio)),
            (EARLIEST_DATE, StatValue::Date(earliest)),
            (LATEST_DATE, StatValue::Date(latest)),
            (ACTIVE_RECORDS, StatValue::Count(active)),
            (SHUTDOWN_RECORDS, StatValue::Count(shutdown)),
            (MAINTENANCE_RECORDS, StatValue::Count(maintenance)),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate statistics in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Log every statistic at info level
    pub fn log(&self) {
        for (name, value) in self.iter() {
            tracing::info!(statistic = name, value = %value, "Production statistic");
        }
    }
}
