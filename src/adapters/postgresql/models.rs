//! PostgreSQL row models
//!
//! This module defines the row structures used when writing clean records to
//! the `well_production` table and reading aggregates back.

use crate::core::load::stats::{self, StatValue, Statistics};
use crate::domain::record::CleanRecord;
use crate::domain::{DerrickError, Result};
use chrono::NaiveDate;
use tokio_postgres::Row;

/// Parameterized insert for one production row
///
/// `id` and `loaded_at` are assigned by the database.
pub const INSERT_PRODUCTION_SQL: &str = r#"
    INSERT INTO well_production (
        well_id, production_date, oil_production, gas_production,
        water_production, wellhead_pressure, temperature, status,
        comments, oil_gas_ratio, water_cut
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
"#;

/// Aggregates over every stored row, in [`StatisticsRow`] column order
pub const STATISTICS_SQL: &str = r#"
    SELECT
        COUNT(*)::BIGINT                                              AS total_records,
        COUNT(DISTINCT well_id)::BIGINT                               AS unique_wells,
        COALESCE(SUM(oil_production), 0)                              AS total_oil_production,
        COALESCE(AVG(oil_production), 0)                              AS avg_oil_production,
        COALESCE(AVG(gas_production), 0)                              AS avg_gas_production,
        COALESCE(AVG(water_cut), 0)                                   AS avg_water_cut,
        COALESCE(AVG(oil_gas_ratio) FILTER (WHERE oil_gas_ratio > 0), 0) AS avg_oil_gas_ratio,
        MIN(production_date)                                          AS earliest_date,
        MAX(production_date)                                          AS latest_date,
        COUNT(*) FILTER (WHERE lower(trim(status)) = 'active')::BIGINT      AS active_records,
        COUNT(*) FILTER (WHERE lower(trim(status)) = 'shutdown')::BIGINT    AS shutdown_records,
        COUNT(*) FILTER (WHERE lower(trim(status)) = 'maintenance')::BIGINT AS maintenance_records
    FROM well_production
"#;

/// One `well_production` row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRow<'a> {
    pub well_id: &'a str,
    pub production_date: NaiveDate,
    pub oil_production: f64,
    pub gas_production: f64,
    pub water_production: f64,
    pub wellhead_pressure: f64,
    pub temperature: f64,
    pub status: &'a str,
    pub comments: Option<&'a str>,
    pub oil_gas_ratio: f64,
    pub water_cut: f64,
}

impl<'a> From<&'a CleanRecord> for ProductionRow<'a> {
    fn from(record: &'a CleanRecord) -> Self {
        let reading = record.reading();
        Self {
            well_id: &reading.well_id,
            production_date: reading.production_date,
            oil_production: reading.oil_production,
            gas_production: reading.gas_production,
            water_production: reading.water_production,
            wellhead_pressure: reading.wellhead_pressure,
            temperature: reading.temperature,
            status: &reading.status,
            comments: reading.comments.as_deref(),
            oil_gas_ratio: record.oil_gas_ratio(),
            water_cut: record.water_cut(),
        }
    }
}

/// Result row of [`STATISTICS_SQL`]
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRow {
    pub total_records: i64,
    pub unique_wells: i64,
    pub total_oil_production: f64,
    pub avg_oil_production: f64,
    pub avg_gas_production: f64,
    pub avg_water_cut: f64,
    pub avg_oil_gas_ratio: f64,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
    pub active_records: i64,
    pub shutdown_records: i64,
    pub maintenance_records: i64,
}

impl StatisticsRow {
    /// Read the aggregate columns from a query row
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has an unexpected type.
    pub fn from_row(row: &Row) -> Result<Self> {
        let column_err =
            |e: tokio_postgres::Error| DerrickError::Database(format!("Bad statistics row: {e}"));

        Ok(Self {
            total_records: row.try_get("total_records").map_err(column_err)?,
            unique_wells: row.try_get("unique_wells").map_err(column_err)?,
            total_oil_production: row.try_get("total_oil_production").map_err(column_err)?,
            avg_oil_production: row.try_get("avg_oil_production").map_err(column_err)?,
            avg_gas_production: row.try_get("avg_gas_production").map_err(column_err)?,
            avg_water_cut: row.try_get("avg_water_cut").map_err(column_err)?,
            avg_oil_gas_ratio: row.try_get("avg_oil_gas_ratio").map_err(column_err)?,
            earliest_date: row.try_get("earliest_date").map_err(column_err)?,
            latest_date: row.try_get("latest_date").map_err(column_err)?,
            active_records: row.try_get("active_records").map_err(column_err)?,
            shutdown_records: row.try_get("shutdown_records").map_err(column_err)?,
            maintenance_records: row.try_get("maintenance_records").map_err(column_err)?,
        })
    }

    /// Convert to [`Statistics`]; an empty table yields empty statistics
    pub fn into_statistics(self) -> Statistics {
        let (Some(earliest), Some(latest)) = (self.earliest_date, self.latest_date) else {
            return Statistics::empty();
        };
        if self.total_records <= 0 {
            return Statistics::empty();
        }

        let count = |n: i64| StatValue::Count(n.max(0) as u64);

        Statistics::from_entries([
            (stats::TOTAL_RECORDS, count(self.total_records)),
            (stats::UNIQUE_WELLS, count(self.unique_wells)),
            (stats::TOTAL_OIL_PRODUCTION, StatValue::Number(self.total_oil_production)),
            (stats::AVG_OIL_PRODUCTION, StatValue::Number(self.avg_oil_production)),
            (stats::AVG_GAS_PRODUCTION, StatValue::Number(self.avg_gas_production)),
            (stats::AVG_WATER_CUT, StatValue::Number(self.avg_water_cut)),
            (stats::AVG_OIL_GAS_RATIO, StatValue::Number(self.avg_oil_gas_ratio)),
            (stats::EARLIEST_DATE, StatValue::Date(earliest)),
            (stats::LATEST_DATE, StatValue::Date(latest)),
            (stats::ACTIVE_RECORDS, count(self.active_records)),
            (stats::SHUTDOWN_RECORDS, count(self.shutdown_records)),
            (stats::MAINTENANCE_RECORDS, count(self.maintenance_records)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::transform;
    use crate::domain::record::RawRecord;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_production_row_from_clean_record() {
        let raw = RawRecord::builder()
            .well_id("W-7")
            .production_date(date(2))
            .oil_production(300.0)
            .gas_production(600.0)
            .water_production(100.0)
            .wellhead_pressure(1100.0)
            .temperature(75.5)
            .status("Maintenance")
            .comments(Some("pump swap".to_string()))
            .build()
            .unwrap();
        let clean = transform(vec![raw]).records;

        let row = ProductionRow::from(&clean[0]);
        assert_eq!(row.well_id, "W-7");
        assert_eq!(row.production_date, date(2));
        assert_eq!(row.status, "Maintenance");
        assert_eq!(row.comments, Some("pump swap"));
        assert_eq!(row.oil_gas_ratio, 500.0);
        assert_eq!(row.water_cut, 25.0);
    }

    fn stats_row(total: i64) -> StatisticsRow {
        StatisticsRow {
            total_records: total,
            unique_wells: 2,
            total_oil_production: 900.0,
            avg_oil_production: 300.0,
            avg_gas_production: 10.0,
            avg_water_cut: 5.0,
            avg_oil_gas_ratio: 0.0,
            earliest_date: Some(date(1)),
            latest_date: Some(date(9)),
            active_records: 3,
            shutdown_records: 0,
            maintenance_records: 0,
        }
    }

    #[test]
    fn test_statistics_row_conversion() {
        let stats = stats_row(3).into_statistics();
        assert_eq!(stats.len(), 12);
        assert_eq!(stats.get(stats::TOTAL_RECORDS), Some(&StatValue::Count(3)));
        assert_eq!(stats.get(stats::LATEST_DATE), Some(&StatValue::Date(date(9))));
        assert_eq!(stats.get(stats::AVG_OIL_PRODUCTION), Some(&StatValue::Number(300.0)));
    }

    #[test]
    fn test_empty_table_gives_empty_statistics() {
        let mut row = stats_row(0);
        row.earliest_date = None;
        row.latest_date = None;
        assert!(row.into_statistics().is_empty());
    }

    #[test]
    fn test_statistics_sql_covers_every_key() {
        for key in [
            stats::TOTAL_RECORDS,
            stats::UNIQUE_WELLS,
            stats::TOTAL_OIL_PRODUCTION,
            stats::AVG_OIL_PRODUCTION,
            stats::AVG_GAS_PRODUCTION,
            stats::AVG_WATER_CUT,
            stats::AVG_OIL_GAS_RATIO,
            stats::EARLIEST_DATE,
            stats::LATEST_DATE,
            stats::ACTIVE_RECORDS,
            stats::SHUTDOWN_RECORDS,
            stats::MAINTENANCE_RECORDS,
        ] {
            assert!(STATISTICS_SQL.contains(&format!("AS {key}")), "missing {key}");
        }
    }
}
