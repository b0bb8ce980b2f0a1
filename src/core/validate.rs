//! Record validity predicate
//!
//! A single pure check shared by the extract and transform stages.

use crate::domain::record::RawRecord;
use chrono::{Datelike, NaiveDate};

/// Lowest plausible temperature reading, inclusive
pub const MIN_TEMPERATURE: f64 = -50.0;

/// Highest plausible temperature reading, inclusive
pub const MAX_TEMPERATURE: f64 = 200.0;

/// Returns true if the record is well-formed and within domain bounds
///
/// A record is valid when the well id and status are non-blank, the
/// production date is set, all volumes and the wellhead pressure are
/// non-negative, and the temperature lies in
/// [`MIN_TEMPERATURE`]..=[`MAX_TEMPERATURE`]. NaN fails every bound.
/// Clean records can be re-checked through their reading.
///
/// # Examples
///
/// ```
/// use derrick::core::validate::is_valid;
/// use derrick::domain::RawRecord;
/// use chrono::NaiveDate;
///
/// let record = RawRecord::builder()
///     .well_id("WELL-001")
///     .production_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .temperature(85.0)
///     .build()
///     .unwrap();
/// assert!(is_valid(&record));
/// ```
pub fn is_valid<R: AsRef<RawRecord> + ?Sized>(record: &R) -> bool {
    let record = record.as_ref();
    !record.well_id.trim().is_empty()
        && is_set(record.production_date)
        && record.oil_production >= 0.0
        && record.gas_production >= 0.0
        && record.water_production >= 0.0
        && record.wellhead_pressure >= 0.0
        && (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&record.temperature)
        && !record.status.trim().is_empty()
}

/// 0001-01-01 and anything before it is treated as an unset date
fn is_set(date: NaiveDate) -> bool {
    date.year() > 1 || (date.year() == 1 && date.ordinal() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn valid() -> RawRecord {
        RawRecord::builder()
            .well_id("WELL-001")
            .production_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            .oil_production(500.0)
            .gas_production(2000.0)
            .water_production(100.0)
            .wellhead_pressure(1200.0)
            .temperature(80.0)
            .status("Active")
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_record() {
        assert!(is_valid(&valid()));
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t\n" ; "other whitespace")]
    fn test_blank_well_id_is_invalid(well_id: &str) {
        let mut record = valid();
        record.well_id = well_id.to_string();
        assert!(!is_valid(&record));
    }

    #[test_case(|r: &mut RawRecord| r.oil_production = -1.0 ; "negative oil")]
    #[test_case(|r: &mut RawRecord| r.gas_production = -0.5 ; "negative gas")]
    #[test_case(|r: &mut RawRecord| r.water_production = -3.0 ; "negative water")]
    #[test_case(|r: &mut RawRecord| r.wellhead_pressure = -10.0 ; "negative pressure")]
    #[test_case(|r: &mut RawRecord| r.temperature = -50.1 ; "too cold")]
    #[test_case(|r: &mut RawRecord| r.temperature = 200.1 ; "too hot")]
    #[test_case(|r: &mut RawRecord| r.temperature = f64::NAN ; "nan temperature")]
    #[test_case(|r: &mut RawRecord| r.oil_production = f64::NAN ; "nan oil")]
    #[test_case(|r: &mut RawRecord| r.status = " ".to_string() ; "blank status")]
    #[test_case(|r: &mut RawRecord| r.production_date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap() ; "unset date")]
    fn test_invalid_field(mutate: fn(&mut RawRecord)) {
        let mut record = valid();
        mutate(&mut record);
        assert!(!is_valid(&record));
    }

    #[test_case(-50.0 ; "lower bound")]
    #[test_case(200.0 ; "upper bound")]
    #[test_case(0.0 ; "zero")]
    fn test_temperature_bounds_inclusive(temperature: f64) {
        let mut record = valid();
        record.temperature = temperature;
        assert!(is_valid(&record));
    }

    #[test]
    fn test_zero_volumes_are_valid() {
        let mut record = valid();
        record.oil_production = 0.0;
        record.gas_production = 0.0;
        record.water_production = 0.0;
        record.wellhead_pressure = 0.0;
        assert!(is_valid(&record));
    }

    #[test]
    fn test_clean_records_can_be_checked() {
        let clean = crate::core::transform::transform(vec![valid()]).records;
        assert!(is_valid(&clean[0]));
    }

    #[test]
    fn test_second_day_of_year_one_is_set() {
        assert!(is_set(NaiveDate::from_ymd_opt(1, 1, 2).unwrap()));
        assert!(!is_set(NaiveDate::from_ymd_opt(1, 1, 1).unwrap()));
        assert!(!is_set(NaiveDate::from_ymd_opt(0, 6, 1).unwrap()));
    }
}
