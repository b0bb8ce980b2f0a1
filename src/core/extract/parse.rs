//! Header-tolerant CSV parsing and per-row coercion
//!
//! A file is read with a flexible reader: header names are matched
//! case-insensitively, unknown columns are ignored and short rows are
//! accepted. Problems with individual rows become [`RowError`] values; only
//! a file that cannot be opened or whose header cannot be read produces a
//! [`FileError`].

use crate::core::validate::is_valid;
use crate::domain::errors::{FileError, RowError};
use crate::domain::record::{RawRecord, RawRecordBuilder};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

pub const WELL_ID: &str = "WellId";
pub const PRODUCTION_DATE: &str = "ProductionDate";
pub const OIL_PRODUCTION: &str = "OilProduction";
pub const GAS_PRODUCTION: &str = "GasProduction";
pub const WATER_PRODUCTION: &str = "WaterProduction";
pub const WELLHEAD_PRESSURE: &str = "WellheadPressure";
pub const TEMPERATURE: &str = "Temperature";
pub const STATUS: &str = "Status";
pub const COMMENTS: &str = "Comments";

/// Canonical header row, in the order written by `init` samples and tests
pub const HEADERS: [&str; 9] = [
    WELL_ID,
    PRODUCTION_DATE,
    OIL_PRODUCTION,
    GAS_PRODUCTION,
    WATER_PRODUCTION,
    WELLHEAD_PRESSURE,
    TEMPERATURE,
    STATUS,
    COMMENTS,
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Rows read from one structurally sound file
#[derive(Debug, Default)]
pub struct ParsedFile {
    /// Valid records, in file order
    pub records: Vec<RawRecord>,

    /// Rows that were skipped, in file order
    pub row_errors: Vec<RowError>,
}

/// Column positions resolved from a header row
#[derive(Debug, Default, Clone, PartialEq)]
struct ColumnIndex {
    well_id: Option<usize>,
    production_date: Option<usize>,
    oil_production: Option<usize>,
    gas_production: Option<usize>,
    water_production: Option<usize>,
    wellhead_pressure: Option<usize>,
    temperature: Option<usize>,
    status: Option<usize>,
    comments: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut index = Self::default();
        for (position, name) in headers.iter().enumerate() {
            let slot = match normalize_header(name).as_str() {
                "wellid" => &mut index.well_id,
                "productiondate" => &mut index.production_date,
                "oilproduction" => &mut index.oil_production,
                "gasproduction" => &mut index.gas_production,
                "waterproduction" => &mut index.water_production,
                "wellheadpressure" => &mut index.wellhead_pressure,
                "temperature" => &mut index.temperature,
                "status" => &mut index.status,
                "comments" => &mut index.comments,
                _ => continue,
            };
            // First occurrence wins for duplicated headers
            slot.get_or_insert(position);
        }
        index
    }
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}')
        .trim()
        .to_ascii_lowercase()
}

/// Parses the file at `path`
///
/// # Errors
///
/// Returns a [`FileError`] if the file cannot be opened, its header row
/// cannot be read, or the underlying reader fails with an I/O error part way
/// through ([`FileError::Read`]). Bad rows are reported in
/// [`ParsedFile::row_errors`] instead.
pub fn parse_file(path: &Path) -> Result<ParsedFile, FileError> {
    let file = std::fs::File::open(path).map_err(|e| FileError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_reader(file, &path.display().to_string())
}

/// Parses CSV data from any reader; `source` names it in errors
pub fn parse_reader<R: Read>(reader: R, source: &str) -> Result<ParsedFile, FileError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| FileError::Header {
        path: source.to_string(),
        message: e.to_string(),
    })?;
    let columns = ColumnIndex::from_headers(headers);

    let mut parsed = ParsedFile::default();
    let mut fallback_line = 1;

    for row in reader.records() {
        fallback_line += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(FileError::Read {
                        path: source.to_string(),
                        message: e.to_string(),
                    });
                }
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                parsed.row_errors.push(RowError::Unreadable {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

        // Blank lines are not rows
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        match coerce_row(&row, &columns, line) {
            Ok(record) if is_valid(&record) => parsed.records.push(record),
            Ok(record) => parsed.row_errors.push(RowError::Rejected {
                line,
                well_id: record.well_id,
            }),
            Err(e) => parsed.row_errors.push(e),
        }
    }

    Ok(parsed)
}

fn cell<'r>(row: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
    column
        .and_then(|i| row.get(i))
        .filter(|value| !value.is_empty())
}

fn coerce_row(row: &StringRecord, columns: &ColumnIndex, line: u64) -> Result<RawRecord, RowError> {
    if columns.well_id.is_none() {
        return Err(RowError::MissingField {
            line,
            field: WELL_ID,
        });
    }
    let well_id = cell(row, columns.well_id).unwrap_or_default();

    let date_value = cell(row, columns.production_date).ok_or(RowError::MissingField {
        line,
        field: PRODUCTION_DATE,
    })?;
    let production_date = parse_date(date_value).ok_or_else(|| RowError::InvalidValue {
        line,
        field: PRODUCTION_DATE,
        value: date_value.to_string(),
    })?;

    let number = |column: Option<usize>, field: &'static str| -> Result<f64, RowError> {
        match cell(row, column) {
            None => Ok(0.0),
            Some(value) => parse_number(value).ok_or_else(|| RowError::InvalidValue {
                line,
                field,
                value: value.to_string(),
            }),
        }
    };

    let mut builder = RawRecordBuilder::new()
        .well_id(well_id)
        .production_date(production_date)
        .oil_production(number(columns.oil_production, OIL_PRODUCTION)?)
        .gas_production(number(columns.gas_production, GAS_PRODUCTION)?)
        .water_production(number(columns.water_production, WATER_PRODUCTION)?)
        .wellhead_pressure(number(columns.wellhead_pressure, WELLHEAD_PRESSURE)?)
        .temperature(number(columns.temperature, TEMPERATURE)?)
        .comments(cell(row, columns.comments).map(str::to_string));

    if let Some(status) = cell(row, columns.status) {
        builder = builder.status(status);
    }

    builder.build().map_err(|message| RowError::Unreadable { line, message })
}

/// Parses a production date in one of the accepted layouts
///
/// Plain dates (`2024-03-01`, `2024/03/01`, `03/01/2024`) and datetimes
/// (RFC 3339 or naive ISO) are accepted; the time part is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a finite number; NaN and infinities are rejected
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> ParsedFile {
        parse_reader(csv.as_bytes(), "test.csv").unwrap()
    }

    #[test]
    fn test_parse_full_header() {
        let parsed = parse(
            "WellId,ProductionDate,OilProduction,GasProduction,WaterProduction,WellheadPressure,Temperature,Status,Comments\n\
             W-1,2024-01-01,500,2000,100,1200,80,Active,first\n\
             W-2,2024-01-01,0,0,0,0,20,Shutdown,\n",
        );

        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.row_errors.is_empty());
        let first = &parsed.records[0];
        assert_eq!(first.well_id, "W-1");
        assert_eq!(first.oil_production, 500.0);
        assert_eq!(first.comments.as_deref(), Some("first"));
        assert_eq!(parsed.records[1].status, "Shutdown");
        assert!(parsed.records[1].comments.is_none());
    }

    #[test]
    fn test_header_case_and_order_insensitive() {
        let parsed = parse(
            " status , WELLID,productiondate,Extra\n\
             Maintenance,W-9,2024-05-05,ignored\n",
        );

        assert_eq!(parsed.records.len(), 1);
        let record = &parsed.records[0];
        assert_eq!(record.well_id, "W-9");
        assert_eq!(record.status, "Maintenance");
        assert_eq!(record.gas_production, 0.0);
        assert_eq!(record.temperature, 0.0);
    }

    #[test]
    fn test_missing_status_defaults_to_active() {
        let parsed = parse("WellId,ProductionDate,Status\nW-1,2024-01-01,\n");
        assert_eq!(parsed.records[0].status, "Active");
    }

    #[test]
    fn test_bad_number_skips_row_only() {
        let parsed = parse(
            "WellId,ProductionDate,OilProduction\n\
             W-1,2024-01-01,abc\n\
             W-2,2024-01-02,10\n",
        );

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].well_id, "W-2");
        assert_eq!(
            parsed.row_errors,
            vec![RowError::InvalidValue {
                line: 2,
                field: OIL_PRODUCTION,
                value: "abc".to_string()
            }]
        );
    }

    #[test]
    fn test_non_finite_number_is_invalid() {
        let parsed = parse("WellId,ProductionDate,OilProduction\nW-1,2024-01-01,NaN\n");
        assert!(parsed.records.is_empty());
        assert!(matches!(parsed.row_errors[0], RowError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        let parsed = parse(
            "WellId,ProductionDate,OilProduction,Temperature\n\
             W-1,2024-01-01,-5,20\n\
             ,2024-01-01,5,20\n\
             W-3,2024-01-01,5,999\n",
        );

        assert!(parsed.records.is_empty());
        assert_eq!(parsed.row_errors.len(), 3);
        assert!(parsed
            .row_errors
            .iter()
            .all(|e| matches!(e, RowError::Rejected { .. })));
    }

    #[test]
    fn test_missing_well_id_column() {
        let parsed = parse("ProductionDate,OilProduction\n2024-01-01,5\n2024-01-02,6\n");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.row_errors.len(), 2);
        assert!(matches!(
            parsed.row_errors[0],
            RowError::MissingField { field: WELL_ID, .. }
        ));
    }

    #[test]
    fn test_short_row_is_tolerated() {
        let parsed = parse(
            "WellId,ProductionDate,OilProduction,GasProduction\n\
             W-1,2024-01-01\n",
        );
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].oil_production, 0.0);
    }

    #[test]
    fn test_missing_date_skips_row() {
        let parsed = parse("WellId,ProductionDate\nW-1,\n");
        assert!(matches!(
            parsed.row_errors[0],
            RowError::MissingField {
                field: PRODUCTION_DATE,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input_is_structurally_fine() {
        let parsed = parse("");
        assert!(parsed.records.is_empty());
        assert!(parsed.row_errors.is_empty());
    }

    #[test]
    fn test_invalid_utf8_header_is_file_error() {
        let bytes: &[u8] = b"Well\xffId,ProductionDate\nW-1,2024-01-01\n";
        let result = parse_reader(bytes, "bad.csv");
        assert!(matches!(result, Err(FileError::Header { .. })));
    }

    /// Yields its data once, then fails every later read
    struct CutOffReader {
        data: Option<Vec<u8>>,
    }

    impl Read for CutOffReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok(data.len())
                }
                None => Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "share went away",
                )),
            }
        }
    }

    #[test]
    fn test_io_error_after_header_is_read_error() {
        let reader = CutOffReader {
            data: Some(b"WellId,ProductionDate
W-1,2024-01-01
".to_vec()),
        };
        let result = parse_reader(reader, "cut.csv");
        match result {
            Err(FileError::Read { path, message }) => {
                assert_eq!(path, "cut.csv");
                assert!(message.contains("share went away"));
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_row_is_row_error() {
        let bytes: &[u8] = b"WellId,ProductionDate\nW\xff1,2024-01-01\nW-2,2024-01-02\n";
        let parsed = parse_reader(bytes, "rows.csv").unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(matches!(parsed.row_errors[0], RowError::Unreadable { .. }));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_date("2024-03-07"), Some(expected));
        assert_eq!(parse_date("2024/03/07"), Some(expected));
        assert_eq!(parse_date("03/07/2024"), Some(expected));
        assert_eq!(parse_date("2024-03-07T10:15:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-07 10:15:00"), Some(expected));
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1,000"), None);
    }
}
