//! Well production record models
//!
//! This module defines the two record shapes that flow through the pipeline:
//! [`RawRecord`] as parsed from an input file, and [`CleanRecord`] as produced
//! by the transformer with its derived metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status assigned when an input row has no status cell
pub const DEFAULT_STATUS: &str = "Active";

/// A single daily production reading for one well, as parsed from input
///
/// # Examples
///
/// ```
/// use derrick::domain::record::RawRecordBuilder;
/// use chrono::NaiveDate;
///
/// let record = RawRecordBuilder::new()
///     .well_id("WELL-001")
///     .production_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .oil_production(500.0)
///     .gas_production(2000.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(record.status, "Active");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Well identifier
    pub well_id: String,

    /// Day the volumes were produced
    pub production_date: NaiveDate,

    /// Oil volume (barrels)
    pub oil_production: f64,

    /// Gas volume (cubic feet)
    pub gas_production: f64,

    /// Water volume (barrels)
    pub water_production: f64,

    /// Wellhead pressure (psi)
    pub wellhead_pressure: f64,

    /// Temperature (degrees)
    pub temperature: f64,

    /// Operational status, e.g. "Active", "Shutdown", "Maintenance"
    pub status: String,

    /// Free-text comment
    pub comments: Option<String>,
}

impl RawRecord {
    /// Creates a new builder for constructing a RawRecord
    pub fn builder() -> RawRecordBuilder {
        RawRecordBuilder::default()
    }
}

/// Builder for constructing RawRecord instances
#[derive(Debug, Default)]
pub struct RawRecordBuilder {
    well_id: Option<String>,
    production_date: Option<NaiveDate>,
    oil_production: f64,
    gas_production: f64,
    water_production: f64,
    wellhead_pressure: f64,
    temperature: f64,
    status: Option<String>,
    comments: Option<String>,
}

impl RawRecordBuilder {
    /// Creates a new RawRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the well identifier
    pub fn well_id(mut self, well_id: impl Into<String>) -> Self {
        self.well_id = Some(well_id.into());
        self
    }

    /// Sets the production date
    pub fn production_date(mut self, date: NaiveDate) -> Self {
        self.production_date = Some(date);
        self
    }

    pub fn oil_production(mut self, volume: f64) -> Self {
        self.oil_production = volume;
        self
    }

    pub fn gas_production(mut self, volume: f64) -> Self {
        self.gas_production = volume;
        self
    }

    pub fn water_production(mut self, volume: f64) -> Self {
        self.water_production = volume;
        self
    }

    pub fn wellhead_pressure(mut self, pressure: f64) -> Self {
        self.wellhead_pressure = pressure;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the status; a blank status falls back to [`DEFAULT_STATUS`] on build
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn comments(mut self, comments: Option<String>) -> Self {
        self.comments = comments;
        self
    }

    /// Builds the RawRecord
    ///
    /// # Errors
    ///
    /// Returns an error if the well identifier or production date was never set.
    /// An empty well identifier is accepted here; the validator rejects it.
    pub fn build(self) -> Result<RawRecord, String> {
        let well_id = self.well_id.ok_or("well_id is required")?;
        let production_date = self.production_date.ok_or("production_date is required")?;

        let status = match self.status {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => DEFAULT_STATUS.to_string(),
        };

        let comments = self
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(RawRecord {
            well_id: well_id.trim().to_string(),
            production_date,
            oil_production: self.oil_production,
            gas_production: self.gas_production,
            water_production: self.water_production,
            wellhead_pressure: self.wellhead_pressure,
            temperature: self.temperature,
            status,
            comments,
        })
    }
}

/// A validated, normalized production reading with derived metrics
///
/// Only the transformer creates these, so every CleanRecord satisfies
/// [`crate::core::validate::is_valid`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    #[serde(flatten)]
    reading: RawRecord,
    oil_gas_ratio: f64,
    water_cut: f64,
}

impl CleanRecord {
    pub(crate) fn from_valid(reading: RawRecord) -> Self {
        let oil_gas_ratio = oil_gas_ratio(reading.oil_production, reading.gas_production);
        let water_cut = water_cut(reading.oil_production, reading.water_production);
        Self {
            reading,
            oil_gas_ratio,
            water_cut,
        }
    }

    /// The underlying normalized reading
    pub fn reading(&self) -> &RawRecord {
        &self.reading
    }

    pub fn well_id(&self) -> &str {
        &self.reading.well_id
    }

    pub fn production_date(&self) -> NaiveDate {
        self.reading.production_date
    }

    /// Barrels of oil per thousand cubic feet of gas
    pub fn oil_gas_ratio(&self) -> f64 {
        self.oil_gas_ratio
    }

    /// Water as a percentage of total liquid (oil + water)
    pub fn water_cut(&self) -> f64 {
        self.water_cut
    }

    /// Consumes the record, returning the reading
    pub fn into_reading(self) -> RawRecord {
        self.reading
    }
}

impl AsRef<RawRecord> for RawRecord {
    fn as_ref(&self) -> &RawRecord {
        self
    }
}

impl AsRef<RawRecord> for CleanRecord {
    fn as_ref(&self) -> &RawRecord {
        &self.reading
    }
}

/// Oil per thousand cubic feet of gas, 0 when no gas was produced
pub fn oil_gas_ratio(oil: f64, gas: f64) -> f64 {
    if gas > 0.0 {
        oil / (gas / 1000.0)
    } else {
        0.0
    }
}

/// Water percentage of total liquid, 0 when no liquid was produced
pub fn water_cut(oil: f64, water: f64) -> f64 {
    let liquid = oil + water;
    if liquid > 0.0 {
        water / liquid * 100.0
    } else {
        0.0
    }
}
