//! Dataset loading and the in-memory record store
//!
//! The registration dataset is loaded once, in full, at session start and
//! never mutated afterwards. Two encodings of the same data are supported:
//! the original comma-separated export and its csvjson conversion (an array
//! of objects keyed by the CSV headers).

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{EvType, LatLon, VehicleRecord};

/// Dataset column headers, as exported by the registration registry
const COL_MAKE: &str = "Make";
const COL_MODEL_YEAR: &str = "Model Year";
const COL_EV_TYPE: &str = "Electric Vehicle Type";
const COL_COUNTY: &str = "County";
const COL_CITY: &str = "City";
const COL_LOCATION: &str = "Vehicle Location";

/// The full decoded dataset
///
/// Holds records in source order and exposes read-only access; all derived
/// views are produced by the filter and aggregate modules.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<VehicleRecord>,
}

impl Dataset {
    /// Build a dataset from already-decoded records (used by tests)
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        Self { records }
    }

    /// Load a dataset file, dispatching on the file extension
    ///
    /// `.json` is decoded as csvjson; anything else is read as CSV.
    pub fn load(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_path(path)
        } else {
            Self::from_csv_path(path)
        }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Parse the original CSV export
    ///
    /// Fields are resolved by header name, not position; the export carries
    /// more columns than the dashboard uses. Individual fields degrade to
    /// their unknown/absent form rather than failing the load.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let col = |name: &str| headers.iter().position(|h| h == name);

        let make_col = col(COL_MAKE);
        let year_col = col(COL_MODEL_YEAR);
        let type_col = col(COL_EV_TYPE);
        let county_col = col(COL_COUNTY);
        let city_col = col(COL_CITY);
        let location_col = col(COL_LOCATION);

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let field = |idx: Option<usize>| idx.and_then(|i| record.get(i));

            records.push(VehicleRecord {
                make: normalize_make(field(make_col)),
                ev_type: field(type_col).and_then(EvType::parse_label),
                model_year: field(year_col).and_then(parse_year),
                county: non_empty(field(county_col)),
                city: non_empty(field(city_col)),
                location: field(location_col).and_then(parse_point),
            });
        }

        debug!(count = records.len(), "Loaded dataset from CSV");
        Ok(Self { records })
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    /// Parse the csvjson encoding: an array of objects keyed by the CSV
    /// headers. Numeric fields may arrive as JSON numbers or strings.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_slice(bytes)?;

        let str_field = |row: &serde_json::Map<String, Value>, key: &str| -> Option<String> {
            row.get(key).and_then(|v| match v {
                Value::String(s) => non_empty(Some(s.as_str())),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let year = match row.get(COL_MODEL_YEAR) {
                Some(Value::Number(n)) => n.as_i64().map(|y| y as i32),
                Some(Value::String(s)) => parse_year(s),
                _ => None,
            };

            records.push(VehicleRecord {
                make: normalize_make(str_field(row, COL_MAKE).as_deref()),
                ev_type: str_field(row, COL_EV_TYPE)
                    .as_deref()
                    .and_then(EvType::parse_label),
                model_year: year,
                county: str_field(row, COL_COUNTY),
                city: str_field(row, COL_CITY),
                location: str_field(row, COL_LOCATION)
                    .as_deref()
                    .and_then(parse_point),
            });
        }

        debug!(count = records.len(), "Loaded dataset from JSON");
        Ok(Self { records })
    }

    /// All records, in source order
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct manufacturer names, sorted (the comparison dropdown source)
    pub fn makes(&self) -> Vec<String> {
        let mut makes: Vec<String> = self.records.iter().map(|r| r.make.clone()).collect();
        makes.sort();
        makes.dedup();
        makes
    }

    /// Observed model-year bounds across the dataset, None when no record
    /// carries a year
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.model_year);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some((min, max))
    }
}

fn normalize_make(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "Unknown".to_string(),
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Parse the registry's WKT-style point encoding: `POINT (lon lat)`
///
/// Longitude comes first in the source. Returns None for anything that does
/// not match, including empty strings.
fn parse_point(raw: &str) -> Option<LatLon> {
    let s = raw.trim();
    let rest = s
        .strip_prefix("POINT")
        .or_else(|| s.strip_prefix("point"))?
        .trim();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;

    let mut parts = inner.split_whitespace();
    let lon: f64 = parts.next()?.parse().ok()?;
    let lat: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(LatLon { lat, lon })
}

/// Open an existing dataset, failing with a readable error when absent
pub fn open_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(Error::InvalidInput(format!(
            "Dataset file not found: {}",
            path.display()
        )));
    }
    Dataset::load(path)
}
