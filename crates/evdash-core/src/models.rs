//! Domain models for evdash

use serde::{Deserialize, Serialize};

/// Electric vehicle drivetrain type
///
/// The source dataset uses long-form labels ("Battery Electric Vehicle
/// (BEV)"). Records with any other label are treated as unknown and are
/// excluded from type-keyed aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvType {
    /// Battery Electric Vehicle (BEV)
    BatteryElectric,
    /// Plug-in Hybrid Electric Vehicle (PHEV)
    PlugInHybrid,
}

impl EvType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BatteryElectric => "battery_electric",
            Self::PlugInHybrid => "plug_in_hybrid",
        }
    }

    /// Long-form label as it appears in the source dataset
    pub fn label(&self) -> &'static str {
        match self {
            Self::BatteryElectric => "Battery Electric Vehicle (BEV)",
            Self::PlugInHybrid => "Plug-in Hybrid Electric Vehicle (PHEV)",
        }
    }

    /// Short label used in charts and prompts
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::BatteryElectric => "BEV",
            Self::PlugInHybrid => "PHEV",
        }
    }

    /// Parse a dataset label. Accepts the long form, the abbreviation, and
    /// the snake_case form; returns None for anything else.
    pub fn parse_label(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s {
            "Battery Electric Vehicle (BEV)" | "BEV" | "battery_electric" => {
                Some(Self::BatteryElectric)
            }
            "Plug-in Hybrid Electric Vehicle (PHEV)" | "PHEV" | "plug_in_hybrid" => {
                Some(Self::PlugInHybrid)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for EvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_label())
    }
}

impl std::str::FromStr for EvType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("Unknown EV type: {}", s))
    }
}

/// A geographic point parsed from the dataset's `POINT (lon lat)` encoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// One registered vehicle
///
/// Immutable once loaded. Optional fields reflect the source data, where
/// columns may be absent or unparsable; each aggregator documents which
/// records it excludes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Manufacturer name, "Unknown" when the source field is absent/empty
    pub make: String,
    pub ev_type: Option<EvType>,
    pub model_year: Option<i32>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub location: Option<LatLon>,
}

/// Inclusive model-year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Create a range, enforcing min <= max.
    pub fn new(min: i32, max: i32) -> crate::error::Result<Self> {
        if min > max {
            return Err(crate::error::Error::InvalidInput(format!(
                "Invalid year range: {} > {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// One group in a keyed count aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub count: u64,
}

/// One point in a model-year time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// One aligned point in a two-make comparison series
///
/// Serialized field names match the insight wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub year: i32,
    #[serde(rename = "valueA")]
    pub value_a: u64,
    #[serde(rename = "valueB")]
    pub value_b: u64,
}
