//! Two-manufacturer comparison over a shared year axis
//!
//! Aligns two independent per-year series onto the union of their observed
//! years, zero-filling the side with no observation. This zero-fill policy
//! is specific to comparisons; the plain time series stays sparse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::count_by_year;
use crate::dataset::Dataset;
use crate::filter::{filter_records, FilterSpec};
use crate::models::{ComparisonRow, YearCount, YearRange};

/// Aligned adoption comparison between two manufacturers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub make_a: String,
    pub make_b: String,
    pub year_range: YearRange,
    /// One row per year observed for either make, strictly ascending,
    /// no duplicates
    pub series: Vec<ComparisonRow>,
    /// Registrations per make summed across the range
    pub total_a: u64,
    pub total_b: u64,
}

/// Compare two manufacturers' adoption within a year range
///
/// Each side is an independent per-year count restricted to the range; the
/// output covers the union of years observed in either series (not the full
/// configured range).
pub fn compare_makes(
    dataset: &Dataset,
    make_a: &str,
    make_b: &str,
    year_range: YearRange,
) -> ComparisonReport {
    let series_for = |make: &str| {
        let spec = FilterSpec::all()
            .with_make(make)
            .with_year_range(year_range);
        count_by_year(filter_records(dataset, &spec))
    };

    let series_a = series_for(make_a);
    let series_b = series_for(make_b);
    let series = align_series(&series_a, &series_b);

    ComparisonReport {
        make_a: make_a.to_string(),
        make_b: make_b.to_string(),
        year_range,
        total_a: series_a.iter().map(|p| p.count).sum(),
        total_b: series_b.iter().map(|p| p.count).sum(),
        series,
    }
}

/// Merge two sparse year series onto their union axis, zero-filling the
/// absent side
pub fn align_series(series_a: &[YearCount], series_b: &[YearCount]) -> Vec<ComparisonRow> {
    let mut merged: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for point in series_a {
        merged.entry(point.year).or_insert((0, 0)).0 = point.count;
    }
    for point in series_b {
        merged.entry(point.year).or_insert((0, 0)).1 = point.count;
    }
    merged
        .into_iter()
        .map(|(year, (value_a, value_b))| ComparisonRow {
            year,
            value_a,
            value_b,
        })
        .collect()
}
