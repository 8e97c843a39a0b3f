//! Deterministic trend statistics over an adoption time series
//!
//! A local, non-generative companion to the insight feature: summarizes a
//! per-year series into the headline figures the dashboard quotes (peak
//! year, growth rate, growth consistency). Pure arithmetic over the series.

use serde::{Deserialize, Serialize};

use crate::models::YearCount;

/// Headline statistics for a per-year registration series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub first_year: i32,
    pub last_year: i32,
    /// Total registrations across the series
    pub total: u64,
    /// Year with the highest count; earliest such year on ties
    pub peak_year: i32,
    pub peak_count: u64,
    /// Year with the lowest count; earliest such year on ties
    pub lowest_year: i32,
    pub lowest_count: u64,
    /// Percent change from the first year's count to the last year's
    pub growth_rate_pct: f64,
    /// Share of year-over-year steps with positive growth, in percent;
    /// 0 when the series has a single point
    pub consistency_pct: f64,
}

impl TrendSummary {
    /// Summarize an ascending per-year series; None when empty
    pub fn from_series(series: &[YearCount]) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let peak = series
            .iter()
            .max_by(|a, b| a.count.cmp(&b.count).then(b.year.cmp(&a.year)))?;
        let lowest = series
            .iter()
            .min_by(|a, b| a.count.cmp(&b.count).then(a.year.cmp(&b.year)))?;

        let growth_rate_pct = if first.count == 0 {
            0.0
        } else {
            (last.count as f64 - first.count as f64) / first.count as f64 * 100.0
        };

        let steps = series.len().saturating_sub(1);
        let consistency_pct = if steps == 0 {
            0.0
        } else {
            let positive = series
                .windows(2)
                .filter(|pair| pair[1].count > pair[0].count)
                .count();
            positive as f64 / steps as f64 * 100.0
        };

        Some(Self {
            first_year: first.year,
            last_year: last.year,
            total: series.iter().map(|p| p.count).sum(),
            peak_year: peak.year,
            peak_count: peak.count,
            lowest_year: lowest.year,
            lowest_count: lowest.count,
            growth_rate_pct,
            consistency_pct,
        })
    }
}
