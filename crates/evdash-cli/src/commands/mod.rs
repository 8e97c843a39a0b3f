//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `report` - Terminal reports (summary, compare, clusters)
//! - `insight` - Natural-language insight generation
//! - `serve` - Web server command

pub mod insight;
pub mod report;
pub mod serve;

// Re-export command functions for main.rs
pub use insight::*;
pub use report::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};

use evdash_core::{Dataset, EvType, FilterSpec, YearRange};

/// Load a dataset file with a readable failure message
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = evdash_core::open_dataset(path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;
    if dataset.is_empty() {
        tracing::warn!(path = %path.display(), "Dataset loaded but contains no records");
    }
    Ok(dataset)
}

/// Build a filter spec from CLI flags
///
/// A partially-specified year range takes its missing bound from the years
/// observed in the dataset.
pub fn build_filter(
    dataset: &Dataset,
    make: Option<&str>,
    ev_type: Option<&str>,
    from: Option<i32>,
    to: Option<i32>,
) -> Result<FilterSpec> {
    let mut spec = FilterSpec::all();

    if let Some(make) = make {
        spec = spec.with_make(make);
    }
    if let Some(raw) = ev_type {
        let parsed: EvType = raw
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{} (expected BEV or PHEV)", e))?;
        spec = spec.with_ev_type(parsed);
    }
    if from.is_some() || to.is_some() {
        let (observed_min, observed_max) = dataset.year_bounds().unwrap_or((0, 0));
        let range = YearRange::new(from.unwrap_or(observed_min), to.unwrap_or(observed_max))?;
        spec = spec.with_year_range(range);
    }

    Ok(spec)
}
