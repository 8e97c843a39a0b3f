//! Composable filter predicates over vehicle records
//!
//! Each dimension is independent and the composition is a logical AND.
//! Filtering is a pure function of (record, spec); derived views are
//! recomputed from the store on every selection change rather than cached.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::models::{EvType, VehicleRecord, YearRange};

/// Active dimension constraints applied before aggregation
///
/// `None` on a dimension means "All": the predicate is always true for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Manufacturer, compared case-sensitively against the record's make
    pub make: Option<String>,
    pub ev_type: Option<EvType>,
    pub year_range: Option<YearRange>,
}

impl FilterSpec {
    /// The all-pass filter
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    pub fn with_ev_type(mut self, ev_type: EvType) -> Self {
        self.ev_type = Some(ev_type);
        self
    }

    pub fn with_year_range(mut self, range: YearRange) -> Self {
        self.year_range = Some(range);
        self
    }

    /// Whether a record passes every active dimension
    ///
    /// A record without a numeric model year never matches a year-range
    /// constraint; it is dropped, not defaulted.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        if let Some(ref make) = self.make {
            if record.make != *make {
                return false;
            }
        }
        if let Some(ev_type) = self.ev_type {
            if record.ev_type != Some(ev_type) {
                return false;
            }
        }
        if let Some(range) = self.year_range {
            match record.model_year {
                Some(year) if range.contains(year) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Borrowing view of the records matching a spec, in store order
pub fn filter_records<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> Vec<&'a VehicleRecord> {
    dataset.records().iter().filter(|r| spec.matches(r)).collect()
}
