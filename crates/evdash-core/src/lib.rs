//! evdash Core Library
//!
//! Shared functionality for the evdash EV analytics dashboard:
//! - Dataset loading (registration CSV and its csvjson conversion) into an
//!   immutable in-memory record store
//! - Composable filter predicates (make, vehicle type, model-year range)
//! - Pure aggregators: keyed counts, top-N, per-year series, geographic
//!   clusters, dashboard summary
//! - Two-manufacturer comparison on a shared, zero-filled year axis
//! - Deterministic trend statistics
//! - Insight prompt assembly with per-kind payload validation
//! - Pluggable generation backends (Gemini, mock) behind one async trait
//! - Request-identity tracking so superseded insight responses are
//!   discarded

pub mod aggregate;
pub mod ai;
pub mod compare;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod models;
pub mod prompt;
pub mod session;
pub mod trend;

pub use aggregate::{
    count_by_county, count_by_ev_type, count_by_key, count_by_make, count_by_year, geo_cluster,
    top_n, DashboardSummary, GeoCluster,
};
pub use ai::{GeminiBackend, InsightBackend, InsightClient, MockBackend};
pub use compare::{align_series, compare_makes, ComparisonReport};
pub use dataset::{open_dataset, Dataset};
pub use error::{Error, Result};
pub use filter::{filter_records, FilterSpec};
pub use models::{AggregateRow, ComparisonRow, EvType, LatLon, VehicleRecord, YearCount, YearRange};
pub use prompt::{build_prompt, InsightKind, InsightRequest};
pub use session::{InsightTracker, RequestToken};
pub use trend::TrendSummary;
