//! Aggregators: pure transformations from filtered records to summary rows
//!
//! Every function here is deterministic and total over its input: malformed
//! records are excluded from the relevant grouping (per the rules on each
//! aggregator) instead of failing, and an empty result set is a valid
//! output. Nothing is cached; each call recomputes from the records given.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{AggregateRow, EvType, LatLon, VehicleRecord, YearCount};

/// Group records by a derived string key and count each group
///
/// Records for which `key_fn` returns None are excluded. Rows are ordered by
/// descending count; ties keep the order in which keys were first
/// encountered (the sort is stable over insertion order, deliberately not
/// alphabetical).
pub fn count_by_key<'a, F>(
    records: impl IntoIterator<Item = &'a VehicleRecord>,
    key_fn: F,
) -> Vec<AggregateRow>
where
    F: Fn(&VehicleRecord) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();

    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => rows[i].count += 1,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(AggregateRow { key, count: 1 });
            }
        }
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Count records per manufacturer
pub fn count_by_make<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> Vec<AggregateRow> {
    count_by_key(records, |r| Some(r.make.clone()))
}

/// Count records per county; records without a county are excluded
pub fn count_by_county<'a>(
    records: impl IntoIterator<Item = &'a VehicleRecord>,
) -> Vec<AggregateRow> {
    count_by_key(records, |r| r.county.clone())
}

/// Count records per vehicle type; records with an unknown type are excluded
pub fn count_by_ev_type<'a>(
    records: impl IntoIterator<Item = &'a VehicleRecord>,
) -> Vec<AggregateRow> {
    count_by_key(records, |r| r.ev_type.map(|t| t.short_label().to_string()))
}

/// First n rows of an already-ordered aggregate
pub fn top_n(rows: &[AggregateRow], n: usize) -> Vec<AggregateRow> {
    rows.iter().take(n).cloned().collect()
}

/// Count records per model year, ascending
///
/// Records without a numeric year are excluded. The series is sparse: years
/// with no matching record are omitted, not zero-filled. (The comparison
/// engine zero-fills; the two behaviors are distinct contracts.)
pub fn count_by_year<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        if let Some(year) = record.model_year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// A geographic concentration of registrations sharing (city, county)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoCluster {
    pub city: String,
    pub county: String,
    pub count: u64,
    /// Mean of member coordinates, the cluster's representative point
    pub center: LatLon,
    /// Manufacturer distribution within the cluster, count-descending
    pub makes: Vec<AggregateRow>,
    /// Vehicle-type distribution within the cluster, count-descending
    pub ev_types: Vec<AggregateRow>,
    /// Highest-count manufacturer; ties go to the first encountered
    pub dominant_make: String,
}

/// Cluster records by (city, county)
///
/// Records without a parsed location, city, or county are excluded.
/// Clusters are ordered by descending count, ties first-encountered.
pub fn geo_cluster<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> Vec<GeoCluster> {
    struct Accum<'a> {
        city: String,
        county: String,
        members: Vec<&'a VehicleRecord>,
        lat_sum: f64,
        lon_sum: f64,
    }

    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<Accum> = Vec::new();

    for record in records {
        let (Some(location), Some(city), Some(county)) =
            (record.location, record.city.as_ref(), record.county.as_ref())
        else {
            continue;
        };
        let key = (city.clone(), county.clone());
        let i = match index.get(&key) {
            Some(&i) => i,
            None => {
                index.insert(key, groups.len());
                groups.push(Accum {
                    city: city.clone(),
                    county: county.clone(),
                    members: Vec::new(),
                    lat_sum: 0.0,
                    lon_sum: 0.0,
                });
                groups.len() - 1
            }
        };
        groups[i].members.push(record);
        groups[i].lat_sum += location.lat;
        groups[i].lon_sum += location.lon;
    }

    let mut clusters: Vec<GeoCluster> = groups
        .into_iter()
        .map(|g| {
            let count = g.members.len() as u64;
            let makes = count_by_make(g.members.iter().copied());
            let ev_types = count_by_ev_type(g.members.iter().copied());
            let dominant_make = makes
                .first()
                .map(|row| row.key.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            GeoCluster {
                city: g.city,
                county: g.county,
                count,
                center: LatLon {
                    lat: g.lat_sum / count as f64,
                    lon: g.lon_sum / count as f64,
                },
                makes,
                ev_types,
                dominant_make,
            }
        })
        .collect();

    clusters.sort_by(|a, b| b.count.cmp(&a.count));
    clusters
}

/// The dashboard's headline numbers and chart feeds in one pass
///
/// This is the payload source for the comprehensive insight request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_vehicles: u64,
    pub bev_count: u64,
    pub phev_count: u64,
    /// Share of the filtered fleet, in percent; 0 when the fleet is empty
    pub bev_percent: f64,
    pub phev_percent: f64,
    pub top_makes: Vec<AggregateRow>,
    pub ev_types: Vec<AggregateRow>,
    pub top_counties: Vec<AggregateRow>,
    pub adoption_trend: Vec<YearCount>,
}

impl DashboardSummary {
    /// Compute from filtered records, keeping the top `limit` makes and
    /// counties
    pub fn compute<'a>(records: &[&'a VehicleRecord], limit: usize) -> Self {
        let total_vehicles = records.len() as u64;
        let bev_count = records
            .iter()
            .filter(|r| r.ev_type == Some(EvType::BatteryElectric))
            .count() as u64;
        let phev_count = records
            .iter()
            .filter(|r| r.ev_type == Some(EvType::PlugInHybrid))
            .count() as u64;

        let percent = |count: u64| {
            if total_vehicles == 0 {
                0.0
            } else {
                count as f64 / total_vehicles as f64 * 100.0
            }
        };

        Self {
            total_vehicles,
            bev_count,
            phev_count,
            bev_percent: percent(bev_count),
            phev_percent: percent(phev_count),
            top_makes: top_n(&count_by_make(records.iter().copied()), limit),
            ev_types: count_by_ev_type(records.iter().copied()),
            top_counties: top_n(&count_by_county(records.iter().copied()), limit),
            adoption_trend: count_by_year(records.iter().copied()),
        }
    }
}
