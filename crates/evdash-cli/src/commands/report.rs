//! Terminal report commands (summary, compare, clusters)

use std::path::Path;

use anyhow::Result;

use evdash_core::{
    compare_makes, filter_records, geo_cluster, DashboardSummary, TrendSummary, YearRange,
};

use super::{build_filter, load_dataset};

pub fn cmd_summary(
    file: &Path,
    make: Option<&str>,
    ev_type: Option<&str>,
    from: Option<i32>,
    to: Option<i32>,
    limit: usize,
) -> Result<()> {
    let dataset = load_dataset(file)?;
    let spec = build_filter(&dataset, make, ev_type, from, to)?;
    let filtered = filter_records(&dataset, &spec);
    let summary = DashboardSummary::compute(&filtered, limit);

    println!();
    println!("⚡ EV Registration Summary");
    println!("   ─────────────────────────────────────────────");
    println!("   Records: {} of {}", filtered.len(), dataset.len());
    println!("   Total Vehicles: {}", summary.total_vehicles);
    println!(
        "   Battery Electric (BEV):  {:>8}  ({:.1}% of fleet)",
        summary.bev_count, summary.bev_percent
    );
    println!(
        "   Plug-in Hybrid (PHEV):   {:>8}  ({:.1}% of fleet)",
        summary.phev_count, summary.phev_percent
    );

    if !summary.top_makes.is_empty() {
        println!();
        println!("🚗 Top Makes");
        for row in &summary.top_makes {
            println!("   {:<24} {:>8}", row.key, row.count);
        }
    }

    if !summary.top_counties.is_empty() {
        println!();
        println!("🗺️  Top Counties");
        for row in &summary.top_counties {
            println!("   {:<24} {:>8}", row.key, row.count);
        }
    }

    if !summary.adoption_trend.is_empty() {
        println!();
        println!("📈 Adoption by Model Year");
        for point in &summary.adoption_trend {
            println!("   {:<6} {:>8}", point.year, point.count);
        }

        if let Some(trend) = TrendSummary::from_series(&summary.adoption_trend) {
            println!();
            println!(
                "   Period {} - {}: peak {} ({} vehicles), growth {:+.1}%, {:.0}% of years grew",
                trend.first_year,
                trend.last_year,
                trend.peak_year,
                trend.peak_count,
                trend.growth_rate_pct,
                trend.consistency_pct
            );
        }
    }

    Ok(())
}

pub fn cmd_compare(file: &Path, make_a: &str, make_b: &str, from: i32, to: i32) -> Result<()> {
    let dataset = load_dataset(file)?;
    let range = YearRange::new(from, to)?;
    let report = compare_makes(&dataset, make_a, make_b, range);

    println!();
    println!("📊 Adoption Comparison: {} vs {}", make_a, make_b);
    println!("   Year Range: {}", report.year_range);
    println!();

    if report.series.is_empty() {
        println!("   No registrations for either make in this range.");
        return Ok(());
    }

    println!("   {:<6} {:>12} {:>12}", "Year", make_a, make_b);
    for row in &report.series {
        println!("   {:<6} {:>12} {:>12}", row.year, row.value_a, row.value_b);
    }
    println!("   {:<6} {:>12} {:>12}", "Total", report.total_a, report.total_b);

    if report.total_a == 0 {
        println!();
        println!("   ⚠️  No registrations for {} in this range", make_a);
    }
    if report.total_b == 0 {
        println!();
        println!("   ⚠️  No registrations for {} in this range", make_b);
    }

    Ok(())
}

pub fn cmd_clusters(file: &Path, limit: usize) -> Result<()> {
    let dataset = load_dataset(file)?;
    let clusters = geo_cluster(dataset.records().iter());

    println!();
    println!("🗺️  Geographic Concentration ({} clusters)", clusters.len());
    println!(
        "   {:<20} {:<14} {:>8}  {:<14} {}",
        "City", "County", "Count", "Top Make", "Center"
    );
    for cluster in clusters.iter().take(limit) {
        println!(
            "   {:<20} {:<14} {:>8}  {:<14} {:.4}, {:.4}",
            cluster.city,
            cluster.county,
            cluster.count,
            cluster.dominant_make,
            cluster.center.lat,
            cluster.center.lon
        );
    }
    if clusters.len() > limit {
        println!("   ... and {} more", clusters.len() - limit);
    }

    Ok(())
}
