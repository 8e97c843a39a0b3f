//! CLI command tests
//!
//! These drive the command implementations against a temp dataset file,
//! the same way `main` does.

use std::io::Write;
use std::path::PathBuf;

use crate::commands;

const SAMPLE_CSV: &str = "\
County,City,State,Model Year,Make,Model,Electric Vehicle Type,Vehicle Location
King,Seattle,WA,2019,BMW,330E,Plug-in Hybrid Electric Vehicle (PHEV),POINT (-122.34 47.61)
King,Seattle,WA,2020,BMW,I3,Battery Electric Vehicle (BEV),POINT (-122.33 47.62)
King,Seattle,WA,2020,TESLA,MODEL 3,Battery Electric Vehicle (BEV),POINT (-122.35 47.60)
Pierce,Tacoma,WA,2021,TESLA,MODEL Y,Battery Electric Vehicle (BEV),POINT (-122.44 47.25)
";

fn write_sample_dataset() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ev.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    (dir, path)
}

#[test]
fn test_cmd_summary() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_summary(&path, None, None, None, None, 10);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_summary_with_filters() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_summary(&path, Some("TESLA"), Some("BEV"), Some(2020), None, 10);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_summary_rejects_unknown_ev_type() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_summary(&path, None, Some("FCEV"), None, None, 10);
    assert!(result.is_err());
}

#[test]
fn test_cmd_summary_missing_file() {
    let result = commands::cmd_summary(
        std::path::Path::new("/nonexistent/ev.csv"),
        None,
        None,
        None,
        None,
        10,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_compare() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_compare(&path, "BMW", "TESLA", 2019, 2021);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_compare_rejects_inverted_range() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_compare(&path, "BMW", "TESLA", 2021, 2019);
    assert!(result.is_err());
}

#[test]
fn test_cmd_clusters() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_clusters(&path, 5);
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_insight_requires_makes_for_comparison() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_insight(&path, "comparison", None, None, 2019, 2021, None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_insight_rejects_unknown_kind() {
    let (_dir, path) = write_sample_dataset();
    let result = commands::cmd_insight(&path, "horoscope", None, None, 2019, 2021, None).await;
    assert!(result.is_err());
}
