//! Natural-language insight command

use std::path::Path;

use anyhow::{bail, Result};

use evdash_core::{
    build_prompt, compare_makes, filter_records, DashboardSummary, FilterSpec, InsightBackend,
    InsightClient, InsightRequest, YearRange,
};

use super::load_dataset;

/// Top-list size used when assembling insight payloads
const PAYLOAD_TOP_LIMIT: usize = 10;

pub async fn cmd_insight(
    file: &Path,
    kind: &str,
    make_a: Option<&str>,
    make_b: Option<&str>,
    from: i32,
    to: i32,
    context: Option<String>,
) -> Result<()> {
    let dataset = load_dataset(file)?;

    let request = match kind {
        "comparison" => {
            let (Some(make_a), Some(make_b)) = (make_a, make_b) else {
                bail!("--make-a and --make-b are required for comparison insights");
            };
            let range = YearRange::new(from, to)?;
            InsightRequest::comparison(&compare_makes(&dataset, make_a, make_b, range))
        }
        "comprehensive" => {
            let filtered = filter_records(&dataset, &FilterSpec::all());
            InsightRequest::comprehensive(&DashboardSummary::compute(&filtered, PAYLOAD_TOP_LIMIT))
        }
        "generic" => {
            let filtered = filter_records(&dataset, &FilterSpec::all());
            let summary = DashboardSummary::compute(&filtered, PAYLOAD_TOP_LIMIT);
            InsightRequest::generic(serde_json::to_value(&summary)?, context)
        }
        other => bail!(
            "Unknown insight kind: {} (expected comprehensive, comparison, or generic)",
            other
        ),
    };

    let prompt = build_prompt(&request)?;

    let client = InsightClient::from_env();
    println!(
        "🤖 Requesting {} insight from {} ({})",
        request.kind,
        client.host(),
        client.model()
    );

    match client.generate(&prompt).await {
        Ok(text) => {
            println!();
            println!("{}", text);
            Ok(())
        }
        Err(err) => {
            // The aggregates above stay valid; only the insight is lost
            println!();
            println!("⚠️  {}", err.fallback_message());
            Err(err.into())
        }
    }
}
