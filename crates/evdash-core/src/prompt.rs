//! Insight request assembly
//!
//! Turns a chosen aggregate into a bounded natural-language prompt for the
//! generation service. Each request kind has a fixed textual skeleton;
//! required fields are validated here, before anything touches the network.
//! Construction is pure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::DashboardSummary;
use crate::compare::ComparisonReport;
use crate::error::{Error, Result};
use crate::models::{AggregateRow, ComparisonRow, YearCount, YearRange};

/// Comparison series points kept in a prompt; the full series is never
/// required for useful output
pub const MAX_SERIES_POINTS: usize = 24;

/// Entries kept from each top list (makes, counties)
pub const TOP_LIST_LIMIT: usize = 5;

/// Trailing adoption-trend years kept in a comprehensive prompt
pub const TREND_WINDOW_YEARS: usize = 5;

/// The three prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Comparison,
    Comprehensive,
    Generic,
}

impl InsightKind {
    /// Wire name carried in `filters.requestType`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comparison => "comparison_insights",
            Self::Comprehensive => "comprehensive_insights",
            Self::Generic => "generic_insights",
        }
    }

    /// Map a wire request type; anything unrecognized gets the generic
    /// template
    pub fn from_request_type(s: Option<&str>) -> Self {
        match s {
            Some("comparison_insights") => Self::Comparison,
            Some("comprehensive_insights") => Self::Comprehensive,
            _ => Self::Generic,
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An insight request: a template selector plus the aggregate payload it
/// draws from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRequest {
    pub kind: InsightKind,
    /// Aggregate-shaped data, as sent over the wire
    pub data: Value,
    /// Free-text context note, used by the generic template
    pub context: Option<String>,
}

impl InsightRequest {
    /// Comparison request from an already-computed report
    pub fn comparison(report: &ComparisonReport) -> Self {
        let data = serde_json::json!({
            "make1": report.make_a,
            "make2": report.make_b,
            "make1Total": report.total_a,
            "make2Total": report.total_b,
            "yearRange": report.year_range,
            "chartData": report.series,
        });
        Self {
            kind: InsightKind::Comparison,
            data,
            context: None,
        }
    }

    /// Comprehensive request from the dashboard summary
    pub fn comprehensive(summary: &DashboardSummary) -> Self {
        let data = serde_json::json!({
            "totalVehicles": summary.total_vehicles,
            "topMakes": summary.top_makes,
            "evTypes": summary.ev_types,
            "topCounties": summary.top_counties,
            "adoptionTrend": summary.adoption_trend,
        });
        Self {
            kind: InsightKind::Comprehensive,
            data,
            context: None,
        }
    }

    /// Generic request around arbitrary aggregate data
    pub fn generic(data: Value, context: Option<String>) -> Self {
        Self {
            kind: InsightKind::Generic,
            data,
            context,
        }
    }
}

/// Required fields of a comparison payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonPayload {
    make1: String,
    make2: String,
    make1_total: u64,
    make2_total: u64,
    year_range: YearRange,
    chart_data: Vec<ComparisonRow>,
}

/// Required fields of a comprehensive payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComprehensivePayload {
    total_vehicles: u64,
    top_makes: Vec<AggregateRow>,
    ev_types: Vec<AggregateRow>,
    top_counties: Vec<AggregateRow>,
    adoption_trend: Vec<YearCount>,
}

const ANALYST_PERSONA: &str =
    "You are an expert data analyst specializing in electric vehicle (EV) market trends.";

/// Build the prompt for a request
///
/// Fails with `InvalidPayload` when the payload is absent or missing the
/// fields the selected template requires; the caller must not reach the
/// proxy in that case.
pub fn build_prompt(request: &InsightRequest) -> Result<String> {
    if request.data.is_null() {
        return Err(Error::InvalidPayload("no aggregate data supplied".into()));
    }
    match request.kind {
        InsightKind::Comparison => build_comparison(&request.data),
        InsightKind::Comprehensive => build_comprehensive(&request.data),
        InsightKind::Generic => build_generic(&request.data, request.context.as_deref()),
    }
}

fn build_comparison(data: &Value) -> Result<String> {
    let payload: ComparisonPayload = serde_json::from_value(data.clone())
        .map_err(|e| Error::InvalidPayload(format!("comparison payload: {}", e)))?;

    let points: Vec<&ComparisonRow> = payload.chart_data.iter().take(MAX_SERIES_POINTS).collect();
    let series = serde_json::to_string(&points)?;

    Ok(format!(
        "{persona}\n\n\
         **Analysis Request:** Compare EV adoption trends between {make1} and {make2}\n\n\
         **Data Summary:**\n\
         - Make 1: {make1} (Total Vehicles: {total1})\n\
         - Make 2: {make2} (Total Vehicles: {total2})\n\
         - Year Range: {min} - {max}\n\
         - Comparison Data Points: {series}\n\n\
         **Please provide:**\n\
         1. A clear comparison of adoption trends between these two makes\n\
         2. Which make has shown stronger growth and in which time periods\n\
         3. Key insights about market share differences\n\
         4. Notable patterns or inflection points in the data\n\
         5. Brief market context for these trends (2-3 sentences)\n\n\
         Keep the response concise (4-6 paragraphs), data-driven, and actionable. \
         Use specific numbers from the data.",
        persona = ANALYST_PERSONA,
        make1 = payload.make1,
        make2 = payload.make2,
        total1 = payload.make1_total,
        total2 = payload.make2_total,
        min = payload.year_range.min,
        max = payload.year_range.max,
        series = series,
    ))
}

fn build_comprehensive(data: &Value) -> Result<String> {
    let payload: ComprehensivePayload = serde_json::from_value(data.clone())
        .map_err(|e| Error::InvalidPayload(format!("comprehensive payload: {}", e)))?;

    let top_makes: Vec<&AggregateRow> = payload.top_makes.iter().take(TOP_LIST_LIMIT).collect();
    let top_counties: Vec<&AggregateRow> =
        payload.top_counties.iter().take(TOP_LIST_LIMIT).collect();
    let trend_start = payload.adoption_trend.len().saturating_sub(TREND_WINDOW_YEARS);
    let recent_trend = &payload.adoption_trend[trend_start..];

    Ok(format!(
        "{persona}\n\n\
         **Analysis Request:** Provide comprehensive insights on the EV market dashboard data\n\n\
         **Data Summary:**\n\
         - Total Vehicles: {total}\n\
         - Top Makes: {makes}\n\
         - EV Types Distribution: {types}\n\
         - Top Counties: {counties}\n\
         - Recent Adoption Trend: {trend}\n\n\
         **Please provide:**\n\
         1. Overview of the current EV market landscape\n\
         2. Key trends in EV adoption over time\n\
         3. Geographic concentration insights\n\
         4. Popular EV types and makes analysis\n\
         5. 2-3 actionable recommendations for stakeholders\n\n\
         Keep the response comprehensive yet concise (5-7 paragraphs), data-driven, and \
         insightful. Use specific numbers from the data.",
        persona = ANALYST_PERSONA,
        total = payload.total_vehicles,
        makes = serde_json::to_string(&top_makes)?,
        types = serde_json::to_string(&payload.ev_types)?,
        counties = serde_json::to_string(&top_counties)?,
        trend = serde_json::to_string(&recent_trend)?,
    ))
}

fn build_generic(data: &Value, context: Option<&str>) -> Result<String> {
    Ok(format!(
        "{persona}\n\n\
         **Analysis Request:** Analyze the following EV market data\n\n\
         **Data Summary:**\n\
         {data}\n\n\
         **Context:**\n\
         {context}\n\n\
         **Please provide:**\n\
         1. Key insights from the data\n\
         2. Notable trends or patterns\n\
         3. Comparative analysis where relevant\n\
         4. Brief actionable recommendations (2-3 sentences)\n\n\
         Keep the response concise (3-5 paragraphs), data-driven, and actionable.",
        persona = ANALYST_PERSONA,
        data = serde_json::to_string_pretty(data)?,
        context = context.unwrap_or("General EV Market Analysis"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison_data() -> Value {
        serde_json::json!({
            "make1": "BMW",
            "make2": "TESLA",
            "make1Total": 2,
            "make2Total": 1,
            "yearRange": {"min": 2019, "max": 2020},
            "chartData": [
                {"year": 2019, "valueA": 1, "valueB": 0},
                {"year": 2020, "valueA": 1, "valueB": 1}
            ]
        })
    }

    #[test]
    fn test_kind_from_request_type() {
        assert_eq!(
            InsightKind::from_request_type(Some("comparison_insights")),
            InsightKind::Comparison
        );
        assert_eq!(
            InsightKind::from_request_type(Some("comprehensive_insights")),
            InsightKind::Comprehensive
        );
        assert_eq!(
            InsightKind::from_request_type(Some("something_else")),
            InsightKind::Generic
        );
        assert_eq!(InsightKind::from_request_type(None), InsightKind::Generic);
    }

    #[test]
    fn test_comparison_prompt_contains_figures() {
        let request = InsightRequest {
            kind: InsightKind::Comparison,
            data: comparison_data(),
            context: None,
        };
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("BMW"));
        assert!(prompt.contains("TESLA"));
        assert!(prompt.contains("Total Vehicles: 2"));
        assert!(prompt.contains("2019 - 2020"));
    }

    #[test]
    fn test_comparison_missing_total_rejected() {
        let mut data = comparison_data();
        data.as_object_mut().unwrap().remove("make2Total");
        let request = InsightRequest {
            kind: InsightKind::Comparison,
            data,
            context: None,
        };
        match build_prompt(&request) {
            Err(Error::InvalidPayload(msg)) => assert!(msg.contains("comparison")),
            other => panic!("expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_comparison_series_is_truncated() {
        let rows: Vec<Value> = (0..100)
            .map(|i| serde_json::json!({"year": 2000 + i, "valueA": 1, "valueB": 1}))
            .collect();
        let mut data = comparison_data();
        data["chartData"] = Value::Array(rows);
        let request = InsightRequest {
            kind: InsightKind::Comparison,
            data,
            context: None,
        };
        let prompt = build_prompt(&request).unwrap();
        let last_kept = 2000 + (MAX_SERIES_POINTS as i32) - 1;
        assert!(prompt.contains(&format!("{}", last_kept)));
        assert!(!prompt.contains(&format!("\"year\":{}", last_kept + 1)));
    }

    #[test]
    fn test_comprehensive_requires_all_sections() {
        let request = InsightRequest {
            kind: InsightKind::Comprehensive,
            data: serde_json::json!({"totalVehicles": 10}),
            context: None,
        };
        assert!(matches!(
            build_prompt(&request),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_comprehensive_keeps_trailing_trend_window() {
        let trend: Vec<Value> = (2010..2026)
            .map(|y| serde_json::json!({"year": y, "count": 1}))
            .collect();
        let request = InsightRequest {
            kind: InsightKind::Comprehensive,
            data: serde_json::json!({
                "totalVehicles": 16,
                "topMakes": [{"key": "TESLA", "count": 16}],
                "evTypes": [{"key": "BEV", "count": 16}],
                "topCounties": [{"key": "King", "count": 16}],
                "adoptionTrend": trend,
            }),
            context: None,
        };
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("2025"));
        assert!(prompt.contains("2021"));
        assert!(!prompt.contains("\"year\":2020"));
    }

    #[test]
    fn test_generic_includes_context_note() {
        let request = InsightRequest::generic(
            serde_json::json!({"rows": [1, 2, 3]}),
            Some("County adoption snapshot".into()),
        );
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("County adoption snapshot"));
        assert!(prompt.contains("rows"));
    }

    #[test]
    fn test_null_data_rejected() {
        let request = InsightRequest::generic(Value::Null, None);
        assert!(matches!(
            build_prompt(&request),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_request_from_comparison_report_round_trips() {
        let report = ComparisonReport {
            make_a: "BMW".into(),
            make_b: "TESLA".into(),
            year_range: YearRange::new(2019, 2020).unwrap(),
            series: vec![ComparisonRow {
                year: 2019,
                value_a: 1,
                value_b: 0,
            }],
            total_a: 1,
            total_b: 0,
        };
        let request = InsightRequest::comparison(&report);
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("BMW"));
    }
}
