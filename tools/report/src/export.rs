//! Report export
//!
//! Bundles the dashboard datasets with the presentation extras (make shares,
//! optional dense monthly grid) and serializes them to JSON.

use sales_analytics::buckets::{fill_gaps, MonthBucket};
use sales_analytics::distribution::{shares, Share};
use sales_analytics::DashboardData;
use serde::{Deserialize, Serialize};

/// Everything written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportExport {
    pub version: String,
    /// Checksum of `data`, equal across runs on the same input.
    pub checksum: String,
    pub data: DashboardData,
    /// Percentage of sales per make, same order as `data.make_distribution`.
    pub make_shares: Vec<Share<String>>,
    /// Monthly trend with zero-count months filled in, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dense_monthly_trend: Option<Vec<MonthBucket>>,
}

/// Build a complete report export.
pub fn build_export(data: DashboardData, with_dense_trend: bool) -> ReportExport {
    let make_shares = shares(&data.make_distribution);
    let dense_monthly_trend = with_dense_trend.then(|| fill_gaps(&data.monthly_trend));
    ReportExport {
        version: crate::VERSION.to_string(),
        checksum: data.checksum(),
        data,
        make_shares,
        dense_monthly_trend,
    }
}

/// Export the report as pretty JSON.
pub fn export_json(export: &ReportExport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(export)
}

/// Write export to a file path.
pub fn write_to_file(export: &ReportExport, path: &std::path::Path) -> std::io::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_analytics::distribution::DistributionEntry;

    fn data() -> DashboardData {
        DashboardData {
            record_count: 3,
            leaderboard: Vec::new(),
            top_model_years: Vec::new(),
            monthly_trend: vec![
                MonthBucket { year: 2022, month: 1, count: 2 },
                MonthBucket { year: 2022, month: 3, count: 1 },
            ],
            make_distribution: vec![
                DistributionEntry { category: "Ford".to_string(), count: 2 },
                DistributionEntry { category: "Kia".to_string(), count: 1 },
            ],
        }
    }

    #[test]
    fn test_build_export() {
        let export = build_export(data(), false);
        assert_eq!(export.version, crate::VERSION);
        assert_eq!(export.checksum, export.data.checksum());
        assert_eq!(export.make_shares.len(), 2);
        assert!(export.dense_monthly_trend.is_none());
    }

    #[test]
    fn test_dense_trend_requested() {
        let export = build_export(data(), true);
        let dense = export.dense_monthly_trend.unwrap();
        assert_eq!(dense.len(), 3);
        assert_eq!(dense[1], MonthBucket { year: 2022, month: 2, count: 0 });
    }

    #[test]
    fn test_export_json_roundtrip() {
        let export = build_export(data(), true);
        let json = export_json(&export).unwrap();
        let parsed: ReportExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, export);
        assert!(json.contains("\"make_shares\""));
    }

    #[test]
    fn test_dense_trend_omitted_from_json() {
        let json = export_json(&build_export(data(), false)).unwrap();
        assert!(!json.contains("dense_monthly_trend"));
    }
}
