//! Dashboard pipeline
//!
//! Runs the four independent result sets off one record store and bundles
//! them for the presentation layer. Nothing is returned unless every result
//! set was computed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use sales_types::errors::AnalyticsError;

use crate::aggregate::{count_by_keys, salesperson_performance, AggregateRow, GroupCount};
use crate::buckets::{bucket_by_month, MonthBucket};
use crate::distribution::{count_by, DistributionEntry};
use crate::ordering::Direction;
use crate::store::RecordStore;
use crate::top_n::top_n;

/// Sizes of the ranked result sets.
///
/// Signed so a negative value from a config file is reported as an
/// invalid argument rather than rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rows in the salesperson leaderboard.
    pub leaderboard_size: i64,
    /// Rows in the model/year table.
    pub model_year_size: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: 10,
            model_year_size: 5,
        }
    }
}

/// `(car model, car year)`
pub type ModelYear = (String, i32);

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub record_count: usize,
    /// Top salespeople by total sales, biggest first.
    pub leaderboard: Vec<AggregateRow>,
    /// Most sold model/year combinations, biggest first.
    pub top_model_years: Vec<GroupCount<ModelYear>>,
    /// Sales per month, chronological, observed months only.
    pub monthly_trend: Vec<MonthBucket>,
    /// Sales per car make.
    pub make_distribution: Vec<DistributionEntry<String>>,
}

impl DashboardData {
    /// SHA-256 over every result set, lowercase hex.
    ///
    /// Identical input produces an identical checksum. Text values are hashed
    /// in their quoted `Debug` form so separators inside names cannot collide.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.record_count.to_string().as_bytes());
        hasher.update(b"---");
        for row in &self.leaderboard {
            let line = format!(
                "{:?}:{}:{}:{}:{}:{}:{}|",
                row.salesperson,
                row.total_sales,
                row.average_sale_price,
                row.total_commissions,
                row.sale_count,
                row.sales_rank,
                row.commission_rank,
            );
            hasher.update(line.as_bytes());
        }
        hasher.update(b"---");
        for group in &self.top_model_years {
            let (model, year) = &group.key;
            hasher.update(format!("{:?}:{}:{}|", model, year, group.count).as_bytes());
        }
        hasher.update(b"---");
        for bucket in &self.monthly_trend {
            let line = format!("{}:{}:{}|", bucket.year, bucket.month, bucket.count);
            hasher.update(line.as_bytes());
        }
        hasher.update(b"---");
        for entry in &self.make_distribution {
            hasher.update(format!("{:?}:{}|", entry.category, entry.count).as_bytes());
        }

        format!("{:x}", hasher.finalize())
    }
}

/// Compute all dashboard result sets from `store`.
pub fn build_dashboard(
    store: &RecordStore,
    config: &PipelineConfig,
) -> Result<DashboardData, AnalyticsError> {
    let records = store.records();
    info!(
        records = records.len(),
        leaderboard_size = config.leaderboard_size,
        model_year_size = config.model_year_size,
        "Building dashboard"
    );

    let performance = salesperson_performance(records);
    let leaderboard = top_n(
        performance,
        config.leaderboard_size,
        |row| row.total_sales,
        Direction::Descending,
    )?;

    let model_years = count_by_keys(records, |r| (r.car_model.clone(), r.car_year));
    let top_model_years = top_n(
        model_years,
        config.model_year_size,
        |g| g.count,
        Direction::Descending,
    )?;

    let monthly_trend = bucket_by_month(records, |r| r.sale_date);
    let make_distribution = count_by(records, |r| r.car_make.clone());

    debug!(
        leaderboard = leaderboard.len(),
        model_years = top_model_years.len(),
        months = monthly_trend.len(),
        makes = make_distribution.len(),
        "Dashboard result sets computed"
    );

    Ok(DashboardData {
        record_count: records.len(),
        leaderboard,
        top_model_years,
        monthly_trend,
        make_distribution,
    })
}
