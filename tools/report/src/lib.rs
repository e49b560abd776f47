//! Sales Report Host
//!
//! Reads a car-sales CSV, runs the analytics pipeline, and serializes the
//! dashboard datasets to JSON for the presentation layer.
//!
//! # Modules
//! - `loader` — CSV file to raw rows
//! - `config` — JSON config file for loader limits and result sizes
//! - `export` — Report assembly and JSON export

pub mod loader;
pub mod config;
pub mod export;

use sales_analytics::build_dashboard;
use sales_analytics::store::RecordStore;
use sales_types::errors::AnalyticsError;
use sales_types::record::RawSaleRow;

use crate::config::ReportConfig;
use crate::export::ReportExport;

/// Crate version constant
pub const VERSION: &str = "1.0.0";

/// Validate `rows`, build the dashboard, and wrap it for export.
pub fn generate_report(
    rows: &[RawSaleRow],
    config: &ReportConfig,
    fill_gaps: bool,
) -> Result<ReportExport, AnalyticsError> {
    let store = RecordStore::load_with(rows, &config.loader)?;
    let data = build_dashboard(&store, &config.pipeline)?;
    Ok(export::build_export(data, fill_gaps))
}
