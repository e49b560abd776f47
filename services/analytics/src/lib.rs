//! Sales Analytics Engine
//!
//! Consumes validated sale records and produces:
//! - A salesperson leaderboard with totals, averages, and dense ranks
//! - Top car model/year combinations by sales count
//! - A monthly sales trend series
//! - The share of sales per car make
//!
//! Every operation is a pure function of its input records. Grouping keeps
//! first-seen key order and folds each group in input order, so re-running
//! on the same input yields identical output.
//!
//! # Architecture
//!
//! ```text
//!        Raw rows
//!           │
//!     ┌─────▼─────┐
//!     │RecordStore│  ← Validates, rejects the batch on the first bad row
//!     └─────┬─────┘
//!           │
//!   ┌───────┼──────────────┬──────────────┐
//!   │       │              │              │
//! ┌─▼────┐ ┌▼──────────┐ ┌─▼──────────┐ ┌─▼───────────┐
//! │Aggreg│ │Group+Count│ │TimeBucketer│ │Distribution │
//! └─┬────┘ └┬──────────┘ └─┬──────────┘ └─┬───────────┘
//! ┌─▼──┐    │              │              │
//! │Rank│    │              │              │
//! └─┬──┘    │              │              │
//! ┌─▼───────▼┐             │              │
//! │  Top-N   │             │              │
//! └─┬────────┘             │              │
//! ┌─▼──────────────────────▼──────────────▼┐
//! │            DashboardData               │
//! └────────────────────────────────────────┘
//! ```

pub mod ordering;
pub mod store;
pub mod aggregate;
pub mod rank;
pub mod top_n;
pub mod buckets;
pub mod distribution;
pub mod pipeline;

pub use aggregate::{AggregateRow, GroupCount, GroupSummary, Metric};
pub use buckets::MonthBucket;
pub use distribution::DistributionEntry;
pub use ordering::Direction;
pub use pipeline::{build_dashboard, DashboardData, PipelineConfig};
pub use store::RecordStore;

// Library version
pub const ENGINE_VERSION: &str = "0.1.0";
