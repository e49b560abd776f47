//! Group-by aggregation
//!
//! Partitions records by a key and reduces each group with sum, mean, or
//! count. Groups come out in first-seen key order and every group is folded
//! in input order, so results do not depend on hashing.

use std::hash::Hash;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sales_types::columns::NumericField;
use sales_types::errors::InvalidArgument;
use sales_types::numeric::{self, Money};
use sales_types::record::SaleRecord;

use crate::ordering::Direction;
use crate::rank::dense_ranks;

/// A reduction over one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Sum(NumericField),
    /// `sum / count` of the group, rounded to `MEAN_SCALE` places.
    Mean(NumericField),
    Count,
}

/// Reductions for one group, in the order the metrics were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary<K> {
    pub key: K,
    pub count: u64,
    pub values: Vec<(Metric, Decimal)>,
}

impl<K> GroupSummary<K> {
    pub fn get(&self, metric: Metric) -> Option<Decimal> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }
}

/// `(key, count)` pair from a group-and-count pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: u64,
}

/// Per-salesperson performance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub salesperson: String,
    pub total_sales: Money,
    pub average_sale_price: Money,
    pub total_commissions: Money,
    pub sale_count: u64,
    /// Dense rank by `total_sales`, biggest first.
    pub sales_rank: u32,
    /// Dense rank by `total_commissions`, biggest first.
    pub commission_rank: u32,
}

/// Partition `items` by `key`, keys in first-seen order.
pub fn group_by<T, K, F>(items: &[T], key: F) -> IndexMap<K, Vec<&T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<&T>> = IndexMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Group `records` by `key` and compute `metrics` for every group.
///
/// Fails with `InvalidArgument` if `metrics` is empty or repeats a metric.
pub fn aggregate<K, F>(
    records: &[SaleRecord],
    key: F,
    metrics: &[Metric],
) -> Result<Vec<GroupSummary<K>>, InvalidArgument>
where
    K: Eq + Hash,
    F: Fn(&SaleRecord) -> K,
{
    validate_metrics(metrics)?;

    let groups = group_by(records, key);
    debug!(groups = groups.len(), records = records.len(), "Aggregating groups");

    Ok(groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len() as u64;
            let values = metrics
                .iter()
                .map(|metric| (*metric, reduce(*metric, &members)))
                .collect();
            GroupSummary { key, count, values }
        })
        .collect())
}

/// Group `items` by `key` and count members, keys in first-seen order.
pub fn count_by_keys<T, K, F>(items: &[T], key: F) -> Vec<GroupCount<K>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut counts: IndexMap<K, u64> = IndexMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

/// Totals, average price, and both dense ranks for every salesperson.
///
/// Rows come out in first-seen salesperson order.
pub fn salesperson_performance(records: &[SaleRecord]) -> Vec<AggregateRow> {
    let groups = group_by(records, |r| r.salesperson.clone());
    debug!(salespeople = groups.len(), "Computing salesperson performance");

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|(salesperson, members)| {
            let sale_count = members.len() as u64;
            let total_sales: Money = members.iter().map(|r| r.sale_price).sum();
            let total_commissions: Money = members.iter().map(|r| r.commission_earned).sum();
            // group_by never yields an empty group
            let average_sale_price = total_sales.mean_over(sale_count).unwrap_or(Money::ZERO);
            AggregateRow {
                salesperson,
                total_sales,
                average_sale_price,
                total_commissions,
                sale_count,
                sales_rank: 0,
                commission_rank: 0,
            }
        })
        .collect();

    let sales_ranks = dense_ranks(&rows, |r| r.total_sales, Direction::Descending);
    let commission_ranks = dense_ranks(&rows, |r| r.total_commissions, Direction::Descending);
    for ((row, sales_rank), commission_rank) in
        rows.iter_mut().zip(sales_ranks).zip(commission_ranks)
    {
        row.sales_rank = sales_rank;
        row.commission_rank = commission_rank;
    }

    rows
}

fn validate_metrics(metrics: &[Metric]) -> Result<(), InvalidArgument> {
    if metrics.is_empty() {
        return Err(InvalidArgument::new("metrics", "at least one metric is required"));
    }
    for (i, metric) in metrics.iter().enumerate() {
        if metrics[..i].contains(metric) {
            return Err(InvalidArgument::new(
                "metrics",
                format!("{:?} requested more than once", metric),
            ));
        }
    }
    Ok(())
}

fn reduce(metric: Metric, members: &[&SaleRecord]) -> Decimal {
    match metric {
        Metric::Count => Decimal::from(members.len() as u64),
        Metric::Sum(field) => sum(field, members),
        Metric::Mean(field) => {
            numeric::mean(sum(field, members), members.len() as u64).unwrap_or(Decimal::ZERO)
        }
    }
}

fn sum(field: NumericField, members: &[&SaleRecord]) -> Decimal {
    members
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc + field.value(r))
        .normalize()
}
