//! Categorical distributions
//!
//! Value-frequency counts over one column. Every input record lands in
//! exactly one entry, so the counts always add up to the record count.

use std::hash::Hash;

use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of records with one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry<K> {
    pub category: K,
    pub count: u64,
}

/// A category's percentage of all records, rounded to 2 places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share<K> {
    pub category: K,
    pub percent: Decimal,
}

/// Count records per category.
///
/// Entries are ordered by descending count, ties in first-seen order.
/// Consumers should not rely on the order beyond presentation.
pub fn count_by<T, K, F>(records: &[T], category_of: F) -> Vec<DistributionEntry<K>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut counts: IndexMap<K, u64> = IndexMap::new();
    for record in records {
        *counts.entry(category_of(record)).or_insert(0) += 1;
    }

    let mut entries: Vec<DistributionEntry<K>> = counts
        .into_iter()
        .map(|(category, count)| DistributionEntry { category, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Percentage share of each entry.
pub fn shares<K: Clone>(entries: &[DistributionEntry<K>]) -> Vec<Share<K>> {
    let total: u64 = entries.iter().map(|e| e.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let total = Decimal::from(total);
    entries
        .iter()
        .map(|e| Share {
            category: e.category.clone(),
            percent: (Decimal::from(e.count) * Decimal::ONE_HUNDRED / total)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
        })
        .collect()
}
