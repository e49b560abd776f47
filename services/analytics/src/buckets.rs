//! Monthly time buckets
//!
//! Counts records per calendar month for the sales trend series.
//!
//! Only months with at least one record are emitted: "no data" and "zero
//! sales" are different facts and the bucketer does not decide between
//! them. `fill_gaps` builds the dense calendar grid for callers that want it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sales_types::period::YearMonth;

/// Number of records in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

impl MonthBucket {
    pub fn period(&self) -> YearMonth {
        YearMonth { year: self.year, month: self.month }
    }

    fn new(period: YearMonth, count: u64) -> Self {
        Self {
            year: period.year,
            month: period.month,
            count,
        }
    }
}

/// Count records per month of `date_of`, chronologically ascending.
pub fn bucket_by_month<T, F>(records: &[T], date_of: F) -> Vec<MonthBucket>
where
    F: Fn(&T) -> NaiveDate,
{
    // BTreeMap for deterministic chronological order.
    let mut counts: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(YearMonth::of(date_of(record))).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(period, count)| MonthBucket::new(period, count))
        .collect()
}

/// Dense monthly grid from the earliest to the latest bucket.
///
/// Missing months get a zero count. Input order does not matter; buckets
/// for the same month are summed.
pub fn fill_gaps(buckets: &[MonthBucket]) -> Vec<MonthBucket> {
    let mut counts: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for bucket in buckets {
        *counts.entry(bucket.period()).or_insert(0) += bucket.count;
    }

    let (first, last) = match (counts.keys().next(), counts.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut filled = Vec::with_capacity(counts.len());
    let mut period = first;
    while period <= last {
        let count = counts.get(&period).copied().unwrap_or(0);
        filled.push(MonthBucket::new(period, count));
        period = period.succ();
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn bucket(year: i32, month: u32, count: u64) -> MonthBucket {
        MonthBucket { year, month, count }
    }

    #[test]
    fn test_no_synthesized_months() {
        let dates = vec![date("2022-01-05"), date("2022-01-20"), date("2022-03-01")];
        let buckets = bucket_by_month(&dates, |d| *d);
        assert_eq!(buckets, vec![bucket(2022, 1, 2), bucket(2022, 3, 1)]);
    }

    #[test]
    fn test_chronological_across_years() {
        let dates = vec![date("2023-01-02"), date("2022-12-31"), date("2022-02-14")];
        let buckets = bucket_by_month(&dates, |d| *d);
        assert_eq!(
            buckets,
            vec![bucket(2022, 2, 1), bucket(2022, 12, 1), bucket(2023, 1, 1)]
        );
    }

    #[test]
    fn test_empty_input() {
        let dates: Vec<NaiveDate> = Vec::new();
        assert!(bucket_by_month(&dates, |d| *d).is_empty());
        assert!(fill_gaps(&[]).is_empty());
    }

    #[test]
    fn test_fill_gaps() {
        let sparse = vec![bucket(2022, 11, 4), bucket(2023, 2, 1)];
        let dense = fill_gaps(&sparse);
        assert_eq!(
            dense,
            vec![
                bucket(2022, 11, 4),
                bucket(2022, 12, 0),
                bucket(2023, 1, 0),
                bucket(2023, 2, 1),
            ]
        );
    }

    #[test]
    fn test_fill_gaps_single_bucket() {
        let dense = fill_gaps(&[bucket(2022, 6, 3)]);
        assert_eq!(dense, vec![bucket(2022, 6, 3)]);
    }
}
