//! Dense ranking
//!
//! Sort by the metric, give the first row rank 1, and bump the rank only
//! when the metric changes. Tied rows share a rank and no rank is skipped:
//! `[1000, 1000, 500]` ranks `[1, 1, 2]`, never `[1, 1, 3]`.
//!
//! The sort is stable, so rows with equal metrics keep their input order.

use serde::{Deserialize, Serialize};

use crate::ordering::{sorted_indices, Direction};

/// A row annotated with its dense rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranked<T> {
    pub rank: u32,
    pub row: T,
}

/// Dense ranks of `rows` by `metric`, aligned with input positions.
///
/// Ties are exact equality of the metric.
pub fn dense_ranks<T, M, F>(rows: &[T], metric: F, direction: Direction) -> Vec<u32>
where
    M: Ord,
    F: Fn(&T) -> M,
{
    dense_ranks_with(rows, metric, direction, |prev, cur| prev == cur)
}

/// Dense ranks with a caller-supplied tie test.
///
/// `ties(prev, cur)` is asked for each row after the first, in rank order,
/// whether it continues the rank of the row before it. A tolerance-based
/// test therefore chains: each row is compared only to its predecessor.
pub fn dense_ranks_with<T, M, F, E>(
    rows: &[T],
    metric: F,
    direction: Direction,
    ties: E,
) -> Vec<u32>
where
    M: Ord,
    F: Fn(&T) -> M,
    E: Fn(&M, &M) -> bool,
{
    let keys: Vec<M> = rows.iter().map(metric).collect();
    let order = sorted_indices(&keys, direction);

    let mut ranks = vec![0u32; rows.len()];
    let mut rank = 0u32;
    let mut prev: Option<&M> = None;

    for index in order {
        let key = &keys[index];
        match prev {
            Some(p) if ties(p, key) => {}
            _ => rank += 1,
        }
        ranks[index] = rank;
        prev = Some(key);
    }

    ranks
}

/// Rank `rows` by `metric` and return them in rank order.
pub fn rank<T, M, F>(rows: Vec<T>, metric: F, direction: Direction) -> Vec<Ranked<T>>
where
    M: Ord,
    F: Fn(&T) -> M,
{
    let ranks = dense_ranks(&rows, &metric, direction);
    let mut ranked: Vec<Ranked<T>> = rows
        .into_iter()
        .zip(ranks)
        .map(|(row, rank)| Ranked { rank, row })
        .collect();
    // Stable, and ranks already follow the metric order.
    ranked.sort_by_key(|r| r.rank);
    ranked
}
