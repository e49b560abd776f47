//! Top-N selection
//!
//! Stable sort then truncate. When values tie at the cut-off, the element
//! that came first in the input wins, so the result is fully determined by
//! the input order.

use std::cmp::{Ordering, Reverse};

use sales_types::errors::InvalidArgument;

use crate::ordering::Direction;

/// The first `n` rows ordered by `order_by`.
///
/// Fails if `n` is negative. An `n` at or past the length returns every
/// row, still sorted.
pub fn top_n<T, K, F>(
    mut rows: Vec<T>,
    n: i64,
    order_by: F,
    direction: Direction,
) -> Result<Vec<T>, InvalidArgument>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let limit = limit(n)?;
    // sort_by_cached_key is stable; Reverse keeps equal keys equal.
    match direction {
        Direction::Ascending => rows.sort_by_cached_key(|r| order_by(r)),
        Direction::Descending => rows.sort_by_cached_key(|r| Reverse(order_by(r))),
    }
    rows.truncate(limit);
    Ok(rows)
}

/// Like [`top_n`] with an explicit comparator, for multi-key orderings.
pub fn top_n_by<T, C>(mut rows: Vec<T>, n: i64, compare: C) -> Result<Vec<T>, InvalidArgument>
where
    C: FnMut(&T, &T) -> Ordering,
{
    let limit = limit(n)?;
    rows.sort_by(compare);
    rows.truncate(limit);
    Ok(rows)
}

fn limit(n: i64) -> Result<usize, InvalidArgument> {
    usize::try_from(n)
        .map_err(|_| InvalidArgument::new("n", format!("must be non-negative, got {}", n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earlier_element_wins_tie() {
        let rows = vec![("X", 5), ("Y", 5), ("Z", 3)];
        let top = top_n(rows, 1, |r| r.1, Direction::Descending).unwrap();
        assert_eq!(top, vec![("X", 5)]);
    }

    #[test]
    fn test_negative_n_is_invalid() {
        let err = top_n(vec![1, 2, 3], -1, |v| *v, Direction::Descending).unwrap_err();
        assert_eq!(err.parameter, "n");
    }

    #[test]
    fn test_n_past_length_returns_all_sorted() {
        let top = top_n(vec![2, 9, 4], 10, |v| *v, Direction::Descending).unwrap();
        assert_eq!(top, vec![9, 4, 2]);
    }

    #[test]
    fn test_zero_and_empty() {
        assert!(top_n(vec![1, 2], 0, |v| *v, Direction::Ascending).unwrap().is_empty());
        let empty: Vec<u8> = Vec::new();
        assert!(top_n(empty, 5, |v| *v, Direction::Ascending).unwrap().is_empty());
    }

    #[test]
    fn test_ascending() {
        let rows = vec![("a", 3), ("b", 1), ("c", 1)];
        let top = top_n(rows, 2, |r| r.1, Direction::Ascending).unwrap();
        assert_eq!(top, vec![("b", 1), ("c", 1)]);
    }

    #[test]
    fn test_top_n_by_comparator() {
        let rows = vec![("a", 2, 1), ("b", 2, 5), ("c", 3, 0)];
        let top = top_n_by(rows, 2, |x, y| y.1.cmp(&x.1).then(y.2.cmp(&x.2))).unwrap();
        assert_eq!(top, vec![("c", 3, 0), ("b", 2, 5)]);
    }
}
