//! Sort direction shared by ranking and top-N selection

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Which end of the ordering comes first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    /// Biggest first.
    #[default]
    Descending,
}

impl Direction {
    /// Orient an ascending comparison. `Equal` stays `Equal`, which keeps
    /// stable sorts stable in both directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Positions of `keys` in sorted order; equal keys keep input order.
pub fn sorted_indices<M: Ord>(keys: &[M], direction: Direction) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..keys.len()).collect();
    indices.sort_by(|&a, &b| direction.apply(keys[a].cmp(&keys[b])));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_indices_descending_is_stable() {
        let keys = [5, 3, 5, 9];
        assert_eq!(sorted_indices(&keys, Direction::Descending), vec![3, 0, 2, 1]);
        assert_eq!(sorted_indices(&keys, Direction::Ascending), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_empty_keys() {
        let keys: [u32; 0] = [];
        assert!(sorted_indices(&keys, Direction::Ascending).is_empty());
    }
}
