//! Deterministic mode computation
//!
//! The mode is the most frequent value of a collection. When several values
//! share the highest count the smallest one wins, by the value's `Ord`
//! (numeric for integers, lexicographic for strings and tuples), so results
//! do not depend on input order.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::mode::mode;
//!
//! assert_eq!(mode(["B", "A", "B", "A"]), Some("A"));
//! assert_eq!(mode([3, 1, 3]), Some(3));
//! assert_eq!(mode(Vec::<u32>::new()), None);
//! ```

use std::collections::BTreeMap;

/// Occurrence counts keyed in ascending order
pub fn value_counts<T, I>(values: I) -> BTreeMap<T, u64>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0u64) += 1;
    }
    counts
}

/// Most frequent value, smallest first on ties
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    mode_of_counts(value_counts(values))
}

/// Mode of pre-computed counts
///
/// Keys are visited in ascending order and only a strictly higher count
/// replaces the current best, which yields the smallest tied key.
pub fn mode_of_counts<T: Ord>(counts: BTreeMap<T, u64>) -> Option<T> {
    let mut best: Option<(T, u64)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_winner() {
        assert_eq!(mode(["A", "B", "A"]), Some("A"));
        assert_eq!(mode([5u32, 7, 7, 7, 5]), Some(7));
    }

    #[test]
    fn test_tie_prefers_smallest() {
        assert_eq!(mode(["B", "A", "B", "A"]), Some("A"));
        assert_eq!(mode(["A", "B", "B", "A"]), Some("A"));
        assert_eq!(mode([9u32, 2, 9, 2, 5]), Some(2));
        assert_eq!(mode([1990, 1985, 1985, 1990]), Some(1985));
    }

    #[test]
    fn test_tie_on_tuples() {
        let routes = [("B", "A"), ("A", "Z"), ("B", "A"), ("A", "Z")];
        assert_eq!(mode(routes), Some(("A", "Z")));
    }

    #[test]
    fn test_empty() {
        assert_eq!(mode(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_value_counts() {
        let counts = value_counts(["Subscriber", "Customer", "Subscriber"]);
        assert_eq!(counts.get("Subscriber"), Some(&2));
        assert_eq!(counts.get("Customer"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
