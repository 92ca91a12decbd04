//! Keep-longest overlap resolution.

use std::cmp::Reverse;

use crate::candidate::Interval;

/// Prune `items` to a non-overlapping subset, sorted by start.
///
/// Longer spans are considered first; a span is kept when it overlaps none of
/// the spans kept so far. The sort is stable, so among equal lengths the
/// earlier item wins.
pub fn remove_overlap<T: Interval>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| Reverse(item.span_len()));

    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !kept.iter().any(|k| k.overlaps(&item)) {
            kept.push(item);
        }
    }

    kept.sort_by_key(|item| item.bounds().start);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let none: Vec<std::ops::Range<usize>> = Vec::new();
        assert!(remove_overlap(none).is_empty());
    }

    #[test]
    fn longer_span_suppresses_nested_one() {
        let kept = remove_overlap(vec![3..8, 0..20, 25..30]);
        assert_eq!(kept, vec![0..20, 25..30]);
    }

    #[test]
    fn equal_length_tie_keeps_first() {
        let kept = remove_overlap(vec![2..6, 0..4, 5..9]);
        assert_eq!(kept, vec![2..6]);
    }

    #[test]
    fn touching_spans_both_survive() {
        let kept = remove_overlap(vec![4..8, 0..4]);
        assert_eq!(kept, vec![0..4, 4..8]);
    }
}
