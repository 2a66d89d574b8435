//! Stable ordering helpers.
//!
//! Map iteration order never leaks into output: presentation layers sort
//! with these helpers so repeated runs are byte-identical.

use crate::tokens::ContestantId;
use core::cmp::Ordering;

/// Order `(id, count)` pairs by count descending, then id ascending.
/// The id tiebreak keeps equal-count rows in one stable order.
pub fn cmp_count_desc_then_id(a: &(ContestantId, u64), b: &(ContestantId, u64)) -> Ordering {
    match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        o => o,
    }
}

/// Sort contestant ids ascending (lexicographic).
pub fn sort_contestant_ids(ids: &mut [ContestantId]) {
    ids.sort();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn id(s: &str) -> ContestantId {
        s.parse().unwrap()
    }

    #[test]
    fn count_order_breaks_ties_by_id() {
        let mut rows = vec![(id("b"), 5u64), (id("a"), 5), (id("c"), 9)];
        rows.sort_by(cmp_count_desc_then_id);
        let ids: alloc::vec::Vec<&str> = rows.iter().map(|(i, _)| i.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
