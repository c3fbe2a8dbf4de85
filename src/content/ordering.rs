//! Sibling ordering: insertion placement and sort-order maintenance.

use std::cmp::Ordering;

/// Sort-order gap wide enough to slot a new sibling into without renumbering
pub const SORT_ORDER_THRESHOLD: i32 = 9999;

/// Spacing used when a sibling list has to be renumbered from scratch
pub const SORT_ORDER_STEP: i32 = 10;

/// Compare two sort orders. Total for the whole `i32` range.
pub fn compare_sort_order(a: i32, b: i32) -> Ordering {
    a.cmp(&b)
}

/// Pick the index at which a newly attached item is inserted among `siblings`.
///
/// Scans from the end for two consecutive sort orders more than
/// [`SORT_ORDER_THRESHOLD`] apart and places the item in that gap. Failing
/// that, a first sibling already above the threshold means the item goes to
/// the front; otherwise it is appended.
pub fn insertion_index(siblings: &[i32]) -> usize {
    let Some(&last) = siblings.last() else {
        return 0;
    };
    let mut last_order = i64::from(last);
    for i in (0..siblings.len() - 1).rev() {
        let order = i64::from(siblings[i]);
        if order < last_order - i64::from(SORT_ORDER_THRESHOLD) {
            return i + 1;
        }
        last_order = order;
    }
    if last_order > i64::from(SORT_ORDER_THRESHOLD) {
        return 0;
    }
    siblings.len()
}

/// Make `orders` strictly increasing while touching as few entries as possible.
///
/// Returns the indexes whose value changed. When bumping would overflow
/// `i32`, the whole list is respaced by [`SORT_ORDER_STEP`].
pub fn normalize_sort_orders(orders: &mut [i32]) -> Vec<usize> {
    let before = orders.to_vec();
    let mut last: Option<i32> = None;
    let mut overflowed = false;
    for order in orders.iter_mut() {
        if let Some(previous) = last {
            if *order <= previous {
                match previous.checked_add(1) {
                    Some(next) => *order = next,
                    None => {
                        overflowed = true;
                        break;
                    }
                }
            }
        }
        last = Some(*order);
    }
    if overflowed {
        for (i, order) in orders.iter_mut().enumerate() {
            let spaced = i64::try_from(i).unwrap_or(i64::MAX) * i64::from(SORT_ORDER_STEP);
            *order = i32::try_from(spaced).unwrap_or(i32::MAX);
        }
    }
    before
        .iter()
        .zip(orders.iter())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(i, _)| i)
        .collect()
}
