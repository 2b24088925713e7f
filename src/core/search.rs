//! Binary search over key-sorted sequences.
//!
//! All searches work on index bounds over the caller's slice; nothing is
//! copied per step. The half-open range `[start, end)` shrinks strictly on
//! every iteration, so a two-element range always terminates.

use std::cmp::Ordering;

/// Returns the position whose key equals `key`, or `None`.
///
/// `items` must be sorted ascending by `key_of` with unique keys.
pub fn find_by_key<T>(items: &[T], key: f64, key_of: impl Fn(&T) -> f64) -> Option<usize> {
    if !key.is_finite() {
        return None;
    }

    let mut start = 0usize;
    let mut end = items.len();
    while start < end {
        let mid = start + (end - start) / 2;
        match key_of(&items[mid]).total_cmp(&key) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => start = mid + 1,
            Ordering::Greater => end = mid,
        }
    }
    None
}

/// First position whose key is `>= key`.
pub fn lower_bound_by_key<T>(items: &[T], key: f64, key_of: impl Fn(&T) -> f64) -> usize {
    let mut start = 0usize;
    let mut end = items.len();
    while start < end {
        let mid = start + (end - start) / 2;
        if key_of(&items[mid]) < key {
            start = mid + 1;
        } else {
            end = mid;
        }
    }
    start
}

/// First position whose key is `> key`.
pub fn upper_bound_by_key<T>(items: &[T], key: f64, key_of: impl Fn(&T) -> f64) -> usize {
    let mut start = 0usize;
    let mut end = items.len();
    while start < end {
        let mid = start + (end - start) / 2;
        if key_of(&items[mid]) <= key {
            start = mid + 1;
        } else {
            end = mid;
        }
    }
    start
}
