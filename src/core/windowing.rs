use crate::core::Bucket;
use crate::core::search::{lower_bound_by_key, upper_bound_by_key};

/// Returns buckets whose key falls inside an inclusive key window.
///
/// `buckets` must be sorted ascending by key. Reversed bounds are swapped.
#[must_use]
pub fn buckets_in_key_window<V>(buckets: &[Bucket<V>], start: f64, end: f64) -> &[Bucket<V>] {
    if start.is_nan() || end.is_nan() {
        return &[];
    }

    let (min_key, max_key) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let first = lower_bound_by_key(buckets, min_key, Bucket::key);
    let last = upper_bound_by_key(buckets, max_key, Bucket::key);
    if first >= last {
        return &[];
    }
    &buckets[first..last]
}
