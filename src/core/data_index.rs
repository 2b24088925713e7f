use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::canonical_key;
use crate::core::search::find_by_key;
use crate::core::windowing::buckets_in_key_window;
use crate::core::{Bucket, KeyedPoint, RawEntry};
use crate::error::{BarViewError, BarViewResult};

/// What to do when a build receives no points at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyDataPolicy {
    /// Produce an empty index with zeroed metadata.
    #[default]
    Accept,
    /// Fail with `BarViewError::EmptyData`.
    Reject,
}

/// Controls for `DataIndex::build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// `true` leaves the caller's input untouched. `false` rewrites it into
    /// the normalized, sorted and aggregated shape.
    pub copy: bool,
    pub empty_data: EmptyDataPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            copy: true,
            empty_data: EmptyDataPolicy::Accept,
        }
    }
}

/// Sorted, de-duplicated index of keyed observations.
///
/// Buckets are ascending by key and unique by key. Derived metadata is
/// recomputed on every build; an index is never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct DataIndex<V> {
    buckets: Vec<Bucket<V>>,
    offset: f64,
    range: f64,
    max_depth: usize,
    point_count: usize,
}

impl<V> Default for DataIndex<V> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            offset: 0.0,
            range: 0.0,
            max_depth: 0,
            point_count: 0,
        }
    }
}

impl<V> DataIndex<V> {
    /// Builds from owned raw entries without copying any point.
    pub fn from_entries(entries: Vec<RawEntry<V>>, policy: EmptyDataPolicy) -> BarViewResult<Self> {
        check_entries(&entries, policy)?;
        Ok(Self::from_validated(entries))
    }

    /// Builds from a flat list of owned points.
    pub fn from_points(points: Vec<KeyedPoint<V>>, policy: EmptyDataPolicy) -> BarViewResult<Self> {
        if points.is_empty() && policy == EmptyDataPolicy::Reject {
            return Err(BarViewError::EmptyData);
        }
        validate_keys(points.iter())?;
        Ok(Self::from_sorted_merge(points))
    }

    /// Builds from the caller's entries honoring the copy-vs-mutate contract.
    ///
    /// With `options.copy == false` the caller's vector is replaced by the
    /// normalized form: one entry per key, ascending, duplicates grouped in
    /// first-seen order. On error the input is left untouched either way.
    pub fn build(raw: &mut Vec<RawEntry<V>>, options: BuildOptions) -> BarViewResult<Self>
    where
        V: Clone,
    {
        check_entries(raw, options.empty_data)?;

        if options.copy {
            return Ok(Self::from_validated(raw.clone()));
        }

        let index = Self::from_validated(std::mem::take(raw));
        *raw = index
            .buckets
            .iter()
            .cloned()
            .map(Bucket::into_raw_entry)
            .collect();
        Ok(index)
    }

    /// Checks entries against `policy` without building anything.
    pub fn validate_entries(
        entries: &[RawEntry<V>],
        policy: EmptyDataPolicy,
    ) -> BarViewResult<()> {
        check_entries(entries, policy)
    }

    fn from_validated(entries: Vec<RawEntry<V>>) -> Self {
        let total = entries.iter().map(RawEntry::len).sum();
        let mut points = Vec::with_capacity(total);
        for entry in entries {
            entry.push_points_into(&mut points);
        }
        Self::from_sorted_merge(points)
    }

    fn from_sorted_merge(mut points: Vec<KeyedPoint<V>>) -> Self {
        let point_count = points.len();
        for point in &mut points {
            point.key = canonical_key(point.key);
        }

        // Stable: equal keys keep first-seen order inside their bucket.
        points.sort_by(|a, b| a.key.total_cmp(&b.key));

        let mut buckets: Vec<Bucket<V>> = Vec::with_capacity(points.len());
        for point in points {
            match buckets.last_mut() {
                Some(last) if last.key().total_cmp(&point.key) == Ordering::Equal => {
                    last.push(point);
                }
                _ => buckets.push(Bucket::new(point)),
            }
        }

        // Extremes are scanned rather than read from the ends of `buckets`.
        let min_key = buckets.iter().map(|b| OrderedFloat(b.key())).min();
        let max_key = buckets.iter().map(|b| OrderedFloat(b.key())).max();
        let max_depth = buckets.iter().map(Bucket::depth).max().unwrap_or(0);
        let (offset, range) = match (min_key, max_key) {
            (Some(min), Some(max)) => (min.0, max.0 - min.0),
            _ => (0.0, 0.0),
        };

        debug!(
            point_count,
            bucket_count = buckets.len(),
            max_depth,
            offset,
            range,
            "built data index"
        );

        Self {
            buckets,
            offset,
            range,
            max_depth,
            point_count,
        }
    }

    #[must_use]
    pub fn buckets(&self) -> &[Bucket<V>] {
        &self.buckets
    }

    #[must_use]
    pub fn into_buckets(self) -> Vec<Bucket<V>> {
        self.buckets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Minimum key present, `0.0` when empty.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// `max key - min key`, `0.0` when empty or single-keyed.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Range usable by a coordinate mapper; `None` while the index is empty.
    #[must_use]
    pub fn mapped_range(&self) -> Option<f64> {
        if self.buckets.is_empty() {
            None
        } else {
            Some(self.range)
        }
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Total number of points across all buckets.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Position of the bucket whose key equals `key`.
    #[must_use]
    pub fn lookup(&self, key: f64) -> Option<usize> {
        find_by_key(&self.buckets, canonical_key(key), Bucket::key)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Bucket<V>> {
        self.buckets.get(position)
    }

    #[must_use]
    pub fn bucket_for_key(&self, key: f64) -> Option<&Bucket<V>> {
        self.lookup(key).and_then(|position| self.buckets.get(position))
    }

    /// Buckets whose key lies inside the inclusive window `[start, end]`.
    #[must_use]
    pub fn buckets_in_key_range(&self, start: f64, end: f64) -> &[Bucket<V>] {
        buckets_in_key_window(&self.buckets, start, end)
    }
}

fn check_entries<V>(entries: &[RawEntry<V>], policy: EmptyDataPolicy) -> BarViewResult<()> {
    let total: usize = entries.iter().map(RawEntry::len).sum();
    if total == 0 && policy == EmptyDataPolicy::Reject {
        return Err(BarViewError::EmptyData);
    }
    validate_keys(entries.iter().flat_map(|entry| entry.points()))
}

fn validate_keys<'a, V: 'a>(points: impl Iterator<Item = &'a KeyedPoint<V>>) -> BarViewResult<()> {
    let mut extremes: Option<(f64, f64)> = None;
    for point in points {
        let key = point.key;
        if !key.is_finite() {
            return Err(BarViewError::InvalidData(format!(
                "keys must be finite, got {key}"
            )));
        }
        extremes = Some(match extremes {
            Some((min, max)) => (min.min(key), max.max(key)),
            None => (key, key),
        });
    }

    if let Some((min, max)) = extremes {
        if !(max - min).is_finite() {
            return Err(BarViewError::InvalidData(format!(
                "key span from {min} to {max} overflows f64"
            )));
        }
    }
    Ok(())
}
