use std::collections::BTreeMap;

use bar_view::core::{BuildOptions, DataIndex, EmptyDataPolicy, KeyedPoint, RawEntry};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = RawEntry<u32>> {
    // Small integer keys force plenty of duplicates.
    let point = (-20i32..20, any::<u32>())
        .prop_map(|(key, value)| KeyedPoint::new(f64::from(key), value));
    prop_oneof![
        3 => point.clone().prop_map(RawEntry::Point),
        1 => prop::collection::vec(point, 0..4).prop_map(RawEntry::Group),
    ]
}

fn flattened(entries: &[RawEntry<u32>]) -> Vec<KeyedPoint<u32>> {
    entries
        .iter()
        .flat_map(|entry| entry.points().copied())
        .collect()
}

proptest! {
    #[test]
    fn built_buckets_are_strictly_ascending(entries in prop::collection::vec(entry_strategy(), 0..64)) {
        let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");
        for pair in index.buckets().windows(2) {
            prop_assert!(pair[0].key() < pair[1].key());
        }
    }

    #[test]
    fn build_preserves_every_point(entries in prop::collection::vec(entry_strategy(), 0..64)) {
        let expected = flattened(&entries).len();
        let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");

        let depth_sum: usize = index.buckets().iter().map(|bucket| bucket.depth()).sum();
        prop_assert_eq!(depth_sum, expected);
        prop_assert_eq!(index.point_count(), expected);
    }

    #[test]
    fn buckets_keep_first_seen_order(entries in prop::collection::vec(entry_strategy(), 0..64)) {
        let mut expected: BTreeMap<i64, Vec<u32>> = BTreeMap::new();
        for point in flattened(&entries) {
            expected.entry(point.key as i64).or_default().push(point.value);
        }

        let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");
        prop_assert_eq!(index.len(), expected.len());
        for (bucket, (key, values)) in index.buckets().iter().zip(expected) {
            prop_assert_eq!(bucket.key() as i64, key);
            let actual: Vec<u32> = bucket.points().iter().map(|point| point.value).collect();
            prop_assert_eq!(actual, values);
        }
    }

    #[test]
    fn metadata_matches_a_direct_scan(entries in prop::collection::vec(entry_strategy(), 1..64)) {
        let points = flattened(&entries);
        prop_assume!(!points.is_empty());
        let min = points.iter().map(|point| point.key).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|point| point.key).fold(f64::NEG_INFINITY, f64::max);

        let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");
        prop_assert_eq!(index.offset(), min);
        prop_assert_eq!(index.range(), max - min);
        let deepest = index.buckets().iter().map(|bucket| bucket.depth()).max().unwrap_or(0);
        prop_assert_eq!(index.max_depth(), deepest);
    }

    #[test]
    fn lookup_finds_every_present_key(entries in prop::collection::vec(entry_strategy(), 0..64)) {
        let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");
        for (position, bucket) in index.buckets().iter().enumerate() {
            prop_assert_eq!(index.lookup(bucket.key()), Some(position));
            prop_assert_eq!(index.lookup(bucket.key() + 0.5), None);
        }
    }

    #[test]
    fn copy_and_in_place_builds_agree(entries in prop::collection::vec(entry_strategy(), 0..64)) {
        let mut copied = entries.clone();
        let mut in_place = entries.clone();

        let from_copy = DataIndex::build(&mut copied, BuildOptions::default()).expect("copy build");
        let from_in_place = DataIndex::build(
            &mut in_place,
            BuildOptions { copy: false, empty_data: EmptyDataPolicy::Accept },
        )
        .expect("in-place build");

        prop_assert_eq!(&copied, &entries);
        prop_assert_eq!(&from_copy, &from_in_place);
        prop_assert_eq!(in_place.len(), from_in_place.len());

        let rebuilt = DataIndex::from_entries(in_place, EmptyDataPolicy::Accept).expect("rebuild");
        prop_assert_eq!(rebuilt, from_in_place);
    }
}
