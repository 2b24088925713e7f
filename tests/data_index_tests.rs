use bar_view::core::{
    BuildOptions, DataIndex, EmptyDataPolicy, KeyedPoint, RawEntry,
};
use bar_view::error::BarViewError;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

fn point(key: f64, value: i32) -> RawEntry<i32> {
    RawEntry::Point(KeyedPoint::new(key, value))
}

fn scenario_a_input() -> Vec<RawEntry<i32>> {
    vec![point(0.0, 0), point(1.0, 1), point(1.0, 2)]
}

fn values_of(index: &DataIndex<i32>, position: usize) -> Vec<i32> {
    index
        .get(position)
        .expect("bucket exists")
        .points()
        .iter()
        .map(|point| point.value)
        .collect()
}

#[test]
fn copy_build_groups_duplicates_and_leaves_input_untouched() {
    let mut input = scenario_a_input();
    let original = input.clone();

    let index = DataIndex::build(&mut input, BuildOptions::default()).expect("build");

    assert_eq!(input, original);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get(0).expect("first").key(), 0.0);
    assert_eq!(values_of(&index, 0), vec![0]);
    assert_eq!(index.get(1).expect("second").key(), 1.0);
    assert_eq!(values_of(&index, 1), vec![1, 2]);
    assert_eq!(index.max_depth(), 2);
    assert_eq!(index.offset(), 0.0);
    assert_eq!(index.range(), 1.0);
    assert_eq!(index.point_count(), 3);
}

#[test]
fn empty_input_is_accepted_with_zeroed_metadata() {
    let mut input: Vec<RawEntry<i32>> = Vec::new();
    let index = DataIndex::build(&mut input, BuildOptions::default()).expect("empty accepted");

    assert!(index.is_empty());
    assert_eq!(index.offset(), 0.0);
    assert_eq!(index.range(), 0.0);
    assert_eq!(index.max_depth(), 0);
    assert_eq!(index.mapped_range(), None);
}

#[test]
fn empty_input_is_rejected_under_reject_policy() {
    let mut input: Vec<RawEntry<i32>> = vec![RawEntry::Group(Vec::new())];
    let options = BuildOptions {
        copy: true,
        empty_data: EmptyDataPolicy::Reject,
    };

    let err = DataIndex::build(&mut input, options).expect_err("empty rejected");
    assert!(matches!(err, BarViewError::EmptyData));

    let err = DataIndex::<i32>::from_points(Vec::new(), EmptyDataPolicy::Reject)
        .expect_err("empty rejected");
    assert!(matches!(err, BarViewError::EmptyData));
}

#[test]
fn lookup_finds_present_keys_and_reports_absent_ones() {
    let index = DataIndex::from_entries(scenario_a_input(), EmptyDataPolicy::Accept)
        .expect("build");

    assert_eq!(index.lookup(1.0), Some(1));
    assert_eq!(index.lookup(0.0), Some(0));
    assert_eq!(index.lookup(42.0), None);
    assert_eq!(index.lookup(0.5), None);
    assert_eq!(index.lookup(f64::NAN), None);
}

#[test]
fn lookup_handles_empty_and_single_element_indexes() {
    let empty = DataIndex::<i32>::default();
    assert_eq!(empty.lookup(0.0), None);

    let single = DataIndex::from_points(vec![KeyedPoint::new(7.0, 1)], EmptyDataPolicy::Reject)
        .expect("build");
    assert_eq!(single.lookup(7.0), Some(0));
    assert_eq!(single.lookup(6.0), None);
    assert_eq!(single.lookup(8.0), None);
    assert_eq!(single.range(), 0.0);
    assert_eq!(single.offset(), 7.0);
    assert_eq!(single.max_depth(), 1);
}

#[test]
fn lookup_covers_first_last_and_gaps_in_larger_index() {
    let points = (0..50).map(|i| KeyedPoint::new(f64::from(i) * 3.0, i)).collect();
    let index = DataIndex::from_points(points, EmptyDataPolicy::Accept).expect("build");

    assert_eq!(index.lookup(0.0), Some(0));
    assert_eq!(index.lookup(147.0), Some(49));
    for i in 0..49 {
        assert_eq!(index.lookup(f64::from(i) * 3.0 + 1.0), None);
        assert_eq!(index.lookup(f64::from(i) * 3.0), Some(i as usize));
    }
}

#[test]
fn in_place_build_rewrites_caller_entries_into_normalized_form() {
    let mut input = vec![point(3.0, 30), point(1.0, 10), point(3.0, 31), point(2.0, 20)];
    let options = BuildOptions {
        copy: false,
        empty_data: EmptyDataPolicy::Accept,
    };

    let index = DataIndex::build(&mut input, options).expect("build");

    assert_eq!(index.len(), 3);
    assert_eq!(
        input,
        vec![
            point(1.0, 10),
            point(2.0, 20),
            RawEntry::Group(vec![KeyedPoint::new(3.0, 30), KeyedPoint::new(3.0, 31)]),
        ]
    );
}

#[test]
fn in_place_build_leaves_input_untouched_on_error() {
    let mut input = vec![point(2.0, 1), point(f64::INFINITY, 2)];
    let original = input.clone();
    let options = BuildOptions {
        copy: false,
        empty_data: EmptyDataPolicy::Accept,
    };

    let err = DataIndex::build(&mut input, options).expect_err("non-finite key");
    assert!(matches!(err, BarViewError::InvalidData(_)));
    assert_eq!(input, original);
}

#[test]
fn nested_groups_are_flattened_and_bucketed_by_each_point_key() {
    let entries = vec![
        RawEntry::Group(vec![KeyedPoint::new(5.0, 1), KeyedPoint::new(5.0, 2)]),
        point(5.0, 3),
        RawEntry::Group(vec![KeyedPoint::new(1.0, 4), KeyedPoint::new(9.0, 5)]),
    ];

    let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");

    assert_eq!(index.len(), 3);
    assert_eq!(values_of(&index, 0), vec![4]);
    assert_eq!(values_of(&index, 1), vec![1, 2, 3]);
    assert_eq!(values_of(&index, 2), vec![5]);
    assert_eq!(index.max_depth(), 3);
    assert_eq!(index.offset(), 1.0);
    assert_eq!(index.range(), 8.0);
}

#[test]
fn duplicates_keep_first_seen_order_across_unsorted_input() {
    let entries = vec![
        point(2.0, 1),
        point(1.0, 2),
        point(2.0, 3),
        point(0.0, 4),
        point(2.0, 5),
        point(1.0, 6),
    ];

    let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");

    assert_eq!(values_of(&index, 0), vec![4]);
    assert_eq!(values_of(&index, 1), vec![2, 6]);
    assert_eq!(values_of(&index, 2), vec![1, 3, 5]);
}

#[test]
fn negative_zero_shares_a_bucket_with_zero() {
    let entries = vec![point(0.0, 1), point(-0.0, 2)];
    let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");

    assert_eq!(index.len(), 1);
    assert_eq!(index.max_depth(), 2);
    assert_eq!(index.lookup(-0.0), Some(0));
}

#[test]
fn nan_keys_are_rejected() {
    let err = DataIndex::from_entries(vec![point(f64::NAN, 1)], EmptyDataPolicy::Accept)
        .expect_err("nan rejected");
    assert!(matches!(err, BarViewError::InvalidData(_)));
}

#[test]
fn key_span_that_overflows_is_rejected_at_build_time() {
    let err = DataIndex::from_entries(
        vec![point(-1e308, 1), point(1e308, 2)],
        EmptyDataPolicy::Accept,
    )
    .expect_err("span overflows");
    assert!(matches!(err, BarViewError::InvalidData(_)));

    let mut input = vec![point(f64::MAX, 1), point(-f64::MAX, 2)];
    let original = input.clone();
    let options = BuildOptions {
        copy: false,
        empty_data: EmptyDataPolicy::Accept,
    };
    assert!(DataIndex::build(&mut input, options).is_err());
    assert_eq!(input, original);

    let wide =
        DataIndex::from_entries(vec![point(0.0, 1), point(1e308, 2)], EmptyDataPolicy::Accept)
            .expect("finite span");
    assert_eq!(wide.range(), 1e308);
}

#[test]
fn key_range_queries_are_inclusive() {
    let points = (0..10).map(|i| KeyedPoint::new(f64::from(i), i)).collect();
    let index = DataIndex::from_points(points, EmptyDataPolicy::Accept).expect("build");

    let window = index.buckets_in_key_range(2.0, 5.0);
    let keys: Vec<f64> = window.iter().map(|bucket| bucket.key()).collect();
    assert_eq!(keys, vec![2.0, 3.0, 4.0, 5.0]);

    let reversed = index.buckets_in_key_range(5.0, 2.0);
    assert_eq!(reversed.len(), 4);

    assert!(index.buckets_in_key_range(20.0, 30.0).is_empty());
    assert!(index.buckets_in_key_range(2.5, 2.7).is_empty());
}

#[test]
fn bucket_for_key_returns_the_bucket() {
    let index = DataIndex::from_entries(scenario_a_input(), EmptyDataPolicy::Accept)
        .expect("build");

    let bucket = index.bucket_for_key(1.0).expect("bucket");
    assert_eq!(bucket.depth(), 2);
    assert_eq!(bucket.first().value, 1);
    assert!(index.bucket_for_key(2.0).is_none());
}

#[test]
fn datetime_and_decimal_keys_convert_to_f64() {
    let time = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid time");
    let dated = KeyedPoint::from_datetime(time, 1);
    assert_eq!(dated.key, 1_704_067_200.0);

    let decimal = KeyedPoint::from_decimal_key(Decimal::new(1_250, 2), 2).expect("decimal key");
    assert_eq!(decimal.key, 12.5);

    let index = DataIndex::from_points(vec![dated, decimal], EmptyDataPolicy::Accept)
        .expect("build");
    assert_eq!(index.offset(), 12.5);
    assert_eq!(index.range(), 1_704_067_200.0 - 12.5);
}

#[test]
fn raw_entries_deserialize_from_points_and_groups() {
    let json = r#"[
        {"key": 2, "value": "b"},
        [{"key": 1, "value": "a1"}, {"key": 1, "value": "a2"}]
    ]"#;
    let entries: Vec<RawEntry<String>> = serde_json::from_str(json).expect("parse");

    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0], RawEntry::Point(_)));
    assert_eq!(entries[1].len(), 2);

    let index = DataIndex::from_entries(entries, EmptyDataPolicy::Accept).expect("build");
    assert_eq!(index.len(), 2);
    assert_eq!(index.get(0).expect("first").first().value, "a1");
}
