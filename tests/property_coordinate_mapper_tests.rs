use bar_view::core::CoordinateMapper;
use proptest::prelude::*;

proptest! {
    #[test]
    fn display_round_trip_recovers_key(
        offset in -1_000_000.0f64..1_000_000.0,
        range in 0.001f64..1_000_000.0,
        extent in 2.0f64..8_000.0,
        pre in 0.0f64..200.0,
        post in 0.0f64..200.0,
        t in 0.0f64..=1.0,
    ) {
        prop_assume!(extent - pre - post >= 1.0);
        let mapper = CoordinateMapper::configure(Some(range), offset, extent, pre, post)
            .expect("mapper");

        let key = offset + range * t;
        let position = mapper.key_to_display(key).expect("to display");
        let recovered = mapper.display_to_key(position).expect("to key");

        let tolerance = 1e-9 * (offset.abs() + range).max(1.0);
        prop_assert!((recovered - key).abs() <= tolerance, "key={key} recovered={recovered}");
    }

    #[test]
    fn domain_edges_land_on_relief_boundaries(
        offset in -10_000.0f64..10_000.0,
        range in 0.01f64..10_000.0,
        extent in 50.0f64..4_000.0,
        pre in 0.0f64..20.0,
        post in 0.0f64..20.0,
    ) {
        let mapper = CoordinateMapper::configure(Some(range), offset, extent, pre, post)
            .expect("mapper");

        let first = mapper.key_to_display(offset).expect("first");
        let last = mapper.key_to_display(offset + range).expect("last");
        prop_assert!((first - pre).abs() <= 1e-9);
        prop_assert!((last - (extent - post)).abs() <= 1e-6);
    }

    #[test]
    fn mapping_is_monotonic(
        offset in -1_000.0f64..1_000.0,
        range in 0.01f64..1_000.0,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let mapper = CoordinateMapper::configure(Some(range), offset, 800.0, 4.0, 4.0)
            .expect("mapper");
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let lo_px = mapper.key_to_display(offset + range * lo).expect("lo");
        let hi_px = mapper.key_to_display(offset + range * hi).expect("hi");
        prop_assert!(lo_px <= hi_px);
    }
}
