use bar_view::core::SelectionWindow;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum WindowOp {
    Start(f64),
    Size(f64),
    End(f64),
    Drag(f64),
}

fn fraction_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -0.2f64..1.2,
        1 => Just(0.0),
        1 => Just(1.0),
        1 => Just(f64::NAN),
    ]
}

fn op_strategy() -> impl Strategy<Value = WindowOp> {
    prop_oneof![
        fraction_strategy().prop_map(WindowOp::Start),
        fraction_strategy().prop_map(WindowOp::Size),
        fraction_strategy().prop_map(WindowOp::End),
        (-100.0f64..900.0).prop_map(WindowOp::Drag),
    ]
}

fn apply(window: &mut SelectionWindow, op: WindowOp) -> bool {
    match op {
        WindowOp::Start(value) => window.set_start(value).is_ok(),
        WindowOp::Size(value) => window.set_size(value).is_ok(),
        WindowOp::End(value) => window.set_end(value).is_ok(),
        WindowOp::Drag(x) => window.apply_drag_delta(x, 800.0).is_ok(),
    }
}

proptest! {
    #[test]
    fn window_stays_inside_unit_range(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let mut window = SelectionWindow::default();
        for op in ops {
            apply(&mut window, op);
            prop_assert!(window.start() >= 0.0 && window.start() < 1.0);
            prop_assert!(window.size() > 0.0 && window.size() <= 1.0);
            prop_assert!(window.start() + window.size() <= 1.0);
        }
    }

    #[test]
    fn end_at_right_edge_always_fits(start in 0.0f64..0.999_999) {
        let mut window = SelectionWindow::new(start, 1e-6).expect("window");
        let change = window.set_end(1.0).expect("right edge");
        prop_assert!(window.start() + window.size() <= 1.0);
        prop_assert!(window.size() > 0.0);
        prop_assert_eq!(change.new_value, window.end());
    }

    #[test]
    fn failed_mutations_leave_state_unchanged(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let mut window = SelectionWindow::default();
        for op in ops {
            let before = window.bounds();
            if !apply(&mut window, op) {
                prop_assert_eq!(window.bounds(), before);
            }
        }
    }
}
