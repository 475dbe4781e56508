use proptest::prelude::*;

use coloracle::catalog::Column;
use coloracle::common::{Bound, PositionSet, Value};
use coloracle::query::executor::{fetch, select, select_fetched};

fn column_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-50i64..50, 0..200)
}

fn bound_strategy() -> impl Strategy<Value = Bound> {
    prop_oneof![
        1 => Just(Bound::Unbounded),
        4 => (-60i64..60).prop_map(|v| Bound::At(Value::Int(v))),
    ]
}

fn positions_strategy(len: usize) -> impl Strategy<Value = PositionSet> {
    prop::collection::vec(any::<bool>(), len).prop_map(|keep| {
        let positions = keep
            .iter()
            .enumerate()
            .filter(|(_, k)| **k)
            .map(|(i, _)| i)
            .collect();
        PositionSet::from_sorted(positions).unwrap_or_default()
    })
}

fn admits(v: i64, low: &Bound, high: &Bound) -> bool {
    let v = Value::Int(v);
    let above_low = match low {
        Bound::Unbounded => true,
        Bound::At(l) => v >= *l,
    };
    let below_high = match high {
        Bound::Unbounded => true,
        Bound::At(h) => v < *h,
    };
    above_low && below_high
}

proptest! {
    /// A position is selected exactly when low <= value < high
    #[test]
    fn half_open_law(
        values in column_strategy(),
        low in bound_strategy(),
        high in bound_strategy(),
    ) {
        let column = Column::from_ints("col1", values.iter().copied());
        let selected = select(&column, low, high, None).unwrap();

        let expected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| admits(**v, &low, &high))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(selected.as_slice(), expected.as_slice());
    }

    /// Chained selection equals the intersection of independent selections
    #[test]
    fn chained_select_is_intersection(
        (a, b) in (1usize..150).prop_flat_map(|n| (
            prop::collection::vec(-50i64..50, n),
            prop::collection::vec(-50i64..50, n),
        )),
        (l1, h1) in (-60i64..60, -60i64..60),
        (l2, h2) in (-60i64..60, -60i64..60),
    ) {
        let col1 = Column::from_ints("col1", a);
        let col2 = Column::from_ints("col2", b);

        let first = select(&col1, Bound::at(l1), Bound::at(h1), None).unwrap();
        let chained = select(&col2, Bound::at(l2), Bound::at(h2), Some(&first)).unwrap();

        let independent = select(&col2, Bound::at(l2), Bound::at(h2), None).unwrap();
        prop_assert_eq!(chained, first.intersect(&independent));
    }

    /// Selecting on a column restricted to positions agrees with selecting on
    /// the values fetched from it
    #[test]
    fn column_and_fetched_forms_agree(
        (values, positions) in (0usize..150).prop_flat_map(|n| (
            prop::collection::vec(-50i64..50, n),
            positions_strategy(n),
        )),
        low in bound_strategy(),
        high in bound_strategy(),
    ) {
        let column = Column::from_ints("col1", values);
        let fetched = fetch(&column, &positions).unwrap();

        let by_column = select(&column, low, high, Some(&positions)).unwrap();
        let by_values = select_fetched(&positions, &fetched, low, high).unwrap();
        prop_assert_eq!(by_column, by_values);
    }

    /// Fetch yields one value per position, in position order
    #[test]
    fn fetch_order_and_length(
        (values, positions) in (0usize..150).prop_flat_map(|n| (
            prop::collection::vec(any::<i64>(), n),
            positions_strategy(n),
        )),
    ) {
        let column = Column::from_ints("col2", values.iter().copied());
        let fetched = fetch(&column, &positions).unwrap();

        prop_assert_eq!(fetched.len(), positions.len());
        for (v, pos) in fetched.iter().zip(positions.iter()) {
            prop_assert_eq!(*v, Value::Int(values[pos]));
        }
    }
}

#[test]
fn test_fetch_rejects_foreign_positions() {
    let short = Column::from_ints("col1", [1, 2, 3]);
    let positions = PositionSet::all(5);
    assert!(fetch(&short, &positions).is_err());
    assert!(select(&short, Bound::Unbounded, Bound::Unbounded, Some(&positions)).is_err());
}
