//! Unit tests for column position computation.

use rstest::rstest;

use crate::board::domain::next_position;

#[rstest]
fn empty_column_starts_at_zero() {
    assert_eq!(next_position([]), 0);
}

#[rstest]
#[case(vec![0], 1)]
#[case(vec![0, 1, 2], 3)]
#[case(vec![0, 3], 4)]
#[case(vec![5, 2, 9], 10)]
fn appends_past_the_maximum(#[case] positions: Vec<i64>, #[case] expected: i64) {
    assert_eq!(next_position(positions), expected);
}

#[rstest]
fn gaps_are_preserved_not_compacted() {
    // Deleting mid-column leaves gaps; appends never reuse them.
    assert_eq!(next_position(vec![0, 7, 12]), 13);
}

#[rstest]
fn serialized_appends_stay_distinct() {
    let mut positions: Vec<i64> = Vec::new();
    for _ in 0..10 {
        let next = next_position(positions.iter().copied());
        assert!(!positions.contains(&next));
        positions.push(next);
    }
    assert_eq!(positions, (0..10).collect::<Vec<i64>>());
}

#[rstest]
fn maximum_position_saturates() {
    assert_eq!(next_position(vec![i64::MAX]), i64::MAX);
}
