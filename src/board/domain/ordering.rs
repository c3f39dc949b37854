//! Position computation for column membership changes.

/// Computes the position for a task entering a status column.
///
/// Returns one past the largest position currently in the column, or `0`
/// when the column is empty. Positions are not required to be contiguous;
/// absolute values are never surfaced, only relative order via ascending
/// sort, so repeated moves growing the values monotonically is acceptable.
///
/// When the supplied positions come from a stale client snapshot, a
/// concurrent writer can be assigned the same value; listing order breaks
/// such ties by creation time and id.
#[must_use]
pub fn next_position(positions: impl IntoIterator<Item = i64>) -> i64 {
    positions
        .into_iter()
        .max()
        .map_or(0, |max| max.saturating_add(1))
}
