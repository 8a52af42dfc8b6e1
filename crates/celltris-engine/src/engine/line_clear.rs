use arrayvec::ArrayVec;

use crate::core::Board;

/// Bonus awarded for clearing 0, 1, 2, 3 or 4 rows with a single lock.
const SCORE_TABLE: [u32; 5] = [0, 100, 400, 1600, 6400];

/// Points awarded for clearing `count` rows at once.
///
/// # Panics
///
/// Panics if `count` is more than four.
#[must_use]
pub(crate) fn bonus(count: usize) -> u32 {
    SCORE_TABLE[count]
}

/// Removes every complete row among the four rows ending at
/// `last_locked_row` and returns how many were removed.
///
/// A locked piece spans at most four rows with its bottom edge on
/// `last_locked_row`, so no other row can have been completed by the lock.
/// Rows are removed top to bottom: each removal only shifts rows above it,
/// so the remaining candidates keep their indices.
pub(crate) fn clear_completed_lines(board: &mut Board, last_locked_row: i32) -> usize {
    let completed: ArrayVec<usize, 4> = (last_locked_row - 3..=last_locked_row)
        .filter(|&y| board.is_row_complete(y))
        .filter_map(|y| usize::try_from(y).ok())
        .collect();
    for &row in &completed {
        board.clear_row(row);
    }
    completed.len()
}
