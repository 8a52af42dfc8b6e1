pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Board height in cells.
pub const BOARD_HEIGHT: usize = 20;

/// Column at which freshly spawned pieces place their mask origin.
#[expect(clippy::cast_possible_wrap)]
pub const SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32;
/// Row of the mask's bottom edge for freshly spawned pieces.
///
/// One row above the visible board, so a new piece is always entirely in open
/// sky and drops into view on the first successful descent.
pub const SPAWN_Y: i32 = -1;
