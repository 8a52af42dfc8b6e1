use super::{BOARD_HEIGHT, BOARD_WIDTH, piece::PieceId};

/// Printable character stored in an occupied board cell.
///
/// Only bytes in the printable ASCII range `'!'..='~'` are valid markers; the
/// marker carries rendering identity only, gameplay never distinguishes
/// between marker values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(u8);

impl Marker {
    /// Creates a marker from a raw byte, or `None` if the byte is not printable.
    ///
    /// # Examples
    ///
    /// ```
    /// use celltris_engine::Marker;
    ///
    /// assert!(Marker::new(b'#').is_some());
    /// assert!(Marker::new(b' ').is_none());
    /// assert!(Marker::new(0x7f).is_none());
    /// ```
    #[must_use]
    pub const fn new(byte: u8) -> Option<Self> {
        if byte.is_ascii_graphic() {
            Some(Self(byte))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// No block.
    #[default]
    Empty,
    /// Locked block drawn with the given marker.
    Filled(Marker),
}

impl Block {
    /// Byte written for empty cells in persisted snapshots.
    pub const EMPTY_BYTE: u8 = b' ';

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Decodes a persisted cell byte.
    ///
    /// `0` and `' '` are both accepted as empty. Returns `None` for bytes that
    /// are neither empty nor printable.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 | Self::EMPTY_BYTE => Some(Block::Empty),
            _ => match Marker::new(byte) {
                Some(marker) => Some(Block::Filled(marker)),
                None => None,
            },
        }
    }

    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Block::Empty => Self::EMPTY_BYTE,
            Block::Filled(marker) => marker.as_byte(),
        }
    }
}

type BoardRow = [Block; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Block::Empty; BOARD_WIDTH];

/// The fixed-size playing field.
///
/// Row 0 is the top visible row; coordinates above it (`y < 0`) are "open sky"
/// and always available to a falling piece, while coordinates left, right or
/// below the grid are never available.
///
/// # Example
///
/// ```
/// use celltris_engine::{Board, PieceId};
///
/// let board = Board::EMPTY;
/// let bar = PieceId::new(0).unwrap();
///
/// assert!(board.fits(bar, 3, 19));
/// assert!(!board.fits(bar, 3, 20));
/// assert!(board.fits(bar, 3, -5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;
    /// Number of cells on the board.
    pub const CELLS: usize = BOARD_WIDTH * BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns an iterator over the rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Returns the row at `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a board row.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Block; BOARD_WIDTH] {
        &self.rows[y]
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Block> {
        let (x, y) = cell_index(x, y)?;
        Some(self.rows[y][x])
    }

    /// Returns `true` iff `(x, y)` lies on the board and holds a block.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|block| !block.is_empty())
    }

    /// Returns `true` if a falling piece cell may occupy `(x, y)`.
    #[must_use]
    pub fn is_available(&self, x: i32, y: i32) -> bool {
        if !column_in_bounds(x) {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.get(x, y).is_some_and(Block::is_empty)
    }

    /// Returns `true` if piece `piece` with its mask origin at `(x, y)` lies
    /// entirely on available cells.
    #[must_use]
    pub fn fits(&self, piece: PieceId, x: i32, y: i32) -> bool {
        piece
            .filled_cells()
            .all(|(mx, my)| self.is_available(x + mx, y - my))
    }

    /// Returns `true` if every column of row `y` is occupied.
    ///
    /// Rows outside the board are never complete.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn is_row_complete(&self, y: i32) -> bool {
        (0..BOARD_WIDTH as i32).all(|x| self.is_occupied(x, y))
    }

    /// Removes `row`, shifting every row above it down by one and emptying
    /// the top row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a board row.
    pub fn clear_row(&mut self, row: usize) {
        assert!(row < BOARD_HEIGHT, "row {row} is outside the board");
        self.rows.copy_within(0..row, 1);
        self.rows[0] = EMPTY_ROW;
    }

    /// Writes `marker` into the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the board.
    pub fn fill_cell(&mut self, x: i32, y: i32, marker: Marker) {
        let (x, y) = cell_index(x, y)
            .unwrap_or_else(|| panic!("cell ({x}, {y}) is outside the board"));
        self.rows[y][x] = Block::Filled(marker);
    }

    /// Returns the board as row-major bytes, `' '` for empty cells.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::CELLS] {
        let mut bytes = [Block::EMPTY_BYTE; Self::CELLS];
        for (dst, block) in bytes.iter_mut().zip(self.rows.iter().flatten()) {
            *dst = block.to_byte();
        }
        bytes
    }

    /// Decodes row-major cell bytes.
    ///
    /// On failure returns the offset and value of the first byte that is
    /// neither empty nor printable.
    pub fn from_bytes(bytes: &[u8; Self::CELLS]) -> Result<Self, (usize, u8)> {
        let mut board = Self::EMPTY;
        for (offset, (dst, &byte)) in board
            .rows
            .iter_mut()
            .flatten()
            .zip(bytes.iter())
            .enumerate()
        {
            *dst = Block::from_byte(byte).ok_or((offset, byte))?;
        }
        Ok(board)
    }
}

fn column_in_bounds(x: i32) -> bool {
    usize::try_from(x).is_ok_and(|x| x < BOARD_WIDTH)
}

fn cell_index(x: i32, y: i32) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)?;
    let y = usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: Marker = match Marker::new(b'#') {
        Some(marker) => marker,
        None => unreachable!(),
    };

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..BOARD_WIDTH as i32 {
            board.fill_cell(x, y, HASH);
        }
    }

    #[test]
    fn test_empty_board_is_available_everywhere_inside() {
        let board = Board::EMPTY;
        for y in 0..BOARD_HEIGHT as i32 {
            for x in 0..BOARD_WIDTH as i32 {
                assert!(board.is_available(x, y), "({x}, {y}) should be available");
                assert!(!board.is_occupied(x, y));
            }
        }
    }

    #[test]
    fn test_open_sky_and_walls() {
        let board = Board::EMPTY;
        assert!(board.is_available(0, -1));
        assert!(board.is_available(9, -100));
        assert!(!board.is_available(-1, -1));
        assert!(!board.is_available(10, -1));
        assert!(!board.is_available(-1, 5));
        assert!(!board.is_available(10, 5));
        assert!(!board.is_available(0, 20));
        assert!(!board.is_occupied(0, -1));
        assert!(!board.is_occupied(0, 20));
    }

    #[test]
    fn test_fill_cell_makes_cell_unavailable() {
        let mut board = Board::EMPTY;
        board.fill_cell(4, 7, HASH);
        assert!(board.is_occupied(4, 7));
        assert!(!board.is_available(4, 7));
        assert_eq!(board.get(4, 7), Some(Block::Filled(HASH)));
        assert_eq!(board.get(4, 20), None);
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_fill_cell_above_board_panics() {
        let mut board = Board::EMPTY;
        board.fill_cell(4, -1, HASH);
    }

    #[test]
    fn test_row_completion() {
        let mut board = Board::EMPTY;
        for x in 0..9 {
            board.fill_cell(x, 19, HASH);
        }
        assert!(!board.is_row_complete(19));
        board.fill_cell(9, 19, HASH);
        assert!(board.is_row_complete(19));
        assert!(!board.is_row_complete(-1));
        assert!(!board.is_row_complete(20));
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let mut board = Board::EMPTY;
        board.fill_cell(0, 0, HASH);
        board.fill_cell(1, 17, HASH);
        board.fill_cell(2, 18, HASH);
        fill_row(&mut board, 19);
        board.fill_cell(3, 19, HASH);

        let before = board.clone();
        board.clear_row(19);

        assert_eq!(board.row(19), before.row(18));
        assert_eq!(board.row(18), before.row(17));
        assert_eq!(board.row(1), before.row(0));
        assert!(board.row(0).iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_row_leaves_rows_below_untouched() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 10);
        board.fill_cell(5, 15, HASH);
        let before = board.clone();

        board.clear_row(10);

        for y in 11..BOARD_HEIGHT {
            assert_eq!(board.row(y), before.row(y));
        }
        assert!(board.row(10).iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_block_byte_decoding() {
        assert_eq!(Block::from_byte(0), Some(Block::Empty));
        assert_eq!(Block::from_byte(b' '), Some(Block::Empty));
        assert_eq!(Block::from_byte(b'='), Marker::new(b'=').map(Block::Filled));
        assert_eq!(Block::from_byte(b'~'), Marker::new(b'~').map(Block::Filled));
        assert_eq!(Block::from_byte(b'\n'), None);
        assert_eq!(Block::from_byte(0x7f), None);
        assert_eq!(Block::from_byte(0xff), None);
    }

    #[test]
    fn test_board_bytes_reject_unprintable_cell() {
        let mut bytes = [b' '; Board::CELLS];
        bytes[42] = 0x07;
        assert_eq!(Board::from_bytes(&bytes), Err((42, 0x07)));
    }

    #[test]
    fn test_board_bytes_preserve_markers() {
        let mut board = Board::EMPTY;
        board.fill_cell(0, 0, HASH);
        board.fill_cell(9, 19, Marker::new(b'%').unwrap());
        let bytes = board.to_bytes();
        assert_eq!(bytes[0], b'#');
        assert_eq!(bytes[Board::CELLS - 1], b'%');
        assert_eq!(bytes[1], b' ');
        assert_eq!(Board::from_bytes(&bytes), Ok(board));
    }
}
