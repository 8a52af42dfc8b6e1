use crate::{
    core::{Board, Marker, PieceId, SPAWN_X, SPAWN_Y},
    engine::{line_clear, piece_generator::PieceGenerator},
};

/// Horizontal offsets tried, in order, when a rotation is blocked.
///
/// Rightward kicks are tried before leftward ones.
const KICK_OFFSETS: [i32; 7] = [0, 1, 2, 3, -1, -2, -3];

/// Everything needed to describe one game in progress.
///
/// The falling piece is kept outside the board until it locks. Every
/// mutation that would leave the falling piece overlapping a block or
/// outside the side walls is rejected before it is applied.
///
/// # Example
///
/// ```
/// use celltris_engine::{GameState, PieceGenerator, PieceSeed};
///
/// let mut pieces = PieceGenerator::with_seed(PieceSeed::from(1));
/// let mut state = GameState::new(&mut pieces);
///
/// state.try_move_left();
/// state.try_rotate();
/// while state.try_move_down() {}
///
/// assert!(!state.is_game_over());
/// let landed_y = state.lock_piece(&mut pieces);
/// state.clear_completed_lines(landed_y);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_piece: PieceId,
    next_piece: PieceId,
    piece_x: i32,
    piece_y: i32,
    score: u32,
    lines: u32,
}

impl GameState {
    /// Starts a fresh game: empty board, zero score, two random pieces.
    #[must_use]
    pub fn new(pieces: &mut PieceGenerator) -> Self {
        let next_piece = pieces.next_piece();
        let current_piece = pieces.next_piece();
        Self {
            board: Board::EMPTY,
            current_piece,
            next_piece,
            piece_x: SPAWN_X,
            piece_y: SPAWN_Y,
            score: 0,
            lines: 0,
        }
    }

    /// Assembles a state from already-validated parts.
    pub(crate) fn from_parts(
        board: Board,
        current_piece: PieceId,
        next_piece: PieceId,
        (piece_x, piece_y): (i32, i32),
        score: u32,
        lines: u32,
    ) -> Self {
        Self {
            board,
            current_piece,
            next_piece,
            piece_x,
            piece_y,
            score,
            lines,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> PieceId {
        self.current_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceId {
        self.next_piece
    }

    #[must_use]
    pub fn piece_x(&self) -> i32 {
        self.piece_x
    }

    #[must_use]
    pub fn piece_y(&self) -> i32 {
        self.piece_y
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Board coordinates and marker of every cell of the falling piece,
    /// including cells still above the visible board.
    pub fn falling_cells(&self) -> impl Iterator<Item = (i32, i32, Marker)> + '_ {
        let marker = self.current_piece.marker();
        self.current_piece
            .filled_cells()
            .map(move |(mx, my)| (self.piece_x + mx, self.piece_y - my, marker))
    }

    fn fits(&self, piece: PieceId, x: i32, y: i32) -> bool {
        self.board.fits(piece, x, y)
    }

    /// Moves the falling piece down one row if it fits there.
    ///
    /// Returns `false` when the piece has landed; the state is unchanged then.
    pub fn try_move_down(&mut self) -> bool {
        if !self.fits(self.current_piece, self.piece_x, self.piece_y + 1) {
            return false;
        }
        self.piece_y += 1;
        true
    }

    /// Moves the falling piece one column left if it fits there.
    pub fn try_move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    /// Moves the falling piece one column right if it fits there.
    pub fn try_move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        if !self.fits(self.current_piece, self.piece_x + dx, self.piece_y) {
            return false;
        }
        self.piece_x += dx;
        true
    }

    /// Rotates the falling piece to its next orientation, kicking it up to
    /// three columns sideways if the rotated piece is blocked in place.
    ///
    /// Returns `false`, leaving the state unchanged, if no offset fits.
    pub fn try_rotate(&mut self) -> bool {
        let rotated = self.current_piece.next_rotation();
        let Some(offset) = KICK_OFFSETS
            .into_iter()
            .find(|&dx| self.fits(rotated, self.piece_x + dx, self.piece_y))
        else {
            return false;
        };
        self.current_piece = rotated;
        self.piece_x += offset;
        true
    }

    /// Returns `true` if any cell of the falling piece is above the board.
    ///
    /// Only meaningful right after [`Self::try_move_down`] has failed.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.falling_cells().any(|(_, y, _)| y < 0)
    }

    /// Writes the falling piece into the board and spawns the next piece.
    ///
    /// Returns the row the locked piece's bottom edge landed on, which is
    /// what [`Self::clear_completed_lines`] needs afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the falling piece does not fit where it is, or if any of its
    /// cells is above the board (callers check [`Self::is_game_over`] first).
    pub fn lock_piece(&mut self, pieces: &mut PieceGenerator) -> i32 {
        assert!(
            self.fits(self.current_piece, self.piece_x, self.piece_y),
            "falling piece {:?} overlaps the board at ({}, {})",
            self.current_piece,
            self.piece_x,
            self.piece_y,
        );
        let landed_y = self.piece_y;
        let marker = self.current_piece.marker();
        for (mx, my) in self.current_piece.filled_cells() {
            self.board
                .fill_cell(self.piece_x + mx, self.piece_y - my, marker);
        }

        self.current_piece = self.next_piece;
        self.next_piece = pieces.next_piece();
        self.piece_x = SPAWN_X;
        self.piece_y = SPAWN_Y;
        landed_y
    }

    /// Removes completed rows among the four rows ending at `last_locked_row`
    /// and awards lines and score for them.
    ///
    /// Returns the number of rows removed.
    pub fn clear_completed_lines(&mut self, last_locked_row: i32) -> usize {
        let cleared = line_clear::clear_completed_lines(&mut self.board, last_locked_row);
        // at most four rows can complete at once
        #[expect(clippy::cast_possible_truncation)]
        let cleared_u32 = cleared as u32;
        self.lines = self.lines.saturating_add(cleared_u32);
        self.score = self.score.saturating_add(line_clear::bonus(cleared));
        cleared
    }

    /// Awards points for a downward movement attempt.
    pub(crate) fn award_drop_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }
}
