use serde::{Serialize, Serializer};

use crate::{
    core::{BOARD_HEIGHT, BOARD_WIDTH, Board, PieceId, SPAWN_Y},
    engine::game_state::GameState,
};

const BOARD_OFFSET: usize = 0;
const NEXT_PIECE_OFFSET: usize = BOARD_OFFSET + Board::CELLS;
const PIECE_X_OFFSET: usize = NEXT_PIECE_OFFSET + 1;
const PIECE_Y_OFFSET: usize = PIECE_X_OFFSET + 4;
const CURRENT_PIECE_OFFSET: usize = PIECE_Y_OFFSET + 4;
const SCORE_OFFSET: usize = CURRENT_PIECE_OFFSET + 1;
const LINES_OFFSET: usize = SCORE_OFFSET + 4;

/// Reasons a quicksave is refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("quicksave is {actual} bytes long, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[display("piece x position {x} is off the board")]
    PieceX { x: i32 },
    #[display("piece y position {y} is off the board")]
    PieceY { y: i32 },
    #[display("{field} index {index} is not a known piece")]
    PieceIndex { field: &'static str, index: u8 },
    #[display("board cell {offset} holds unprintable byte {byte:#04x}")]
    Cell { offset: usize, byte: u8 },
    #[display("{field} is negative ({value})")]
    NegativeCounter { field: &'static str, value: i32 },
    #[display("falling piece overlaps the board at ({x}, {y})")]
    Overlap { x: i32, y: i32 },
}

/// Raw, untrusted contents of a quicksave.
///
/// Fields hold exactly what was read; nothing is checked until
/// [`Snapshot::validate`] or [`Snapshot::into_state`] is called.
///
/// # Example
///
/// ```
/// use celltris_engine::{GameState, PieceGenerator, PieceSeed, Snapshot};
///
/// let mut pieces = PieceGenerator::with_seed(PieceSeed::from(3));
/// let state = GameState::new(&mut pieces);
///
/// let bytes = Snapshot::from_state(&state).to_bytes();
/// assert_eq!(bytes.len(), Snapshot::LEN);
///
/// let restored = Snapshot::from_bytes(&bytes).unwrap().into_state().unwrap();
/// assert_eq!(restored, state);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    #[serde(serialize_with = "serialize_board")]
    pub board: [u8; Board::CELLS],
    pub next_piece: u8,
    pub piece_x: i32,
    pub piece_y: i32,
    pub current_piece: u8,
    pub score: i32,
    pub lines: i32,
}

impl Snapshot {
    /// Size of an encoded snapshot in bytes.
    pub const LEN: usize = LINES_OFFSET + 4;

    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            board: state.board().to_bytes(),
            next_piece: state.next_piece().index(),
            piece_x: state.piece_x(),
            piece_y: state.piece_y(),
            current_piece: state.current_piece().index(),
            score: saturating_i32(state.score()),
            lines: saturating_i32(state.lines()),
        }
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0; Self::LEN];
        bytes[BOARD_OFFSET..NEXT_PIECE_OFFSET].copy_from_slice(&self.board);
        bytes[NEXT_PIECE_OFFSET] = self.next_piece;
        bytes[PIECE_X_OFFSET..PIECE_Y_OFFSET].copy_from_slice(&self.piece_x.to_le_bytes());
        bytes[PIECE_Y_OFFSET..CURRENT_PIECE_OFFSET].copy_from_slice(&self.piece_y.to_le_bytes());
        bytes[CURRENT_PIECE_OFFSET] = self.current_piece;
        bytes[SCORE_OFFSET..LINES_OFFSET].copy_from_slice(&self.score.to_le_bytes());
        bytes[LINES_OFFSET..].copy_from_slice(&self.lines.to_le_bytes());
        bytes
    }

    /// Splits an encoded snapshot into its fields.
    ///
    /// Only the length is checked here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let bytes: &[u8; Self::LEN] = bytes.try_into().map_err(|_| SnapshotError::Length {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        let mut board = [0; Board::CELLS];
        board.copy_from_slice(&bytes[BOARD_OFFSET..NEXT_PIECE_OFFSET]);
        Ok(Self {
            board,
            next_piece: bytes[NEXT_PIECE_OFFSET],
            piece_x: read_i32(bytes, PIECE_X_OFFSET),
            piece_y: read_i32(bytes, PIECE_Y_OFFSET),
            current_piece: bytes[CURRENT_PIECE_OFFSET],
            score: read_i32(bytes, SCORE_OFFSET),
            lines: read_i32(bytes, LINES_OFFSET),
        })
    }

    /// Returns `true` if this snapshot may replace the live game.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.to_state().map(|_| ())
    }

    /// Validates the snapshot and converts it into a playable game.
    pub fn into_state(self) -> Result<GameState, SnapshotError> {
        self.to_state()
    }

    #[expect(clippy::cast_possible_wrap)]
    fn to_state(&self) -> Result<GameState, SnapshotError> {
        let &Self {
            ref board,
            next_piece,
            piece_x,
            piece_y,
            current_piece,
            score,
            lines,
        } = self;

        if !(0..BOARD_WIDTH as i32).contains(&piece_x) {
            return Err(SnapshotError::PieceX { x: piece_x });
        }
        if !(SPAWN_Y..BOARD_HEIGHT as i32).contains(&piece_y) {
            return Err(SnapshotError::PieceY { y: piece_y });
        }
        let current_piece = piece_id("current piece", current_piece)?;
        let next_piece = piece_id("next piece", next_piece)?;
        let board =
            Board::from_bytes(board).map_err(|(offset, byte)| SnapshotError::Cell { offset, byte })?;
        let score = counter("score", score)?;
        let lines = counter("lines", lines)?;
        if !board.fits(current_piece, piece_x, piece_y) {
            return Err(SnapshotError::Overlap {
                x: piece_x,
                y: piece_y,
            });
        }

        Ok(GameState::from_parts(
            board,
            current_piece,
            next_piece,
            (piece_x, piece_y),
            score,
            lines,
        ))
    }
}

fn piece_id(field: &'static str, index: u8) -> Result<PieceId, SnapshotError> {
    PieceId::new(index).ok_or(SnapshotError::PieceIndex { field, index })
}

fn counter(field: &'static str, value: i32) -> Result<u32, SnapshotError> {
    u32::try_from(value).map_err(|_| SnapshotError::NegativeCounter { field, value })
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn read_i32(bytes: &[u8; Snapshot::LEN], offset: usize) -> i32 {
    let mut field = [0; 4];
    field.copy_from_slice(&bytes[offset..offset + 4]);
    i32::from_le_bytes(field)
}

fn serialize_board<S>(board: &[u8; Board::CELLS], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(board.chunks(BOARD_WIDTH).map(|row| {
        row.iter()
            .map(|&byte| match byte {
                0 => ' ',
                b' ' | b'!'..=b'~' => char::from(byte),
                _ => '?',
            })
            .collect::<String>()
    }))
}
