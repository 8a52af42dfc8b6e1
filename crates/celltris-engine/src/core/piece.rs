use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use super::board::Marker;

/// One of the seven base tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    O,
    S,
    Z,
    T,
    J,
    L,
}

impl Shape {
    /// Number of base shapes.
    pub const LEN: usize = 7;

    pub const ALL: [Shape; Self::LEN] = [
        Shape::I,
        Shape::O,
        Shape::S,
        Shape::Z,
        Shape::T,
        Shape::J,
        Shape::L,
    ];

    /// Number of distinct orientations of this shape in the catalog.
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        match self {
            Shape::O => 1,
            Shape::I | Shape::S | Shape::Z => 2,
            Shape::T | Shape::J | Shape::L => 4,
        }
    }

    /// Marker written into the board when a piece of this shape locks.
    #[must_use]
    pub fn marker(self) -> Marker {
        let byte = match self {
            Shape::I => b'=',
            Shape::O => b'#',
            Shape::S => b'%',
            Shape::Z => b'&',
            Shape::T => b'+',
            Shape::J => b'$',
            Shape::L => b'*',
        };
        match Marker::new(byte) {
            Some(marker) => marker,
            None => panic!("shape markers must be printable"),
        }
    }
}

/// Filled/empty layout of one piece orientation within its 4×4 box.
///
/// Rows are indexed from the bottom of the box upward: row 0 is the piece's
/// bottom edge. Every mask in the catalog has a filled cell in column 0 and
/// in row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMask {
    rows: [[bool; 4]; 4],
}

impl PieceMask {
    /// Returns `true` if the cell `mx` columns right of and `my` rows above the
    /// bottom-left corner is filled.
    #[must_use]
    pub fn is_filled(&self, mx: usize, my: usize) -> bool {
        self.rows[my][mx]
    }

    /// Builds a mask from rows written top row first, `.` for empty cells.
    const fn from_top_down(rows: [&[u8; 4]; 4]) -> Self {
        let mut mask = [[false; 4]; 4];
        let mut y = 0;
        while y < 4 {
            let mut x = 0;
            while x < 4 {
                mask[3 - y][x] = rows[y][x] != b'.';
                x += 1;
            }
            y += 1;
        }
        Self { rows: mask }
    }
}

#[derive(Debug)]
struct CatalogEntry {
    shape: Shape,
    next_rotation: u8,
    mask: PieceMask,
}

const fn entry(shape: Shape, next_rotation: u8, rows: [&[u8; 4]; 4]) -> CatalogEntry {
    CatalogEntry {
        shape,
        next_rotation,
        mask: PieceMask::from_top_down(rows),
    }
}

#[rustfmt::skip]
static CATALOG: [CatalogEntry; PieceId::LEN] = [
    // I-piece
    entry(Shape::I, 1, [b"....", b"....", b"....", b"####"]),
    entry(Shape::I, 0, [b"#...", b"#...", b"#...", b"#..."]),
    // O-piece
    entry(Shape::O, 2, [b"....", b"....", b"##..", b"##.."]),
    // S-piece
    entry(Shape::S, 4, [b"....", b"....", b".##.", b"##.."]),
    entry(Shape::S, 3, [b"....", b"#...", b"##..", b".#.."]),
    // Z-piece
    entry(Shape::Z, 6, [b"....", b"....", b"##..", b".##."]),
    entry(Shape::Z, 5, [b"....", b".#..", b"##..", b"#..."]),
    // T-piece
    entry(Shape::T, 8, [b"....", b"....", b".#..", b"###."]),
    entry(Shape::T, 9, [b"....", b"#...", b"##..", b"#..."]),
    entry(Shape::T, 10, [b"....", b"....", b"###.", b".#.."]),
    entry(Shape::T, 7, [b"....", b".#..", b"##..", b".#.."]),
    // J-piece
    entry(Shape::J, 12, [b"....", b"....", b"#...", b"###."]),
    entry(Shape::J, 13, [b"....", b"##..", b"#...", b"#..."]),
    entry(Shape::J, 14, [b"....", b"....", b"###.", b"..#."]),
    entry(Shape::J, 11, [b"....", b".#..", b".#..", b"##.."]),
    // L-piece
    entry(Shape::L, 16, [b"....", b"....", b"..#.", b"###."]),
    entry(Shape::L, 17, [b"....", b"#...", b"#...", b"##.."]),
    entry(Shape::L, 18, [b"....", b"....", b"###.", b"#..."]),
    entry(Shape::L, 15, [b"....", b"##..", b".#..", b".#.."]),
];

/// Catalog ids listed `4 / rotation_count` times each, so sampling uniformly
/// from this table picks every base shape with equal probability.
const WEIGHTED_PIECES: [u8; 28] = [
    0, 0, 1, 1, 2, 2, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18,
];

/// Index of one piece orientation in the static catalog.
///
/// Only valid ids can be constructed, so every lookup on a `PieceId` is total.
///
/// # Example
///
/// ```
/// use celltris_engine::{PieceId, Shape};
///
/// let bar = PieceId::new(0).unwrap();
/// assert_eq!(bar.shape(), Shape::I);
/// assert_eq!(bar.next_rotation().next_rotation(), bar);
/// assert!(PieceId::new(19).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    /// Number of entries in the catalog.
    pub const LEN: usize = 19;

    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::LEN {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Iterates over every catalog entry in id order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::LEN as u8).map(Self)
    }

    fn entry(self) -> &'static CatalogEntry {
        &CATALOG[usize::from(self.0)]
    }

    #[must_use]
    pub fn shape(self) -> Shape {
        self.entry().shape
    }

    #[must_use]
    pub fn marker(self) -> Marker {
        self.shape().marker()
    }

    #[must_use]
    pub fn mask(self) -> &'static PieceMask {
        &self.entry().mask
    }

    /// Returns the orientation reached by rotating this piece once.
    #[must_use]
    pub fn next_rotation(self) -> Self {
        Self(self.entry().next_rotation)
    }

    /// Returns `(mx, my)` for every filled mask cell, `my` counted upward from
    /// the bottom row of the mask.
    pub fn filled_cells(self) -> impl Iterator<Item = (i32, i32)> {
        let mask = self.mask();
        (0_u8..4).flat_map(move |my| {
            (0_u8..4)
                .filter(move |&mx| mask.is_filled(usize::from(mx), usize::from(my)))
                .map(move |mx| (i32::from(mx), i32::from(my)))
        })
    }
}

impl Distribution<PieceId> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceId {
        PieceId(WEIGHTED_PIECES[rng.random_range(0..WEIGHTED_PIECES.len())])
    }
}
