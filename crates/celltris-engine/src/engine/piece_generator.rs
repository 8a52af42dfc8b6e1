use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

use crate::PieceId;

/// Seed for deterministic piece generation.
///
/// The same seed always produces the same piece sequence, which makes games
/// reproducible for debugging and testing.
///
/// # Example
///
/// ```
/// use celltris_engine::{PieceGenerator, PieceSeed};
///
/// let mut a = PieceGenerator::with_seed(PieceSeed::from(7));
/// let mut b = PieceGenerator::with_seed(PieceSeed::from(7));
/// assert_eq!(a.next_piece(), b.next_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From, derive_more::Display)]
pub struct PieceSeed(u64);

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        PieceSeed(rng.random())
    }
}

/// Draws catalog entries so that every base shape is equally likely,
/// regardless of how many orientations it has.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    ///
    /// For deterministic sequences, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed.0),
        }
    }

    /// Draws the next piece.
    pub fn next_piece(&mut self) -> PieceId {
        self.rng.random()
    }
}
