use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::engine::{
    game_state::GameState,
    snapshot::{Snapshot, SnapshotError},
};

/// Reasons a quickload did not produce a game.
#[derive(
    Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant,
)]
pub enum QuickloadError {
    #[display("{_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Invalid(SnapshotError),
}

/// Place where a single quicksave slot is kept.
pub trait QuicksaveStore {
    /// Replaces the stored quicksave with `bytes`.
    fn save(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Reads back the stored quicksave.
    fn load(&mut self) -> io::Result<Vec<u8>>;
}

/// Quicksave slot backed by a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuicksaveFile {
    path: PathBuf,
}

impl Default for QuicksaveFile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl QuicksaveFile {
    /// File name used when none is given, relative to the working directory.
    pub const DEFAULT_PATH: &str = "tetris_quicksave.bin";

    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuicksaveStore for QuicksaveFile {
    fn save(&mut self, bytes: &[u8]) -> io::Result<()> {
        fs::write(&self.path, bytes)
    }

    fn load(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Writes `state` to `store`.
pub fn quicksave<S>(store: &mut S, state: &GameState) -> io::Result<()>
where
    S: QuicksaveStore + ?Sized,
{
    store.save(&Snapshot::from_state(state).to_bytes())
}

/// Reads a game back from `store`, rejecting anything that is not a valid
/// quicksave.
pub fn quickload<S>(store: &mut S) -> Result<GameState, QuickloadError>
where
    S: QuicksaveStore + ?Sized,
{
    let bytes = store.load()?;
    let state = Snapshot::from_bytes(&bytes)?.into_state()?;
    Ok(state)
}
