use std::path::PathBuf;

use anyhow::Context as _;
use celltris_engine::{PieceGenerator, PieceSeed, QuicksaveFile};
use ratatui_runtime::Runtime;

use self::app::PlayApp;

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// File used by the quicksave and quickload keys
    #[clap(long, default_value = QuicksaveFile::DEFAULT_PATH)]
    pub(crate) quicksave: PathBuf,
    /// Seed for the piece sequence (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { quicksave, seed } = arg;

    let pieces = seed.map_or_else(PieceGenerator::new, |seed| {
        PieceGenerator::with_seed(PieceSeed::from(seed))
    });
    let mut app = PlayApp::new(pieces, QuicksaveFile::new(quicksave));

    Runtime::new()
        .run(&mut app)
        .context("failed to run the terminal session")?;

    Ok(())
}
