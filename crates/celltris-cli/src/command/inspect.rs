use std::{fs, io, path::PathBuf};

use anyhow::Context as _;
use celltris_engine::{QuicksaveFile, Snapshot};
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Quicksave file to decode
    #[clap(default_value = QuicksaveFile::DEFAULT_PATH)]
    pub(crate) path: PathBuf,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    loadable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    snapshot: &'a Snapshot,
}

impl<'a> Report<'a> {
    fn new(snapshot: &'a Snapshot) -> Self {
        let error = snapshot.validate().err().map(|e| e.to_string());
        Self {
            loadable: error.is_none(),
            error,
            snapshot,
        }
    }
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let InspectArg { path } = arg;

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot = Snapshot::from_bytes(&bytes)
        .with_context(|| format!("{} is not a quicksave", path.display()))?;

    let report = Report::new(&snapshot);
    if let Some(error) = &report.error {
        eprintln!("{}: quickload would be refused: {error}", path.display());
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use celltris_engine::{GameState, PieceGenerator, PieceSeed};

    use super::*;

    fn snapshot() -> Snapshot {
        let state = GameState::new(&mut PieceGenerator::with_seed(PieceSeed::from(4)));
        Snapshot::from_state(&state)
    }

    #[test]
    fn test_report_for_loadable_snapshot() {
        let snapshot = snapshot();
        let json = serde_json::to_value(Report::new(&snapshot)).unwrap();
        assert_eq!(json["loadable"], true);
        assert!(json.get("error").is_none());
        assert_eq!(json["snapshot"]["piece_x"], 5);
    }

    #[test]
    fn test_report_for_rejected_snapshot() {
        let mut snapshot = snapshot();
        snapshot.score = -1;
        let json = serde_json::to_value(Report::new(&snapshot)).unwrap();
        assert_eq!(json["loadable"], false);
        assert_eq!(json["error"], "score is negative (-1)");
    }
}
