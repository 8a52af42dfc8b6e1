use clap::{Parser, Subcommand};

use self::{inspect::InspectArg, play::PlayArg};

mod inspect;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    play: PlayArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Decode a quicksave file and print it as JSON
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(args.play)) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_plays_with_defaults() {
        let args = CommandArgs::try_parse_from(["celltris"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.play.quicksave, Path::new("tetris_quicksave.bin"));
        assert_eq!(args.play.seed, None);
    }

    #[test]
    fn test_play_flags_without_subcommand() {
        let args =
            CommandArgs::try_parse_from(["celltris", "--seed", "42", "--quicksave", "a.bin"])
                .unwrap();
        assert_eq!(args.play.seed, Some(42));
        assert_eq!(args.play.quicksave, Path::new("a.bin"));
    }

    #[test]
    fn test_inspect_subcommand() {
        let args = CommandArgs::try_parse_from(["celltris", "inspect", "slot.bin"]).unwrap();
        let Some(Mode::Inspect(arg)) = args.mode else {
            panic!("expected inspect mode");
        };
        assert_eq!(arg.path, Path::new("slot.bin"));
    }
}
