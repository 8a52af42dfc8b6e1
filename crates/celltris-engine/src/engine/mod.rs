//! Game rules and session flow built on top of the core board and pieces.
//!
//! - [`GameState`] - One game: board, falling piece, next piece, score and lines
//! - [`GameLoop`] - Fixed-step update applying input and gravity to a [`GameState`]
//! - [`GameSession`] - Title screen, pause, game over and quicksave handling
//! - [`PieceGenerator`] - Seedable source of pieces, uniform per shape
//! - [`Snapshot`] - Quicksave encoding and validation
//! - [`StatusLine`] - Short-lived messages shown to the player
//!
//! # Game Flow
//!
//! 1. A new piece spawns just above the board at [`SPAWN_X`](crate::SPAWN_X)
//! 2. The player moves and rotates it while gravity pulls it down
//! 3. When it cannot move down any more it locks into the board
//! 4. Completed rows are removed and scored
//! 5. Repeat until a piece locks while sticking out above the board
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use celltris_engine::{GameLoop, Input, PieceGenerator, PieceSeed};
//!
//! let mut game = GameLoop::new(PieceGenerator::with_seed(PieceSeed::from(42)));
//! game.tick(Duration::from_millis(33), Input::Rotate);
//!
//! while game.tick(Duration::from_millis(33), Input::SoftDrop).is_continue() {}
//! println!("final score: {}", game.state().score());
//! ```

pub use self::{
    game_loop::*, game_session::*, game_state::*, persistence::*, piece_generator::*, snapshot::*,
    status::*,
};

mod game_loop;
mod game_session;
mod game_state;
mod line_clear;
mod persistence;
mod piece_generator;
mod snapshot;
mod status;
