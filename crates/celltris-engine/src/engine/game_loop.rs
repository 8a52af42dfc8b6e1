use std::time::Duration;

use crate::engine::{game_state::GameState, piece_generator::PieceGenerator};

/// One player command, already decoded from whatever the terminal reported.
///
/// At most one input is delivered per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Input {
    /// No key pressed this step.
    #[default]
    None,
    Left,
    Right,
    Rotate,
    SoftDrop,
    /// Starts, pauses or resumes depending on the session state.
    Pause,
    Quicksave,
    Quickload,
    Quit,
}

/// Result of advancing the game by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// Base delay between automatic downward moves.
const BASE_DOWN_DELAY: Duration = Duration::from_millis(700);

/// Delay between automatic downward moves after `lines` cleared lines.
///
/// Every ten lines shave one millisecond off the delay.
///
/// ```
/// use std::time::Duration;
/// use celltris_engine::down_movement_threshold;
///
/// assert_eq!(down_movement_threshold(0), Duration::from_millis(700));
/// assert_eq!(down_movement_threshold(25), Duration::from_millis(698));
/// ```
#[must_use]
pub fn down_movement_threshold(lines: u32) -> Duration {
    BASE_DOWN_DELAY.saturating_sub(Duration::from_millis(u64::from(lines / 10)))
}

/// Advances a game one fixed step at a time.
///
/// The loop owns the piece generator so that a restarted or reloaded game
/// keeps drawing from the same random sequence.
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    pieces: PieceGenerator,
    down_timer: Duration,
}

impl GameLoop {
    #[must_use]
    pub fn new(mut pieces: PieceGenerator) -> Self {
        let state = GameState::new(&mut pieces);
        Self {
            state,
            pieces,
            down_timer: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Time accumulated towards the next automatic downward move.
    #[must_use]
    pub fn down_timer(&self) -> Duration {
        self.down_timer
    }

    /// Throws the current game away and starts a fresh one.
    pub fn restart(&mut self) {
        self.state = GameState::new(&mut self.pieces);
        self.down_timer = Duration::ZERO;
    }

    /// Replaces the current game with `state`, e.g. a quickloaded one.
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
        self.down_timer = Duration::ZERO;
    }

    /// Advances the game by `delta` of wall time and applies `input`.
    ///
    /// The input is applied first. Then, if a soft drop was requested or the
    /// accumulated time exceeds the current threshold, the piece tries to move
    /// down one row (earning one point whether or not it moves). A piece that
    /// cannot move down either ends the game, if it sticks out above the
    /// board, or locks in place and clears any completed rows.
    ///
    /// Inputs that do not steer the piece are ignored here.
    pub fn tick(&mut self, delta: Duration, input: Input) -> TickOutcome {
        match input {
            Input::Left => {
                self.state.try_move_left();
            }
            Input::Right => {
                self.state.try_move_right();
            }
            Input::Rotate => {
                self.state.try_rotate();
            }
            Input::SoftDrop
            | Input::None
            | Input::Pause
            | Input::Quicksave
            | Input::Quickload
            | Input::Quit => {}
        }

        self.down_timer += delta;
        let threshold = down_movement_threshold(self.state.lines());
        if !input.is_soft_drop() && self.down_timer <= threshold {
            return TickOutcome::Continue;
        }
        self.down_timer = Duration::ZERO;

        self.state.award_drop_point();
        if self.state.try_move_down() {
            return TickOutcome::Continue;
        }
        if self.state.is_game_over() {
            return TickOutcome::GameOver;
        }
        let landed_y = self.state.lock_piece(&mut self.pieces);
        self.state.clear_completed_lines(landed_y);
        TickOutcome::Continue
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{Board, SPAWN_X, SPAWN_Y},
        engine::game_state::tests::{marker, state_with},
        PieceSeed,
    };

    use super::*;

    const STEP: Duration = Duration::from_millis(33);

    fn game_loop_with(state: GameState) -> GameLoop {
        let mut game = GameLoop::new(PieceGenerator::with_seed(PieceSeed::from(5)));
        game.replace_state(state);
        game
    }

    #[test]
    fn test_threshold_shrinks_with_lines() {
        assert_eq!(down_movement_threshold(9), Duration::from_millis(700));
        assert_eq!(down_movement_threshold(10), Duration::from_millis(699));
        assert_eq!(down_movement_threshold(1_000), Duration::from_millis(600));
        assert_eq!(down_movement_threshold(u32::MAX), Duration::ZERO);
    }

    #[test]
    fn test_gravity_waits_for_threshold() {
        let mut game = game_loop_with(state_with(Board::EMPTY, 2, 4, 5));
        let mut elapsed = Duration::ZERO;
        while elapsed + STEP <= Duration::from_millis(700) {
            assert!(game.tick(STEP, Input::None).is_continue());
            elapsed += STEP;
            assert_eq!(game.state().piece_y(), 5);
        }
        // threshold must be strictly exceeded
        let mut game = game_loop_with(state_with(Board::EMPTY, 2, 4, 5));
        game.tick(Duration::from_millis(700), Input::None);
        assert_eq!(game.state().piece_y(), 5);
        game.tick(Duration::from_millis(1), Input::None);
        assert_eq!(game.state().piece_y(), 6);
        assert_eq!(game.down_timer(), Duration::ZERO);
        assert_eq!(game.state().score(), 1);
    }

    #[test]
    fn test_soft_drop_moves_immediately_and_scores() {
        let mut game = game_loop_with(state_with(Board::EMPTY, 2, 4, 5));
        game.tick(STEP, Input::SoftDrop);
        assert_eq!(game.state().piece_y(), 6);
        assert_eq!(game.state().score(), 1);
        assert_eq!(game.down_timer(), Duration::ZERO);
    }

    #[test]
    fn test_steering_inputs_apply_before_gravity() {
        let mut game = game_loop_with(state_with(Board::EMPTY, 2, 4, 5));
        game.tick(STEP, Input::Left);
        assert_eq!(game.state().piece_x(), 3);
        game.tick(STEP, Input::Right);
        game.tick(STEP, Input::Right);
        assert_eq!(game.state().piece_x(), 5);
        assert_eq!(game.state().score(), 0);
    }

    #[test]
    fn test_failed_drop_still_scores_and_locks() {
        let mut game = game_loop_with(state_with(Board::EMPTY, 2, 4, 19));
        assert!(game.tick(STEP, Input::SoftDrop).is_continue());
        assert_eq!(game.state().score(), 1);
        assert!(game.state().board().is_occupied(4, 19));
        assert!(game.state().board().is_occupied(5, 18));
        assert_eq!(
            (game.state().piece_x(), game.state().piece_y()),
            (SPAWN_X, SPAWN_Y)
        );
    }

    #[test]
    fn test_lock_with_line_clear() {
        let mut board = Board::EMPTY;
        for x in 0..10 {
            if x != 5 {
                board.fill_cell(x, 19, marker());
            }
        }
        let mut game = game_loop_with(state_with(board, 1, 5, 19));
        assert!(game.tick(STEP, Input::SoftDrop).is_continue());
        assert_eq!(game.state().lines(), 1);
        assert_eq!(game.state().score(), 101);
    }

    #[test]
    fn test_game_over_when_stack_reaches_top() {
        let mut board = Board::EMPTY;
        board.fill_cell(SPAWN_X, 0, marker());
        let mut game = game_loop_with(state_with(board, 1, SPAWN_X, SPAWN_Y));
        let before = game.state().board().clone();
        assert!(game.tick(STEP, Input::SoftDrop).is_game_over());
        assert_eq!(game.state().board(), &before);
    }

    #[test]
    fn test_repeated_play_eventually_ends() {
        let mut game = GameLoop::new(PieceGenerator::with_seed(PieceSeed::from(99)));
        let mut steps = 0;
        while game.tick(STEP, Input::SoftDrop).is_continue() {
            steps += 1;
            assert!(steps < 10_000, "game never ended");
        }
        assert!(game.state().score() > 0);
    }

    #[test]
    fn test_score_and_lines_never_decrease() {
        const INPUTS: [Input; 7] = [
            Input::Left,
            Input::Rotate,
            Input::SoftDrop,
            Input::None,
            Input::Right,
            Input::SoftDrop,
            Input::SoftDrop,
        ];
        for (offset, seed) in (0_u64..20).enumerate() {
            let mut game = GameLoop::new(PieceGenerator::with_seed(PieceSeed::from(seed)));
            let mut previous = (0, 0);
            for step in 0.. {
                assert!(step < 100_000, "game with seed {seed} never ended");
                let input = INPUTS[(step + offset) % INPUTS.len()];
                let outcome = game.tick(STEP, input);
                let current = (game.state().score(), game.state().lines());
                assert!(current.0 >= previous.0, "score dropped with seed {seed}");
                assert!(current.1 >= previous.1, "lines dropped with seed {seed}");
                previous = current;
                if outcome.is_game_over() {
                    break;
                }
            }
            assert!(previous.0 > 0);
        }
    }

    #[test]
    fn test_restart_resets_state() {
        let mut game = GameLoop::new(PieceGenerator::with_seed(PieceSeed::from(1)));
        game.state_mut().award_drop_point();
        game.tick(Duration::from_millis(200), Input::None);
        game.restart();
        assert_eq!(game.state().score(), 0);
        assert_eq!(game.down_timer(), Duration::ZERO);
    }
}
