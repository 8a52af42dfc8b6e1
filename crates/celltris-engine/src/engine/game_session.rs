use std::time::{Duration, Instant};

use crate::engine::{
    game_loop::{GameLoop, Input},
    game_state::GameState,
    persistence::{self, QuicksaveStore},
    piece_generator::PieceGenerator,
    status::{StatusLine, StatusMessage, StatusSink},
};

/// Longest wait for input while a game is running.
pub const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Where the session is between the title screen and a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Title screen, waiting for the player to start.
    Attract,
    /// Game running; `last_update` is when the game last advanced.
    Playing { last_update: Instant },
    /// Game frozen; the time already accumulated towards the next step is
    /// kept so that paused time is not counted.
    Paused { elapsed_before_pause: Duration },
    /// Game ended; the final board stays visible until the next input or
    /// until `until`, whichever comes first.
    GameOver { until: Instant },
}

/// A play session: one game at a time, plus the title screen, pause and
/// quicksave handling around it.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use celltris_engine::{
///     GameSession, Input, PieceGenerator, PieceSeed, QuicksaveFile, StatusLine,
/// };
///
/// let mut status = StatusLine::new();
/// let mut session = GameSession::new(
///     PieceGenerator::with_seed(PieceSeed::from(1)),
///     QuicksaveFile::default(),
/// );
/// let start = Instant::now();
///
/// session.handle(start, Input::Pause, &mut status);
/// assert!(session.state().is_playing());
/// assert_eq!(session.frame_budget(), Some(Duration::from_millis(33)));
///
/// session.handle(start, Input::Quit, &mut status);
/// assert!(session.state().is_attract());
/// ```
#[derive(Debug)]
pub struct GameSession<S> {
    state: SessionState,
    game: GameLoop,
    store: S,
    should_exit: bool,
}

impl<S> GameSession<S>
where
    S: QuicksaveStore,
{
    #[must_use]
    pub fn new(pieces: PieceGenerator, store: S) -> Self {
        Self {
            state: SessionState::Attract,
            game: GameLoop::new(pieces),
            store,
            should_exit: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The current game, or the last one played while on the title screen.
    #[must_use]
    pub fn game(&self) -> &GameState {
        self.game.state()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` once the player has asked to leave from the title
    /// screen.
    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// How long to wait for input before advancing anyway.
    ///
    /// `None` means nothing happens until the player presses a key.
    #[must_use]
    pub fn frame_budget(&self) -> Option<Duration> {
        match self.state {
            SessionState::Playing { .. } | SessionState::GameOver { .. } => Some(FRAME_BUDGET),
            SessionState::Attract | SessionState::Paused { .. } => None,
        }
    }

    /// Processes one step: the input received at `now`, or [`Input::None`]
    /// if the frame budget ran out first.
    pub fn handle<T>(&mut self, now: Instant, input: Input, status: &mut T)
    where
        T: StatusSink + ?Sized,
    {
        match self.state {
            SessionState::Attract => self.handle_attract(now, input, status),
            SessionState::Playing { last_update } => {
                self.handle_playing(now, last_update, input, status);
            }
            SessionState::Paused {
                elapsed_before_pause,
            } => self.handle_paused(now, elapsed_before_pause, input, status),
            SessionState::GameOver { until } => self.handle_game_over(now, until, input, status),
        }
    }

    fn handle_attract<T>(&mut self, now: Instant, input: Input, status: &mut T)
    where
        T: StatusSink + ?Sized,
    {
        match input {
            Input::Pause => {
                self.game.restart();
                self.state = SessionState::Playing { last_update: now };
            }
            Input::Quickload => {
                if !self.quickload(now, status) {
                    self.game.restart();
                }
                self.state = SessionState::Playing { last_update: now };
            }
            Input::Quit => self.should_exit = true,
            Input::None
            | Input::Left
            | Input::Right
            | Input::Rotate
            | Input::SoftDrop
            | Input::Quicksave => {}
        }
    }

    fn handle_playing<T>(&mut self, now: Instant, last_update: Instant, input: Input, status: &mut T)
    where
        T: StatusSink + ?Sized,
    {
        let elapsed = now.saturating_duration_since(last_update);
        match input {
            Input::Pause => {
                self.state = SessionState::Paused {
                    elapsed_before_pause: elapsed,
                };
            }
            Input::Quickload => {
                self.state = SessionState::Paused {
                    elapsed_before_pause: elapsed,
                };
                self.quickload(now, status);
            }
            Input::Quicksave => self.quicksave(now, status),
            Input::Quit => self.state = SessionState::Attract,
            Input::None | Input::Left | Input::Right | Input::Rotate | Input::SoftDrop => {
                self.state = SessionState::Playing { last_update: now };
                if self.game.tick(elapsed, input).is_game_over() {
                    self.state = SessionState::GameOver {
                        until: now + StatusLine::DURATION,
                    };
                    status.show_status(now, StatusMessage::GameOver);
                }
            }
        }
    }

    fn handle_paused<T>(
        &mut self,
        now: Instant,
        elapsed_before_pause: Duration,
        input: Input,
        status: &mut T,
    ) where
        T: StatusSink + ?Sized,
    {
        match input {
            Input::Pause => {
                let last_update = now.checked_sub(elapsed_before_pause).unwrap_or(now);
                self.state = SessionState::Playing { last_update };
            }
            Input::Quicksave => self.quicksave(now, status),
            Input::Quickload => {
                self.quickload(now, status);
            }
            Input::Quit => self.state = SessionState::Attract,
            Input::None | Input::Left | Input::Right | Input::Rotate | Input::SoftDrop => {}
        }
    }

    fn handle_game_over<T>(&mut self, now: Instant, until: Instant, input: Input, status: &mut T)
    where
        T: StatusSink + ?Sized,
    {
        if input.is_none() {
            if now >= until {
                self.state = SessionState::Attract;
            }
            return;
        }
        self.state = SessionState::Attract;
        self.handle_attract(now, input, status);
    }

    fn quicksave<T>(&mut self, now: Instant, status: &mut T)
    where
        T: StatusSink + ?Sized,
    {
        let message = match persistence::quicksave(&mut self.store, self.game.state()) {
            Ok(()) => StatusMessage::Saved,
            Err(e) => StatusMessage::SaveFailed(e.to_string()),
        };
        status.show_status(now, message);
    }

    /// Replaces the current game with the quicksaved one. Returns `false`,
    /// leaving the game untouched, if there is no usable quicksave.
    fn quickload<T>(&mut self, now: Instant, status: &mut T) -> bool
    where
        T: StatusSink + ?Sized,
    {
        match persistence::quickload(&mut self.store) {
            Ok(state) => {
                self.game.replace_state(state);
                status.show_status(now, StatusMessage::Loaded);
                true
            }
            Err(e) => {
                status.show_status(now, StatusMessage::LoadFailed(e.to_string()));
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn game_loop_mut(&mut self) -> &mut GameLoop {
        &mut self.game
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
