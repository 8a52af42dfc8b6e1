use std::time::Instant;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the
    /// tick interval.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.) received at `now`.
    fn handle_event(&mut self, runtime: &mut Runtime, now: Instant, event: Event);

    /// Draws the screen as it should look at `now`.
    fn draw(&self, frame: &mut Frame, now: Instant);

    /// Called when the tick interval elapsed without a tick.
    fn update(&mut self, runtime: &mut Runtime, now: Instant);
}
