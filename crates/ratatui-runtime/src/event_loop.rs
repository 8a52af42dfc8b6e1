use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Event loop state management.
///
/// Tracks when the next tick is due and whether the screen needs a redraw, and
/// returns the next event via `next()`. Without a tick interval, only terminal
/// events and scheduled redraws wake the loop.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    redraw_at: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticks disabled.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            redraw_at: None,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events. Enabling ticks starts a fresh
    /// interval; changing an active interval keeps the last tick time.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    /// Schedules a redraw at `at`, replacing any earlier request.
    pub(super) fn set_redraw_at(&mut self, at: Option<Instant>) {
        self.redraw_at = at;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick or scheduled redraw is due or a crossterm event
    /// occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.redraw_at.is_some_and(|at| now >= at) {
                self.redraw_at = None;
                self.dirty = true;
            }
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = self.dirty.then_some(now);
        let next_timeout_at = [next_tick_at, next_render_at, self.redraw_at]
            .into_iter()
            .flatten()
            .min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_loop(now: Instant) -> EventLoop {
        EventLoop {
            tick_interval: None,
            last_tick: now,
            redraw_at: None,
            dirty: false,
        }
    }

    #[test]
    fn test_no_timeout_without_ticks_or_redraws() {
        let now = Instant::now();
        assert_eq!(idle_loop(now).compute_timeout(now), None);
    }

    #[test]
    fn test_timeout_waits_for_next_tick() {
        let now = Instant::now();
        let mut events = idle_loop(now);
        events.tick_interval = Some(Duration::from_millis(33));
        events.last_tick = now;

        let later = now + Duration::from_millis(13);
        assert_eq!(events.compute_timeout(later), Some(Duration::from_millis(20)));
        // an overdue tick never produces a negative wait
        let overdue = now + Duration::from_millis(50);
        assert_eq!(events.compute_timeout(overdue), Some(Duration::ZERO));
    }

    #[test]
    fn test_scheduled_redraw_shortens_timeout() {
        let now = Instant::now();
        let mut events = idle_loop(now);
        events.tick_interval = Some(Duration::from_millis(33));
        events.set_redraw_at(Some(now + Duration::from_millis(5)));
        assert_eq!(events.compute_timeout(now), Some(Duration::from_millis(5)));

        events.tick_interval = None;
        events.set_redraw_at(Some(now + Duration::from_secs(5)));
        assert_eq!(events.compute_timeout(now), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_dirty_screen_does_not_wait() {
        let now = Instant::now();
        let mut events = idle_loop(now);
        events.dirty = true;
        assert_eq!(events.compute_timeout(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_enabling_ticks_starts_fresh_interval() {
        let mut events = EventLoop::new();
        let before = Instant::now();
        events.set_tick_interval(Some(Duration::from_millis(33)));
        assert!(events.last_tick >= before);

        let last_tick = events.last_tick;
        events.set_tick_interval(Some(Duration::from_millis(10)));
        assert_eq!(events.last_tick, last_tick);
    }
}
