use std::{
    io,
    time::{Duration, Instant},
};

use crate::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the longest time to wait for a terminal event before
    /// `App::update()` is called anyway.
    ///
    /// Pass `None` to wait for terminal events indefinitely.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Requests a redraw at `at` even if nothing else happens before then.
    pub fn set_redraw_at(&mut self, at: Option<Instant>) {
        self.events.set_redraw_at(at);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Tick`: calls `app.update()`
    ///    - `Event::Render`: calls `app.draw()`
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                let event = self.events.next()?;
                let now = Instant::now();
                match event {
                    TuiEvent::Tick => {
                        app.update(&mut self, now);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f, now))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, now, event);
                    }
                }
            }
            Ok(())
        })
    }
}
