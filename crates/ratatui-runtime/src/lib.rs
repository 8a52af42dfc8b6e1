//! Minimal event-driven runtime for ratatui applications.
//!
//! The runtime owns the terminal and a single-threaded event loop. It waits
//! for terminal input, but never longer than the application's tick interval,
//! and redraws the screen only after something changed.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
