use std::time::{Duration, Instant};

/// Transient one-line message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StatusMessage {
    #[display("Game over!")]
    GameOver,
    #[display("Quicksaved!")]
    Saved,
    #[display("Quicksave failed: {_0}")]
    SaveFailed(String),
    #[display("Quickloaded!")]
    Loaded,
    #[display("Quickload failed: {_0}")]
    LoadFailed(String),
}

/// Receiver for status messages emitted by the game session.
pub trait StatusSink {
    fn show_status(&mut self, now: Instant, message: StatusMessage);
}

/// Keeps the most recent status message until it expires.
///
/// ```
/// use std::time::{Duration, Instant};
/// use celltris_engine::{StatusLine, StatusMessage, StatusSink as _};
///
/// let start = Instant::now();
/// let mut line = StatusLine::new();
/// line.show_status(start, StatusMessage::Saved);
///
/// assert_eq!(line.current(start), Some(&StatusMessage::Saved));
/// assert_eq!(line.current(start + StatusLine::DURATION), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    current: Option<(StatusMessage, Instant)>,
}

impl StatusLine {
    /// How long a message stays visible.
    pub const DURATION: Duration = Duration::from_secs(5);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the message still visible at `now`, if any.
    #[must_use]
    pub fn current(&self, now: Instant) -> Option<&StatusMessage> {
        self.current
            .as_ref()
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(message, _)| message)
    }

    /// Instant at which the visible message disappears.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        self.current.as_ref().map(|(_, expires_at)| *expires_at)
    }

    /// Forgets an expired message. Returns `true` if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.current(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }
}

impl StatusSink for StatusLine {
    fn show_status(&mut self, now: Instant, message: StatusMessage) {
        self.current = Some((message, now + Self::DURATION));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        assert_eq!(StatusMessage::GameOver.to_string(), "Game over!");
        assert_eq!(
            StatusMessage::LoadFailed("bad piece".into()).to_string(),
            "Quickload failed: bad piece"
        );
    }

    #[test]
    fn test_newer_message_replaces_older() {
        let start = Instant::now();
        let mut line = StatusLine::new();
        line.show_status(start, StatusMessage::Saved);
        line.show_status(start + Duration::from_secs(3), StatusMessage::Loaded);

        let later = start + Duration::from_secs(6);
        assert_eq!(line.current(later), Some(&StatusMessage::Loaded));
        assert_eq!(line.expires_at(), Some(start + Duration::from_secs(8)));
    }

    #[test]
    fn test_expire_clears_only_after_deadline() {
        let start = Instant::now();
        let mut line = StatusLine::new();
        assert!(!line.expire(start));

        line.show_status(start, StatusMessage::GameOver);
        assert!(!line.expire(start + Duration::from_secs(4)));
        assert!(line.expire(start + Duration::from_secs(5)));
        assert_eq!(line.expires_at(), None);
    }
}
