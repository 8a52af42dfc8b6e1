use std::time::Instant;

use celltris_engine::{
    GameSession, Input, PieceGenerator, QuicksaveFile, SessionState, StatusLine,
};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
};
use ratatui_runtime::{App, Runtime};

use crate::view::widgets::SessionDisplay;

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession<QuicksaveFile>,
    status: StatusLine,
}

impl PlayApp {
    pub(crate) fn new(pieces: PieceGenerator, quicksave: QuicksaveFile) -> Self {
        Self {
            session: GameSession::new(pieces, quicksave),
            status: StatusLine::new(),
        }
    }

    fn step(&mut self, runtime: &mut Runtime, now: Instant, input: Input) {
        self.session.handle(now, input, &mut self.status);
        self.status.expire(now);
        runtime.set_tick_interval(self.session.frame_budget());
        runtime.set_redraw_at(self.status.expires_at());
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(self.session.frame_budget());
    }

    fn should_exit(&self) -> bool {
        self.session.should_exit()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, now: Instant, event: Event) {
        if let Some(key) = event.as_key_press_event()
            && let Some(input) = input_from_key(key.code)
        {
            self.step(runtime, now, input);
        }
    }

    fn draw(&self, frame: &mut Frame, now: Instant) {
        let state = self.session.state();
        let session_display = SessionDisplay::new(self.session.game(), state);
        let status_text = self
            .status
            .current(now)
            .map(ToString::to_string)
            .unwrap_or_default();
        let status_line = Line::styled(status_text, Style::default().fg(Color::Yellow)).centered();
        let help_text = Text::from(help_text(state))
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(status_line, status_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, runtime: &mut Runtime, now: Instant) {
        self.step(runtime, now, Input::None);
    }
}

fn input_from_key(code: KeyCode) -> Option<Input> {
    let input = match code {
        KeyCode::Left => Input::Left,
        KeyCode::Right => Input::Right,
        KeyCode::Up => Input::Rotate,
        KeyCode::Down => Input::SoftDrop,
        KeyCode::Char(' ') => Input::Pause,
        KeyCode::Char('s') => Input::Quicksave,
        KeyCode::Char('l') => Input::Quickload,
        KeyCode::Char('q') => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn help_text(state: SessionState) -> &'static str {
    match state {
        SessionState::Attract => "Controls: Space (Start) | L (Quickload) | Q (Quit)",
        SessionState::Playing { .. } => {
            "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Soft Drop) | Space (Pause) | S (Quicksave) | L (Quickload) | Q (Quit)"
        }
        SessionState::Paused { .. } => {
            "Controls: Space (Resume) | S (Quicksave) | L (Quickload) | Q (Quit)"
        }
        SessionState::GameOver { .. } => "Controls: Space (New Game) | Q (Quit)",
    }
}
