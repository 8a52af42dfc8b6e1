use celltris_engine::{Board, GameState, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, style};

/// Board, next piece and stats for the current session state.
///
/// On the title screen the board is shown empty, while the stats keep the
/// result of the last game.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    game: &'a GameState,
    state: SessionState,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(game: &'a GameState, state: SessionState) -> Self {
        Self {
            game,
            state,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn height(&self) -> u16 {
        BoardDisplay::new(self.game.board())
            .block(Block::bordered())
            .height()
    }

    fn border_color(&self) -> Color {
        match self.state {
            SessionState::Attract => Color::DarkGray,
            SessionState::Playing { .. } => Color::White,
            SessionState::Paused { .. } => Color::Yellow,
            SessionState::GameOver { .. } => Color::Red,
        }
    }

    fn popup(&self) -> Option<(&'static str, Style)> {
        match self.state {
            SessionState::Playing { .. } => None,
            SessionState::Attract => Some(("Press space to start!", style::TITLE_POPUP)),
            SessionState::Paused { .. } => Some(("PAUSED", style::PAUSED_POPUP)),
            SessionState::GameOver { .. } => Some(("GAME OVER", style::GAME_OVER_POPUP)),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = self.border_color();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = {
            let board_block = Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT);
            if self.state.is_attract() {
                BoardDisplay::new(&Board::EMPTY).block(board_block)
            } else {
                BoardDisplay::new(self.game.board())
                    .falling_piece(self.game)
                    .block(board_block)
            }
        };
        let next_panel = {
            let panel = PieceDisplay::new().block(panel("NEXT"));
            if self.state.is_attract() {
                panel
            } else {
                panel.piece(self.game.next_piece())
            }
        };
        let session_stats = SessionStatsDisplay::new(self.game).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
