use ratatui::{
    layout::{Rect, Size},
    widgets::Block as BlockWidget,
};

pub use self::{
    block_display::*, board_display::*, piece_display::*, session_display::*,
    session_stats_display::*,
};

mod block_display;
mod board_display;
mod piece_display;
mod session_display;
mod session_stats_display;

/// Styles in the terminal's own 16-colour palette.
pub mod style {
    use celltris_engine::Shape;
    use ratatui::style::{Color, Style};

    pub const DEFAULT: Style = Style::new().fg(Color::White).bg(Color::Black);
    pub const EMPTY: Style = solid(Color::Black);
    pub const EMPTY_DOT: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);
    /// Blocks whose marker does not belong to any shape (e.g. from an edited quicksave).
    pub const FOREIGN_BLOCK: Style = Style::new().fg(Color::Black).bg(Color::Gray);

    pub const TITLE_POPUP: Style = Style::new().fg(Color::Black).bg(Color::White);
    pub const PAUSED_POPUP: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
    pub const GAME_OVER_POPUP: Style = Style::new().fg(Color::White).bg(Color::Red);

    const fn solid(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const fn shape_block(shape: Shape) -> Style {
        solid(match shape {
            Shape::I => Color::Cyan,
            Shape::O => Color::Yellow,
            Shape::S => Color::Green,
            Shape::Z => Color::Red,
            Shape::T => Color::Magenta,
            Shape::J => Color::Blue,
            Shape::L => Color::LightRed,
        })
    }
}

/// Columns and rows taken by `block`'s borders and padding.
fn block_margin(block: Option<&BlockWidget>) -> Size {
    let full = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(full, |block| block.inner(full));
    Size::new(full.width - inner.width, full.height - inner.height)
}

#[cfg(test)]
mod tests {
    use ratatui::widgets::Padding;

    use super::*;

    #[test]
    fn test_block_margin() {
        assert_eq!(block_margin(None), Size::new(0, 0));
        assert_eq!(block_margin(Some(&BlockWidget::bordered())), Size::new(2, 2));
        let padded = BlockWidget::bordered().padding(Padding::symmetric(2, 1));
        assert_eq!(block_margin(Some(&padded)), Size::new(6, 4));
    }
}
