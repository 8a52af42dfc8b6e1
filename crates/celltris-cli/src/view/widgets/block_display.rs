use celltris_engine::{Block, Marker, Shape};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: String,
}

impl BlockDisplay {
    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self {
                style: style::EMPTY_DOT,
                symbol: ".".to_owned(),
            },
            Block::Empty => Self {
                style: style::EMPTY,
                symbol: String::new(),
            },
            Block::Filled(marker) => Self::from_marker(marker),
        }
    }

    fn from_marker(marker: Marker) -> Self {
        let Some(shape) = Shape::ALL.into_iter().find(|s| s.marker() == marker) else {
            return Self {
                style: style::FOREIGN_BLOCK,
                symbol: marker.as_char().to_string().repeat(2),
            };
        };
        Self {
            style: style::shape_block(shape),
            symbol: String::new(),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not just the cells covered by the symbol
        Paragraph::new(self.symbol.as_str())
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_markers_get_shape_colors() {
        let block = Block::Filled(Shape::T.marker());
        let display = BlockDisplay::from_block(block, true);
        assert_eq!(display.style, style::shape_block(Shape::T));
        assert!(display.symbol.is_empty());
    }

    #[test]
    fn test_unknown_marker_shows_its_character() {
        let block = Block::Filled(Marker::new(b'@').unwrap());
        let display = BlockDisplay::from_block(block, false);
        assert_eq!(display.style, style::FOREIGN_BLOCK);
        assert_eq!(display.symbol, "@@");
    }

    #[test]
    fn test_empty_cells() {
        assert_eq!(BlockDisplay::from_block(Block::Empty, true).symbol, ".");
        assert_eq!(BlockDisplay::from_block(Block::Empty, false).style, style::EMPTY);
    }
}
