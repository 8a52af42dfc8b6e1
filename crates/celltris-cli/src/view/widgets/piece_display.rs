use celltris_engine::{Block, PieceId};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// Preview of a single piece orientation, centered in a 4×4 area.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceId>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceId) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_margin(self.block.as_ref()).width
    }

    pub fn height(&self) -> u16 {
        4 * BlockDisplay::height() + super::block_margin(self.block.as_ref()).height
    }
}

/// Columns and rows covered by the filled cells of `piece`.
fn piece_size(piece: PieceId) -> (u16, u16) {
    piece.filled_cells().fold((0, 0), |(w, h), (mx, my)| {
        let mx = u16::try_from(mx + 1).unwrap_or(0);
        let my = u16::try_from(my + 1).unwrap_or(0);
        (w.max(mx), h.max(my))
    })
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let (width, height) = piece_size(piece);
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let filled = BlockDisplay::from_block(Block::Filled(piece.marker()), false);
        let empty = BlockDisplay::from_block(Block::Empty, false);
        let mask = piece.mask();
        for (row, grid_row) in grid_rows.enumerate() {
            // mask rows count upward from the bottom
            let my = usize::from(height) - 1 - row;
            for (mx, grid_cell) in grid_row.into_iter().enumerate() {
                if mask.is_filled(mx, my) {
                    Widget::render(&filled, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_sizes() {
        assert_eq!(piece_size(PieceId::new(0).unwrap()), (4, 1));
        assert_eq!(piece_size(PieceId::new(1).unwrap()), (1, 4));
        assert_eq!(piece_size(PieceId::new(2).unwrap()), (2, 2));
        assert_eq!(piece_size(PieceId::new(7).unwrap()), (3, 2));
    }
}
