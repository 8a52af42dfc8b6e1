use std::iter;

use celltris_engine::{BOARD_HEIGHT, BOARD_WIDTH, Block, Board, GameState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::BlockDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<&'a GameState>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            block: None,
        }
    }

    /// Draws the falling piece of `game` on top of the board.
    pub fn falling_piece(self, game: &'a GameState) -> Self {
        Self {
            falling_piece: Some(game),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_WIDTH as u16 * BlockDisplay::width()
            + super::block_margin(self.block.as_ref()).width
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 * BlockDisplay::height()
            + super::block_margin(self.block.as_ref()).height
    }

    fn cells(&self) -> [[Block; BOARD_WIDTH]; BOARD_HEIGHT] {
        let mut cells = [[Block::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for (dst, row) in iter::zip(&mut cells, self.board.rows()) {
            *dst = *row;
        }
        if let Some(game) = self.falling_piece {
            for (x, y, marker) in game.falling_cells() {
                // cells still above the board are not drawn
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                    && let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x))
                {
                    *cell = Block::Filled(marker);
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..BOARD_WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..BOARD_HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ BOARD_HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ BOARD_WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(block, true).render(grid_cell, buf);
            }
        }
    }
}
