use blockfall_engine::PieceKind;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// One board cell, drawn two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// Maps a cell color identifier to its style; `0` and unknown ids draw as empty.
    pub fn from_color_id(color_id: u8) -> Self {
        match PieceKind::from_color_id(color_id) {
            None => Self::new(style::EMPTY_DOT, "."),
            Some(kind) => {
                let style = match kind {
                    PieceKind::I => style::I_BLOCK,
                    PieceKind::T => style::T_BLOCK,
                    PieceKind::O => style::O_BLOCK,
                    PieceKind::L => style::L_BLOCK,
                    PieceKind::J => style::J_BLOCK,
                    PieceKind::Z => style::Z_BLOCK,
                    PieceKind::S => style::S_BLOCK,
                };
                Self::new(style, "")
            }
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
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ids_follow_catalog() {
        assert_eq!(BlockDisplay::from_color_id(0).symbol, ".");
        assert_eq!(BlockDisplay::from_color_id(1).style, style::I_BLOCK);
        assert_eq!(BlockDisplay::from_color_id(2).style, style::T_BLOCK);
        assert_eq!(BlockDisplay::from_color_id(7).style, style::S_BLOCK);
        assert_eq!(BlockDisplay::from_color_id(42).style, style::EMPTY_DOT);
    }
}
