use crate::config::{Config, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::{Error, Result};

/// Row-major tiling of fixed-size cards on an A4 page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGrid {
    pub card_size: f32,
    pub margin: f32,
    pub cards_per_row: usize,
    pub cards_per_col: usize,
}

/// Where a card lands: page, grid cell and top-left corner in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPosition {
    pub page: usize,
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
}

impl PageGrid {
    pub fn new(card_size: f32, margin: f32) -> Result<Self> {
        let pitch = card_size + margin;
        let cards_per_row = ((PAGE_WIDTH_MM - 2.0 * margin) / pitch).floor().max(0.0) as usize;
        let cards_per_col = ((PAGE_HEIGHT_MM - 2.0 * margin) / pitch).floor().max(0.0) as usize;
        if cards_per_row == 0 || cards_per_col == 0 {
            return Err(Error::Configuration(format!(
                "a {card_size}mm card with {margin}mm margins does not fit on an A4 page"
            )));
        }
        Ok(Self {
            card_size,
            margin,
            cards_per_row,
            cards_per_col,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.card_size_mm, config.margin_mm)
    }

    pub fn cards_per_page(&self) -> usize {
        self.cards_per_row * self.cards_per_col
    }

    /// True when card `index` is the first one on its page.
    pub fn starts_page(&self, index: usize) -> bool {
        index % self.cards_per_page() == 0
    }

    pub fn pages_for(&self, cards: usize) -> usize {
        cards.div_ceil(self.cards_per_page())
    }

    pub fn position(&self, index: usize) -> CardPosition {
        let col = index % self.cards_per_row;
        let row = (index / self.cards_per_row) % self.cards_per_col;
        let pitch = self.card_size + self.margin;
        CardPosition {
            page: index / self.cards_per_page(),
            row,
            col,
            x: self.margin + col as f32 * pitch,
            y: self.margin + row as f32 * pitch,
        }
    }
}
