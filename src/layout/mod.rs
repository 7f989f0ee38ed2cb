//! Card layout: page tiling and symbol placement within each card.

mod grid;
mod symbols;

pub use grid::{CardPosition, PageGrid};
pub use symbols::{
    Placement, RING_DISTANCE, Rotation, Slot, SymbolTransform, round_slots, square_slots,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;

/// Outline of a printed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardShape {
    Square,
    Round,
}

/// Geometry computed for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub index: usize,
    pub position: CardPosition,
    pub shape: CardShape,
    pub size: f32,
    /// One slot per symbol, in the card's symbol order.
    pub slots: Vec<Slot>,
}

/// Computes card positions and symbol slots from fixed page geometry.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    grid: PageGrid,
    inset: f32,
    shape: CardShape,
}

impl LayoutEngine {
    pub fn new(config: &Config, shape: CardShape) -> Result<Self> {
        Ok(Self {
            grid: PageGrid::from_config(config)?,
            inset: config.inset_mm,
            shape,
        })
    }

    pub fn grid(&self) -> &PageGrid {
        &self.grid
    }

    /// Lay out card `index` holding `symbol_count` symbols.
    pub fn place_card<R: Rng + ?Sized>(
        &self,
        index: usize,
        symbol_count: usize,
        rng: &mut R,
    ) -> CardLayout {
        let position = self.grid.position(index);
        let origin = (position.x, position.y);
        let size = self.grid.card_size;
        let slots = match self.shape {
            CardShape::Square => square_slots(origin, size, self.inset, symbol_count, rng),
            CardShape::Round => round_slots(origin, size, self.inset, symbol_count),
        };
        CardLayout {
            index,
            position,
            shape: self.shape,
            size,
            slots,
        }
    }
}
