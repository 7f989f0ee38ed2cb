//! Core library for building and printing spot-it style matching card decks.
//!
//! Any two cards of a generated deck share exactly one symbol. Decks come from
//! a finite projective plane of order `n` and are laid out on A4 pages as
//! square or round cards.

pub mod config;
pub mod core;
mod error;
pub mod imaging;
pub mod layout;
pub mod render;

pub use crate::core::{
    Card, Deck, DeckRequest, IncidenceReport, Order, Symbol, SymbolPool, construct,
    generate_deck, verify_incidence,
};
pub use config::Config;
pub use error::{Error, Result};
pub use layout::{CardLayout, CardShape, LayoutEngine, PageGrid, Placement, SymbolTransform};
pub use render::{PageCanvas, PdfCanvas, RasterCanvas, RenderSummary, render_deck};
