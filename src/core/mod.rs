//! Core domain: plane construction, symbol pools and deck assembly.

pub mod deck;
pub mod plane;
pub mod pool;

pub use deck::{Card, Deck, DeckRequest, bind, clamp, generate_deck, shuffle};
pub use plane::{IncidenceReport, MAX_ORDER, Order, SlotCard, construct, verify_incidence};
pub use pool::{Symbol, SymbolPool};
