//! Binding plane slots to concrete symbols and preparing the final deck.

use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::core::plane::{self, Order, SlotCard};
use crate::core::pool::{Symbol, SymbolPool};
use crate::error::{Error, Result};

/// One card: the symbols it shows, all distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub symbols: Vec<Symbol>,
}

impl Card {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols present on both cards.
    pub fn shared_with<'a>(&'a self, other: &'a Card) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols
            .iter()
            .filter(move |symbol| other.symbols.contains(symbol))
    }
}

/// Ordered cards ready for layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    pub order: usize,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn symbols_per_card(&self) -> usize {
        self.order + 1
    }
}

/// Validated generation request: how many cards, how many symbols on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckRequest {
    pub total_cards: usize,
    pub order: Order,
}

impl DeckRequest {
    pub fn new(total_cards: usize, symbols_per_card: usize) -> Result<Self> {
        if total_cards == 0 {
            return Err(Error::Configuration(
                "total number of cards must be positive".to_string(),
            ));
        }
        let order = Order::from_symbols_per_card(symbols_per_card)?;
        Ok(Self { total_cards, order })
    }

    /// Symbols the pool must hold for this order.
    pub fn required_symbols(&self) -> usize {
        self.order.deck_size()
    }
}

/// Substitute each 1-based slot with `pool[slot - 1]`.
pub fn bind(slot_cards: &[SlotCard], pool: &[Symbol]) -> Result<Vec<Card>> {
    if slot_cards.iter().any(|card| card.contains(&0)) {
        return Err(Error::Configuration(
            "symbol slots are numbered from 1; slot 0 is not valid".to_string(),
        ));
    }
    let required = slot_cards
        .iter()
        .flat_map(|card| card.iter().copied())
        .max()
        .unwrap_or(0);
    if pool.len() < required {
        return Err(Error::InsufficientSymbols {
            required,
            available: pool.len(),
        });
    }
    Ok(slot_cards
        .iter()
        .map(|card| Card {
            symbols: card.iter().map(|&slot| pool[slot - 1].clone()).collect(),
        })
        .collect())
}

/// Permute card order and, independently, the symbols on every card.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
    for card in cards.iter_mut() {
        card.symbols.shuffle(rng);
    }
}

/// Keep at most `total` cards; never pads.
pub fn clamp(cards: &mut Vec<Card>, total: usize) {
    if total < cards.len() {
        cards.truncate(total);
    }
}

/// Run the whole pipeline: capacity check, construction, binding, shuffling, clamping.
pub fn generate_deck<R: Rng + ?Sized>(
    request: &DeckRequest,
    pool: &SymbolPool,
    rng: &mut R,
) -> Result<Deck> {
    let order = request.order;
    pool.ensure_at_least(request.required_symbols())?;
    if !order.yields_valid_plane() {
        warn!(
            "order {order} is not prime; some card pairs may not share exactly one symbol"
        );
    }

    let mut symbols = pool.symbols().to_vec();
    symbols.shuffle(rng);

    let slots = plane::construct(order);
    let mut cards = bind(&slots, &symbols)?;
    shuffle(&mut cards, rng);

    if request.total_cards > cards.len() {
        warn!(
            "requested {} cards but order {order} yields only {}",
            request.total_cards,
            cards.len()
        );
    }
    clamp(&mut cards, request.total_cards);
    info!(
        "generated {} cards with {} symbols each",
        cards.len(),
        order.symbols_per_card()
    );

    Ok(Deck {
        order: order.get(),
        cards,
    })
}
