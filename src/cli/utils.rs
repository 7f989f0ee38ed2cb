//! Convenience helpers shared across command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use spotdeck::{Config, Deck, DeckRequest, Order, SymbolPool, generate_deck};

use crate::cli::common::DeckArgs;

/// Load settings from `path`, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Build the generator for this run, logging the seed so the deck can be reproduced.
pub fn seeded_rng(seed: Option<u64>) -> (u64, StdRng) {
    let seed = seed.unwrap_or_else(rand::random);
    info!("using random seed {seed}");
    (seed, StdRng::seed_from_u64(seed))
}

/// Resolve settings, validate the request and assemble a shuffled deck.
pub fn build_deck(
    args: &DeckArgs,
    total_cards: Option<usize>,
    rng: &mut StdRng,
) -> Result<(Config, Deck)> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    let full_deck = Order::from_symbols_per_card(args.symbols)?.deck_size();
    let request = DeckRequest::new(total_cards.unwrap_or(full_deck), args.symbols)?;

    let pool = SymbolPool::load(&config.image_dir).with_context(|| {
        format!(
            "failed to read symbol images from {}",
            config.image_dir.display()
        )
    })?;
    let deck = generate_deck(&request, &pool, rng)?;
    Ok((config, deck))
}
