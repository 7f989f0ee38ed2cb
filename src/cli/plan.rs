//! Deck listing without rendering (`spotdeck plan`).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use spotdeck::Deck;

use crate::cli::common::DeckArgs;
use crate::cli::utils::{build_deck, seeded_rng};

/// Arguments for `spotdeck plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Number of cards to list; defaults to the full deck.
    #[arg(short = 'n', long = "cards")]
    pub cards: Option<usize>,
    #[command(flatten)]
    pub deck: DeckArgs,
    /// Emit JSON instead of a text listing.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    generated_at: DateTime<Utc>,
    seed: u64,
    order: usize,
    symbols_per_card: usize,
    cards: Vec<Vec<&'a str>>,
}

impl<'a> PlanReport<'a> {
    fn new(deck: &'a Deck, seed: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            order: deck.order,
            symbols_per_card: deck.symbols_per_card(),
            cards: deck
                .cards
                .iter()
                .map(|card| card.symbols.iter().map(|s| s.name.as_str()).collect())
                .collect(),
        }
    }
}

/// Execute `spotdeck plan`.
pub fn handle(args: PlanArgs) -> Result<()> {
    let (seed, mut rng) = seeded_rng(args.deck.seed);
    let (_, deck) = build_deck(&args.deck, args.cards, &mut rng)?;
    let report = PlanReport::new(&deck, seed);

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialize deck plan")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "Deck of {} card(s), {} symbols each (order {}, seed {})",
        report.cards.len(),
        report.symbols_per_card,
        report.order,
        report.seed
    );
    for (idx, names) in report.cards.iter().enumerate() {
        println!("Card {:>4} | {}", idx + 1, names.join(", "));
    }
    Ok(())
}
