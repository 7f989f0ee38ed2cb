//! Deck rendering (`spotdeck generate`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use spotdeck::{CardShape, LayoutEngine, PdfCanvas, RasterCanvas, render_deck};

use crate::cli::common::{DeckArgs, OutputFormatArg};
use crate::cli::utils::{build_deck, seeded_rng};

/// Arguments for `spotdeck generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of cards to print; capped at the size of the full deck.
    #[arg(short = 'n', long = "cards")]
    pub cards: usize,
    #[command(flatten)]
    pub deck: DeckArgs,
    /// Draw round cards instead of square ones.
    #[arg(long)]
    pub round: bool,
    /// Output file (PNG pages are written next to it as `<stem>_page_NNN.png`).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value_t = OutputFormatArg::Pdf, value_enum)]
    pub format: OutputFormatArg,
}

/// Execute `spotdeck generate`.
pub fn handle(args: GenerateArgs) -> Result<()> {
    let (seed, mut rng) = seeded_rng(args.deck.seed);
    let (mut config, deck) = build_deck(&args.deck, Some(args.cards), &mut rng)?;
    if let Some(output) = args.output {
        config.output = output;
    }

    let shape = if args.round {
        CardShape::Round
    } else {
        CardShape::Square
    };
    let engine = LayoutEngine::new(&config, shape)?;
    let output = config.output.clone();
    let summary = match args.format {
        OutputFormatArg::Pdf => {
            let title = format!(
                "spotdeck: {} cards, {} symbols each (seed {seed})",
                deck.len(),
                deck.symbols_per_card()
            );
            render_deck(&deck, &engine, &config, PdfCanvas::new(title), &output, &mut rng)
        }
        OutputFormatArg::Png => render_deck(
            &deck,
            &engine,
            &config,
            RasterCanvas::new(config.px_per_mm()),
            &output,
            &mut rng,
        ),
    }
    .with_context(|| format!("failed to render deck to {}", output.display()))?;

    println!(
        "Rendered {} card(s) on {} page(s) (seed {seed})",
        summary.cards, summary.pages
    );
    for path in &summary.outputs {
        println!("  {}", path.display());
    }
    Ok(())
}
