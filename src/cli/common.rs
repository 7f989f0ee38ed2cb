//! Shared clap argument types.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use spotdeck::Config;

/// Deck-building options accepted by `generate` and `plan`.
#[derive(Args, Debug, Clone)]
pub struct DeckArgs {
    /// Number of symbols printed on every card (at least 2).
    #[arg(short = 's', long = "symbols")]
    pub symbols: usize,
    /// Directory holding the PNG symbol images.
    #[arg(short = 'i', long = "images")]
    pub images: Option<PathBuf>,
    /// Seed for a reproducible deck; drawn at random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// JSON file with layout and path settings.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

impl DeckArgs {
    /// Overlay command-line values on top of file or default settings.
    pub fn apply(&self, config: &mut Config) {
        if let Some(images) = &self.images {
            config.image_dir = images.clone();
        }
    }
}

/// Output flavours for `generate`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// A single multi-page PDF.
    Pdf,
    /// One PNG file per page.
    Png,
}
