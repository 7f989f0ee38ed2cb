//! Command-line interface wiring for the `spotdeck` binary.
//!
//! This module owns the clap definitions and delegates execution to one
//! submodule per command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod generate;
pub mod plan;
pub mod utils;
pub mod verify;

/// Parsed CLI entrypoint for the `spotdeck` binary.
#[derive(Parser, Debug)]
#[command(
    name = "spotdeck",
    version,
    about = "Generate printable spot-it style matching card decks"
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a deck and render it to a PDF (or PNG pages).
    Generate(generate::GenerateArgs),
    /// Build a deck and print its cards without rendering.
    Plan(plan::PlanArgs),
    /// Check that the plane construction holds for one or more orders.
    Verify(verify::VerifyArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate::handle(args),
        Command::Plan(args) => plan::handle(args),
        Command::Verify(args) => verify::handle(args),
    }
}
