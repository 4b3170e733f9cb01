//! Advance Turn Bot
//!
//! Plays exactly one turn: loads a position file, asks the minimax
//! engine for an action, applies it, and writes the resulting position.
//! On stalemate the position is written back unchanged; any other
//! failure aborts without touching the output path.

use std::fs;
use std::path::PathBuf;

use advance_core::{Action, Colour, Engine, Game, PieceId, SearchError};
use anyhow::{bail, Context, Result};
use clap::Parser;
use minimax_engine::MinimaxEngine;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Plays one turn of Advance")]
struct Cli {
    /// Side to play, "white" or "black" (case-insensitive)
    colour: Colour,
    /// Position file to load
    input: PathBuf,
    /// Path the resulting position is written to
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading position from {}", cli.input.display()))?;
    let mut game = Game::new();
    game.read_position(&text)
        .with_context(|| format!("loading position from {}", cli.input.display()))?;

    let mut engine = MinimaxEngine::new();
    info!(engine = engine.name(), colour = %cli.colour, "selecting action");

    match engine.choose_action(&mut game, cli.colour) {
        Ok(action) => {
            info!("playing: {}", describe(&game, action));
            match action.apply(&mut game) {
                Some(applied) => applied.commit(),
                None => bail!("chosen action was rejected by the board"),
            }
        }
        Err(SearchError::Stalemate) => {
            warn!(colour = %cli.colour, "stalemate, no legal action; position unchanged");
        }
        Err(err @ SearchError::NoDecision) => {
            return Err(err).context("turn selection failed");
        }
    }

    fs::write(&cli.output, game.write_position())
        .with_context(|| format!("writing position to {}", cli.output.display()))?;
    Ok(())
}

fn describe(game: &Game, action: Action) -> String {
    let kind = |id: PieceId| format!("{:?}", game.piece(id).kind);
    match action {
        Action::Move { actor, to } => format!("{} moves to {}", kind(actor), to),
        Action::Attack { actor, target } => format!("{} attacks {}", kind(actor), target),
        Action::BuildWall { actor, target } => format!("{} builds a wall on {}", kind(actor), target),
        Action::DestroyWall { actor, target } => {
            format!("{} razes the wall on {}", kind(actor), target)
        }
    }
}
