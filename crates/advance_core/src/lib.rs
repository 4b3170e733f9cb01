pub mod action;
pub mod board;
pub mod game;
pub mod piece;
pub mod rules;
pub mod types;

pub use action::{Action, Applied};
pub use board::{adjacent_squares, neighbour_squares, Board, BoardError};
pub use game::{Game, PositionError};
pub use piece::{Piece, PieceId, PieceKind};
pub use types::{square, Colour, Square, BOARD_SIZE};

use thiserror::Error;

// =============================================================================
// Engine trait — implemented by all turn-selection engines
// =============================================================================

/// Terminal outcomes of a turn selection that produce no action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The side to move has no legal action at all. This is a game-level
    /// terminal condition, not a fault.
    #[error("stalemate: no legal action for the side to move")]
    Stalemate,
    /// The search filtered every candidate away. Defended against but not
    /// expected to occur on a position with at least one legal action.
    #[error("search produced no decision")]
    NoDecision,
}

/// Trait all Advance engines implement, so callers can swap selection
/// strategies behind one interface.
pub trait Engine {
    /// Select one action for `colour` on the current position. The board
    /// is mutated during the search but restored before returning.
    fn choose_action(&mut self, game: &mut Game, colour: Colour) -> Result<Action, SearchError>;

    /// Returns the engine's name for operator-facing reporting.
    fn name(&self) -> &str;
}
