use crate::piece::PieceId;
use crate::types::{square, Square, BOARD_SIZE};
use thiserror::Error;

const CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
}

/// The 9x9 grid. Cells hold at most one occupant, addressed by arena id;
/// the mutual piece<->square link is maintained by `Game`.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Option<PieceId>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [None; CELLS],
        }
    }

    pub fn occupant(&self, sq: Square) -> Option<PieceId> {
        self.cells[sq.index()]
    }

    pub fn is_free(&self, sq: Square) -> bool {
        self.occupant(sq).is_none()
    }

    /// Fails if the square is already occupied.
    pub fn place(&mut self, sq: Square, id: PieceId) -> Result<(), BoardError> {
        if self.cells[sq.index()].is_some() {
            return Err(BoardError::Occupied(sq));
        }
        self.cells[sq.index()] = Some(id);
        Ok(())
    }

    /// Clears the occupant unconditionally, returning it if there was one.
    pub fn remove(&mut self, sq: Square) -> Option<PieceId> {
        self.cells[sq.index()].take()
    }

    /// All squares in row-major order.
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// The <=4 orthogonal neighbours that exist on the grid, in stable
/// row-major order.
pub fn adjacent_squares(sq: Square) -> Vec<Square> {
    const DELTAS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
    DELTAS
        .iter()
        .filter_map(|&(dr, dc)| square(sq.row + dr, sq.col + dc))
        .collect()
}

/// The <=8 king-move neighbours that exist on the grid, in stable
/// row-major order.
pub fn neighbour_squares(sq: Square) -> Vec<Square> {
    const DELTAS: [(i8, i8); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    DELTAS
        .iter()
        .filter_map(|&(dr, dc)| square(sq.row + dr, sq.col + dc))
        .collect()
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
