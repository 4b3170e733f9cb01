use crate::board::{Board, BoardError};
use crate::piece::{Piece, PieceId, PieceKind};
use crate::types::{Colour, Square, BOARD_SIZE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("ran out of data before reading the full board")]
    Truncated,
    #[error("row {0} is not {BOARD_SIZE} characters long")]
    BadRowLength(usize),
    #[error("unrecognised icon '{0}'")]
    UnknownIcon(char),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One game: the board, the piece arena, and both armies. All mutation of
/// the piece<->square occupancy link goes through the methods here so the
/// two directions never disagree.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    pieces: Vec<Piece>,
    armies: [Vec<PieceId>; 2],
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            pieces: Vec::new(),
            armies: [Vec::new(), Vec::new()],
        }
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0 as usize]
    }

    fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0 as usize]
    }

    pub fn occupant(&self, sq: Square) -> Option<PieceId> {
        self.board.occupant(sq)
    }

    pub fn occupant_piece(&self, sq: Square) -> Option<&Piece> {
        self.occupant(sq).map(|id| self.piece(id))
    }

    /// The ordered piece collection of one side. Membership changes only
    /// through recruitment and `defect`, never through captures.
    pub fn army(&self, colour: Colour) -> &[PieceId] {
        &self.armies[colour.idx()]
    }

    /// Creates a piece already placed on `at`. Walls (owner None) belong
    /// to no army.
    pub fn recruit(
        &mut self,
        kind: PieceKind,
        owner: Option<Colour>,
        at: Square,
    ) -> Result<PieceId, BoardError> {
        let id = PieceId(self.pieces.len() as u32);
        self.board.place(at, id)?;
        self.pieces.push(Piece {
            kind,
            owner,
            square: Some(at),
        });
        if let Some(colour) = owner {
            self.armies[colour.idx()].push(id);
        }
        Ok(id)
    }

    /// Takes the piece off the board, clearing both sides of the occupancy
    /// link. A no-op for a piece that is already off-board.
    pub fn leave_board(&mut self, id: PieceId) {
        if let Some(sq) = self.piece(id).square {
            self.board.remove(sq);
            self.piece_mut(id).square = None;
        }
    }

    /// Puts an off-board piece back on a free square.
    pub fn enter_board(&mut self, id: PieceId, at: Square) -> Result<(), BoardError> {
        self.board.place(at, id)?;
        self.piece_mut(id).square = Some(at);
        Ok(())
    }

    /// Reassigns the piece to the opposing side, moving it between the two
    /// army collections. Defect is its own inverse.
    pub fn defect(&mut self, id: PieceId) {
        if let Some(owner) = self.piece(id).owner {
            let new_owner = owner.other();
            self.armies[owner.idx()].retain(|&p| p != id);
            self.armies[new_owner.idx()].push(id);
            self.piece_mut(id).owner = Some(new_owner);
        }
    }

    /// Creates an ownerless Wall on a free square (BuildWall).
    pub(crate) fn spawn_wall(&mut self, at: Square) -> Result<PieceId, BoardError> {
        let id = PieceId(self.pieces.len() as u32);
        self.board.place(at, id)?;
        self.pieces.push(Piece {
            kind: PieceKind::Wall,
            owner: None,
            square: Some(at),
        });
        Ok(id)
    }

    /// Undo partner of `spawn_wall`. The strict do/undo stack discipline
    /// of the search guarantees the wall is still the newest arena entry.
    pub(crate) fn discard_wall(&mut self, id: PieceId) {
        debug_assert_eq!(id.0 as usize + 1, self.pieces.len());
        if let Some(sq) = self.piece(id).square {
            self.board.remove(sq);
        }
        self.pieces.pop();
    }

    /// The square of `colour`'s General, if it is on the board.
    pub fn general_square(&self, colour: Colour) -> Option<Square> {
        self.army(colour)
            .iter()
            .find(|&&id| self.piece(id).kind == PieceKind::General)
            .and_then(|&id| self.piece(id).square)
    }

    /// Removes every piece and wall, ready for a fresh `read_position`.
    pub fn clear(&mut self) {
        self.board = Board::new();
        self.pieces.clear();
        self.armies = [Vec::new(), Vec::new()];
    }

    /// Loads a position from the textual grid format: 9 lines of 9
    /// characters, '.' empty, '#' a Wall, letters case-coded by colour.
    pub fn read_position(&mut self, text: &str) -> Result<(), PositionError> {
        self.clear();
        let mut lines = text.lines();
        for row in 0..BOARD_SIZE {
            let line = lines.next().ok_or(PositionError::Truncated)?;
            let icons: Vec<char> = line.chars().collect();
            if icons.len() != BOARD_SIZE as usize {
                return Err(PositionError::BadRowLength(row as usize));
            }
            for (col, &icon) in icons.iter().enumerate() {
                if icon == '.' {
                    continue;
                }
                let (kind, owner) =
                    PieceKind::from_icon(icon).ok_or(PositionError::UnknownIcon(icon))?;
                let at = Square {
                    row,
                    col: col as i8,
                };
                self.recruit(kind, owner, at)?;
            }
        }
        Ok(())
    }

    /// Serializes the current occupancy to the textual grid format, one
    /// character per square, row-major, newline-terminated rows.
    pub fn write_position(&self) -> String {
        let mut out = String::with_capacity((BOARD_SIZE as usize + 1) * BOARD_SIZE as usize);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let sq = Square { row, col };
                match self.occupant_piece(sq) {
                    Some(piece) => out.push(piece.icon()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
