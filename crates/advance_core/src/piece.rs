use crate::types::{Colour, Square};

/// Index of a piece in the game's arena. Ids stay stable for the lifetime
/// of the game; a captured piece keeps its id and merely goes off-board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Zombie,
    Builder,
    Miner,
    Jester,
    Sentinel,
    Catapult,
    Dragon,
    General,
    Wall,
}

impl PieceKind {
    pub const ALL: [PieceKind; 9] = [
        PieceKind::Zombie,
        PieceKind::Builder,
        PieceKind::Miner,
        PieceKind::Jester,
        PieceKind::Sentinel,
        PieceKind::Catapult,
        PieceKind::Dragon,
        PieceKind::General,
        PieceKind::Wall,
    ];

    /// Fixed material values used by the evaluation.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Zombie => 1,
            PieceKind::Builder => 2,
            PieceKind::Jester => 3,
            PieceKind::Miner => 4,
            PieceKind::Sentinel => 5,
            PieceKind::Catapult => 6,
            PieceKind::Dragon => 7,
            PieceKind::General => 1000,
            PieceKind::Wall => 0,
        }
    }

    /// Whether attack generation demands an enemy-owned occupant on the
    /// target. Only the Builder may also "attack" an ownerless Wall.
    pub fn requires_enemy_to_attack(self) -> bool {
        !matches!(self, PieceKind::Builder)
    }

    fn letter(self) -> char {
        match self {
            PieceKind::Zombie => 'z',
            PieceKind::Builder => 'b',
            PieceKind::Miner => 'm',
            PieceKind::Jester => 'j',
            PieceKind::Sentinel => 's',
            PieceKind::Catapult => 'c',
            PieceKind::Dragon => 'd',
            PieceKind::General => 'g',
            PieceKind::Wall => '#',
        }
    }

    /// Decodes a position-file icon: uppercase is White, lowercase Black,
    /// '#' an ownerless Wall.
    pub fn from_icon(icon: char) -> Option<(PieceKind, Option<Colour>)> {
        if icon == '#' {
            return Some((PieceKind::Wall, None));
        }
        let kind = match icon.to_ascii_lowercase() {
            'z' => PieceKind::Zombie,
            'b' => PieceKind::Builder,
            'm' => PieceKind::Miner,
            'j' => PieceKind::Jester,
            's' => PieceKind::Sentinel,
            'c' => PieceKind::Catapult,
            'd' => PieceKind::Dragon,
            'g' => PieceKind::General,
            _ => return None,
        };
        let colour = if icon.is_ascii_uppercase() {
            Colour::White
        } else {
            Colour::Black
        };
        Some((kind, Some(colour)))
    }
}

#[derive(Clone, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    /// None for Walls; everything else belongs to a side (Defect flips it).
    pub owner: Option<Colour>,
    /// None while the piece is off-board (captured).
    pub square: Option<Square>,
}

impl Piece {
    pub fn on_board(&self) -> bool {
        self.square.is_some()
    }

    /// One-character icon: uppercase White, lowercase Black, '#' for Walls
    /// regardless of colour.
    pub fn icon(&self) -> char {
        if self.kind == PieceKind::Wall {
            return '#';
        }
        match self.owner {
            Some(Colour::White) => self.kind.letter().to_ascii_uppercase(),
            _ => self.kind.letter(),
        }
    }
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
