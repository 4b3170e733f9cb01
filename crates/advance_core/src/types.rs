use std::fmt;
use std::str::FromStr;

/// The board is a fixed 9x9 grid.
pub const BOARD_SIZE: i8 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    pub fn other(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Colour::White => 0,
            Colour::Black => 1,
        }
    }

    /// Forward sign for Zombie movement: White advances toward row 0,
    /// Black toward row 8.
    pub fn direction(self) -> i8 {
        match self {
            Colour::White => -1,
            Colour::Black => 1,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Colour::White),
            "black" => Ok(Colour::Black),
            _ => Err(format!("unrecognised colour '{s}' (expected white or black)")),
        }
    }
}

/// A board coordinate. Row 0 is Black's back rank, row 8 is White's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Bounds-checked square constructor.
pub fn square(row: i8, col: i8) -> Option<Square> {
    if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
        Some(Square { row, col })
    } else {
        None
    }
}
