use std::fmt;

/// Marker for an open tile in template text.
pub const OPEN: char = 'O';
/// Marker for a closed tile in template text.
pub const CLOSED: char = 'X';

/// The type of a template tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileType {
    /// Open tiles require a letter.
    Open,
    /// Closed tiles never hold a letter, like the black squares of a crossword.
    Closed,
}

impl TileType {
    /// Map a template character to a tile type, or None if the character is not recognized.
    pub fn from_char(ch: char) -> Option<TileType> {
        match ch {
            OPEN => Some(TileType::Open),
            CLOSED => Some(TileType::Closed),
            _ => None,
        }
    }

    /// The template character for this tile type.
    pub fn to_char(self) -> char {
        match self {
            TileType::Open => OPEN,
            TileType::Closed => CLOSED,
        }
    }

    pub fn is_open(self) -> bool {
        self == TileType::Open
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
