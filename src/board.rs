use crate::{TileGrid, TileType};
use std::fmt;

/// Character used to display closed tiles.
pub const CLOSED_DISPLAY: char = '.';

/// An immutable snapshot of one filled template.
/// Every open tile holds a letter, every closed tile holds `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedBoard {
    width: usize,
    height: usize,
    cells: Vec<Option<char>>,
}

/// Display the board as `height` lines of `width` characters.
/// Closed tiles show as ".".
impl fmt::Display for CompletedBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_strings().join("\n"))
    }
}

impl CompletedBoard {
    pub(crate) fn new(width: usize, height: usize, cells: Vec<Option<char>>) -> CompletedBoard {
        debug_assert_eq!(cells.len(), width * height);
        CompletedBoard {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The letter at `(x, y)`, or None for a closed tile or a position outside the board.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Get board cells as a vec of `height` strings
    pub fn to_strings(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.unwrap_or(CLOSED_DISPLAY))
                    .collect::<String>()
            })
            .collect()
    }

    /// All maximal runs of letters on the board, horizontal runs (left to right, row by row)
    /// followed by vertical runs (top to bottom, column by column).
    ///
    /// The runs follow the open tiles of `grid`, which must be the template the board was built from.
    pub fn words(&self, grid: &TileGrid) -> Vec<String> {
        let open = |x: usize, y: usize| grid.tile_type(x, y).ok() == Some(TileType::Open);
        let mut words = Vec::new();
        let mut collect = |cells: &mut dyn Iterator<Item = (usize, usize)>| {
            let mut word = String::new();
            for (x, y) in cells {
                match self.get(x, y) {
                    Some(letter) if open(x, y) => word.push(letter),
                    _ => {
                        if !word.is_empty() {
                            words.push(std::mem::take(&mut word));
                        }
                    }
                }
            }
            if !word.is_empty() {
                words.push(word);
            }
        };
        for y in 0..self.height {
            collect(&mut (0..self.width).map(|x| (x, y)));
        }
        for x in 0..self.width {
            collect(&mut (0..self.height).map(|y| (x, y)));
        }
        words
    }
}
