//! A grid filling library for Rust.
//! <br>
//! This crate enumerates every way to fill a crossword-like template with dictionary words,
//! such that every horizontal and every vertical run of open tiles is a word,
//! and no word longer than one letter is used twice on a board.
//!
//! # How to use `gridfill`
//! Load a [`WordIndex`] with one word per line, and parse a [`TileGrid`] from rows of
//! `O` (open) and `X` (closed) tiles. Then let a [`BoardBuilder`] enumerate the boards.
//! Words are stored lowercase. The search is a full enumeration, so its running time grows
//! exponentially with the template size: use [`BoardBuilder::with_limit`] or
//! [`BoardBuilder::with_cancel_flag`] to bound it.
//!
//! # Basic usage
//!  ```
//! # use gridfill::{BoardBuilder, Error, TileGrid, WordIndex};
//! let index = WordIndex::from_words(&["cat", "ore", "wed", "cow", "are", "ted"]);
//! let grid: TileGrid = "OOO\nOOO\nOOO".parse()?;
//! let boards = BoardBuilder::new().build(&index, &grid);
//! assert_eq!(boards.len(), 2);
//! for board in &boards {
//!     println!("{}\n", board);
//! }
//! # Ok::<(), Error>(())
//! ```
mod board;
mod error;
mod grid;
mod search;
mod tiles;
mod wordlist;

pub use crate::board::{CompletedBoard, CLOSED_DISPLAY};
pub use crate::error::Error;
pub use crate::grid::TileGrid;
pub use crate::search::{BoardBuilder, SearchOutcome, SearchStats, SearchStatus};
pub use crate::tiles::{StartingPoint, TileType};
pub use crate::wordlist::WordIndex;
