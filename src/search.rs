use crate::{CompletedBoard, StartingPoint, TileGrid, WordIndex};
use log::{debug, trace};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tinyvec::TinyVec;

/// Words reserved by one placement: the horizontal word and the vertical words it completes.
type Reserved<'a> = TinyVec<[&'a str; 8]>;

/// How a search ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Every assignment was explored.
    Exhausted,
    /// The board limit was reached.
    LimitReached,
    /// The cancel flag was raised, or the board callback asked to stop.
    Cancelled,
}

/// Counters collected during a search.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Candidate words tested at a starting point.
    pub candidates: u64,
    /// Candidates that fit and were placed.
    pub placements: u64,
    /// Starting points that ran out of candidates.
    pub backtracks: u64,
    /// Completed boards found.
    pub boards: u64,
}

/// The boards found by [`BoardBuilder::search`], with the reason the search ended.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub boards: Vec<CompletedBoard>,
    pub status: SearchStatus,
    pub stats: SearchStats,
}

/// Enumerates every way to fill a [`TileGrid`] with words from a [`WordIndex`].
///
/// Every horizontal and vertical run of open tiles must be a word of the index, and no word
/// longer than one letter may appear twice on a board.
/// Starting points are filled in the order of
/// [`horizontal_starting_points`](TileGrid::horizontal_starting_points), trying the
/// candidates of each point in sorted order, so the boards come out in a deterministic order.
///
/// The builder only holds configuration; each search owns its own state.
///
/// ## Examples
/// ```
/// use gridfill::{BoardBuilder, TileGrid, WordIndex};
/// # use gridfill::Error;
/// let index = WordIndex::from_words(&["ab", "bc", "ad", "dc"]);
/// let grid = TileGrid::from_rows(&["OO", "OO"])?;
/// let boards = BoardBuilder::new().build(&index, &grid);
/// assert_eq!(boards.len(), 2);
/// assert_eq!(boards[0].to_string(), "ab\ndc");
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    limit: Option<usize>,
    cancel: Option<Arc<AtomicBool>>,
}

impl BoardBuilder {
    /// A builder that enumerates all boards.
    pub fn new() -> BoardBuilder {
        BoardBuilder::default()
    }

    /// Stop the search after `limit` boards.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> BoardBuilder {
        self.limit = Some(limit);
        self
    }

    /// Stop the search as soon as `flag` is set.
    /// The flag is checked once per starting point expansion.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> BoardBuilder {
        self.cancel = Some(flag);
        self
    }

    /// Find all completed boards.
    pub fn build(&self, index: &WordIndex, grid: &TileGrid) -> Vec<CompletedBoard> {
        self.search(index, grid).boards
    }

    /// Find all completed boards, and report why and how the search ended.
    pub fn search(&self, index: &WordIndex, grid: &TileGrid) -> SearchOutcome {
        let mut boards = Vec::new();
        let (status, stats) = self.visit(index, grid, |board| {
            boards.push(board);
            ControlFlow::Continue(())
        });
        SearchOutcome {
            boards,
            status,
            stats,
        }
    }

    /// Pass each completed board to `on_board` as soon as it is found.
    /// Returning `ControlFlow::Break` from `on_board` stops the search with
    /// [`SearchStatus::Cancelled`].
    pub fn visit<F>(
        &self,
        index: &WordIndex,
        grid: &TileGrid,
        mut on_board: F,
    ) -> (SearchStatus, SearchStats)
    where
        F: FnMut(CompletedBoard) -> ControlFlow<()>,
    {
        let mut search = Search::new(index, grid);
        debug!(
            "Search {} starting points with {} words",
            search.points.len(),
            index.len()
        );
        let status = self.run(&mut search, &mut on_board);
        debug!("Search {:?}: {:?}", status, search.stats);
        (status, search.stats)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn run<'a, F>(&self, search: &mut Search<'a>, on_board: &mut F) -> SearchStatus
    where
        F: FnMut(CompletedBoard) -> ControlFlow<()>,
    {
        if self.limit == Some(0) {
            return SearchStatus::LimitReached;
        }
        // depth of a frame is its position in the stack
        let mut stack: Vec<Frame<'a>> = vec![Frame::default()];
        while !stack.is_empty() {
            if self.is_cancelled() {
                return SearchStatus::Cancelled;
            }
            let depth = stack.len() - 1;
            let frame = &mut stack[depth];
            search.release(&mut frame.reserved);
            if depth == search.points.len() {
                stack.pop();
                search.stats.boards += 1;
                trace!("Found board {}", search.stats.boards);
                if on_board(search.snapshot()).is_break() {
                    return SearchStatus::Cancelled;
                }
                if self
                    .limit
                    .map_or(false, |limit| search.stats.boards >= limit as u64)
                {
                    return SearchStatus::LimitReached;
                }
            } else if search.place_next(depth, frame) {
                stack.push(Frame::default());
            } else {
                stack.pop();
                search.stats.backtracks += 1;
            }
        }
        SearchStatus::Exhausted
    }
}

/// Search progress at one starting point.
#[derive(Debug, Default)]
struct Frame<'a> {
    /// Position of the next candidate in the bucket of this starting point.
    cursor: usize,
    /// Words reserved by the placement currently committed at this depth.
    reserved: Reserved<'a>,
}

/// State of one search: a scratch board reused by all branches, and the reserved words.
struct Search<'a> {
    index: &'a WordIndex,
    grid: &'a TileGrid,
    points: &'a [StartingPoint],
    letters: Vec<Option<char>>,
    used: HashSet<&'a str>,
    candidate: Vec<char>,
    prefix: String,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(index: &'a WordIndex, grid: &'a TileGrid) -> Search<'a> {
        let points = grid.horizontal_starting_points();
        Search {
            index,
            grid,
            points,
            letters: vec![None; grid.width() * grid.height()],
            used: HashSet::with_capacity(points.len() * 2),
            candidate: Vec::with_capacity(grid.width()),
            prefix: String::with_capacity(grid.height()),
            stats: SearchStats::default(),
        }
    }

    fn snapshot(&self) -> CompletedBoard {
        CompletedBoard::new(self.grid.width(), self.grid.height(), self.letters.clone())
    }

    /// Place the next fitting candidate at the starting point of `frame`.
    /// Returns false when the candidates are exhausted.
    fn place_next(&mut self, depth: usize, frame: &mut Frame<'a>) -> bool {
        let index = self.index;
        let point = self.points[depth];
        let candidates = index.by_length(point.length);
        while let Some(candidate) = candidates.get(frame.cursor) {
            frame.cursor += 1;
            self.stats.candidates += 1;
            if point.length > 1 && self.used.contains(candidate.as_str()) {
                continue;
            }
            if let Some(completed) = self.check(point, candidate) {
                self.commit(point, candidate, completed, &mut frame.reserved);
                self.stats.placements += 1;
                return true;
            }
        }
        false
    }

    /// Check the vertical words crossing `candidate` at `point`.
    /// Returns the vertical words of more than one letter that the candidate completes,
    /// or None if the candidate does not fit.
    fn check(&mut self, point: StartingPoint, candidate: &'a str) -> Option<Reserved<'a>> {
        let index = self.index;
        let grid = self.grid;
        self.candidate.clear();
        self.candidate.extend(candidate.chars());
        let mut completed = Reserved::new();
        for (letter, (x, y)) in self.candidate.iter().zip(point.cells()) {
            let run = grid.run_length_at(x, y);
            let top = grid.vertical_run_top(x, y);
            self.prefix.clear();
            for above in top..y {
                self.prefix.extend(self.letters[grid.index(x, above)]);
            }
            self.prefix.push(*letter);
            if y - top + 1 < run {
                if !index.has_prefix(&self.prefix, run) {
                    return None;
                }
                continue;
            }
            let word = index.lookup(&self.prefix)?;
            // a single tile is both a horizontal and a vertical word of one letter
            if run > 1 {
                if word == candidate || self.used.contains(word) || completed.contains(&word) {
                    return None;
                }
                completed.push(word);
            }
        }
        Some(completed)
    }

    fn commit(
        &mut self,
        point: StartingPoint,
        candidate: &'a str,
        completed: Reserved<'a>,
        reserved: &mut Reserved<'a>,
    ) {
        for (&letter, (x, y)) in self.candidate.iter().zip(point.cells()) {
            self.letters[self.grid.index(x, y)] = Some(letter);
        }
        if point.length > 1 {
            reserved.push(candidate);
        }
        reserved.extend(completed);
        self.used.extend(reserved.iter().copied());
    }

    fn release(&mut self, reserved: &mut Reserved<'a>) {
        for word in reserved.drain(..) {
            self.used.remove(word);
        }
    }
}
