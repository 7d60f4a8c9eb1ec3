use crate::tiles::{StartingPoint, TileType};
use crate::Error;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Tile {
    kind: TileType,
    /// Length of the vertical run of open tiles containing this tile, 0 if closed.
    vertical_run: usize,
    /// Row where that vertical run starts.
    run_top: usize,
}

impl Tile {
    fn new(kind: TileType) -> Tile {
        Tile {
            kind,
            vertical_run: 0,
            run_top: 0,
        }
    }
}

/// Template of a board to be filled, with the locations of open and closed tiles.
///
/// A template is parsed from rows of `O` (open) and `X` (closed) characters.
/// All rows must have the same length.
/// The horizontal starting points are computed once, in row-major order,
/// and that order drives the enumeration order of [`BoardBuilder`](crate::BoardBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    starting_points: Vec<StartingPoint>,
}

impl FromStr for TileGrid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().collect();
        TileGrid::from_rows(&rows)
    }
}

/// Display the template as `height` lines of `O` and `X`.
impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = self
            .tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|tile| tile.kind.to_char()).collect::<String>())
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{}", repr)
    }
}

impl TileGrid {
    /// Create a `TileGrid` from rows of `O` and `X` characters.
    ///
    /// ## Errors
    /// - [`EmptyTemplate`](Error::EmptyTemplate) if there are no rows or the first row is empty.
    /// - [`InvalidRowLength`](Error::InvalidRowLength) if a row differs in length from the first row.
    /// - [`InvalidTile`](Error::InvalidTile) for any character other than `O` or `X`.
    /// ## Examples
    /// ```
    /// # use gridfill::{TileGrid, TileType, Error};
    /// let grid = TileGrid::from_rows(&["OOOO", "OXXO", "OXXO"])?;
    /// assert_eq!(grid.width(), 4);
    /// assert_eq!(grid.height(), 3);
    /// assert_eq!(grid.tile_type(1, 1)?, TileType::Closed);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<TileGrid, Error> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(Error::EmptyTemplate);
        }
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(Error::InvalidRowLength {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let kind = TileType::from_char(ch).ok_or(Error::InvalidTile { x, y, ch })?;
                tiles.push(Tile::new(kind));
            }
        }
        let mut grid = TileGrid {
            width,
            height,
            tiles,
            starting_points: Vec::new(),
        };
        grid.starting_points = grid.record_horizontal_starting_points();
        grid.record_vertical_runs();
        debug!(
            "Template {}x{}: {} open tiles, {} starting points",
            width,
            height,
            grid.open_tile_count(),
            grid.starting_points.len()
        );
        Ok(grid)
    }

    /// Read a template from `reader`, one row per line.
    /// ## Errors
    /// If the reader fails, or the rows do not form a valid template.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<TileGrid, Error> {
        let rows = reader
            .lines()
            .collect::<Result<Vec<String>, _>>()
            .map_err(|source| Error::ReadError {
                path: String::new(),
                source,
            })?;
        TileGrid::from_rows(&rows)
    }

    /// Read a template from `path`, one row per line.
    /// ## Errors
    /// If the file can not be read, or its rows do not form a valid template.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<TileGrid, Error> {
        let path = path.as_ref();
        let read_error = |source| Error::ReadError {
            path: path.display().to_string(),
            source,
        };
        let file = File::open(path).map_err(read_error)?;
        match TileGrid::from_reader(BufReader::new(file)) {
            Err(Error::ReadError { source, .. }) => Err(read_error(source)),
            result => result,
        }
    }

    /// Template width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Template height
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of open tiles in the template.
    pub fn open_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.kind.is_open()).count()
    }

    /// The type of the tile at `(x, y)`.
    /// ## Errors
    /// [`OutOfBounds`](Error::OutOfBounds) if `(x, y)` lies outside the template.
    pub fn tile_type(&self, x: usize, y: usize) -> Result<TileType, Error> {
        self.tile(x, y).map(|tile| tile.kind)
    }

    /// The starting points of all horizontal words, in row-major order.
    pub fn horizontal_starting_points(&self) -> &[StartingPoint] {
        &self.starting_points
    }

    /// The length of the vertical word that the tile at `(x, y)` is part of.
    /// Closed tiles are not part of a word and return 0.
    /// ## Errors
    /// [`OutOfBounds`](Error::OutOfBounds) if `(x, y)` lies outside the template.
    pub fn vertical_run_length(&self, x: usize, y: usize) -> Result<usize, Error> {
        self.tile(x, y).map(|tile| tile.vertical_run)
    }

    /// Row where the vertical word through the open tile at `(x, y)` starts.
    /// The caller guarantees `(x, y)` is inside the template.
    pub(crate) fn vertical_run_top(&self, x: usize, y: usize) -> usize {
        self.tiles[self.index(x, y)].run_top
    }

    /// Unchecked variant of [`vertical_run_length`](Self::vertical_run_length).
    pub(crate) fn run_length_at(&self, x: usize, y: usize) -> usize {
        self.tiles[self.index(x, y)].vertical_run
    }

    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn tile(&self, x: usize, y: usize) -> Result<&Tile, Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(&self.tiles[self.index(x, y)])
    }

    fn record_horizontal_starting_points(&self) -> Vec<StartingPoint> {
        let mut points = Vec::new();
        for (y, row) in self.tiles.chunks(self.width).enumerate() {
            let mut point: Option<StartingPoint> = None;
            for (x, tile) in row.iter().enumerate() {
                if !tile.kind.is_open() {
                    points.extend(point.take());
                } else if let Some(p) = point.as_mut() {
                    p.length += 1;
                } else {
                    point = Some(StartingPoint::new(x, y, 1));
                }
            }
            points.extend(point);
        }
        points
    }

    fn record_vertical_runs(&mut self) {
        for x in 0..self.width {
            let mut top: Option<usize> = None;
            for y in 0..=self.height {
                let open = y < self.height && self.tiles[self.index(x, y)].kind.is_open();
                match (open, top) {
                    (true, None) => top = Some(y),
                    (false, Some(run_top)) => {
                        // back-fill every tile of the run that just closed
                        let length = y - run_top;
                        for dy in run_top..y {
                            let i = self.index(x, dy);
                            self.tiles[i].vertical_run = length;
                            self.tiles[i].run_top = run_top;
                        }
                        top = None;
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Result<T> = std::result::Result<T, Error>;

    const WRONG_SIZE_BOARD: &[&str] = &["OOOO", "OXXO", "OO", "OO"];
    const MEDIUM_BOARD: &[&str] = &["OOOOO", "OXXXO", "OXXXO", "OOOOO"];
    const SMALL_BOARD: &[&str] = &["OOOO", "OXXO", "OXXO"];
    const BLOCKED_BOARD: &[&str] = &[
        "XOOOXXOOOX",
        "OOOOXXOOOO",
        "OOOOXXOOOO",
        "OOOOOOOOOO",
        "XXXOOOOXXX",
        "XXXOOOOXXX",
        "OOOOOOOOOO",
        "OOOOXXOOOO",
        "OOOOXXOOOO",
        "XOOOXXOOOX",
    ];

    #[test]
    fn test_rows_must_have_same_length() {
        let err = TileGrid::from_rows(WRONG_SIZE_BOARD).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(
            err,
            Error::InvalidRowLength {
                row: 2,
                expected: 4,
                found: 2
            }
        ));
    }

    #[test]
    fn test_empty_template() {
        let rows: &[&str] = &[];
        assert!(matches!(
            TileGrid::from_rows(rows),
            Err(Error::EmptyTemplate)
        ));
        assert!(matches!("".parse::<TileGrid>(), Err(Error::EmptyTemplate)));
    }

    #[test]
    fn test_invalid_tile() {
        let err = TileGrid::from_rows(&["OOO", "O.O"]).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(err, Error::InvalidTile { x: 1, y: 1, ch: '.' }));
    }

    #[test]
    fn test_dimensions() -> Result<()> {
        let grid = TileGrid::from_rows(MEDIUM_BOARD)?;
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        Ok(())
    }

    #[test]
    fn test_tile_types() -> Result<()> {
        let grid = TileGrid::from_rows(SMALL_BOARD)?;
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.tile_type(0, 0)?, TileType::Open);
        assert_eq!(grid.tile_type(1, 1)?, TileType::Closed);
        assert_eq!(grid.tile_type(2, 2)?, TileType::Closed);
        assert_eq!(grid.tile_type(3, 1)?, TileType::Open);
        assert_eq!(grid.tile_type(0, 2)?, TileType::Open);
        assert_eq!(grid.open_tile_count(), 8);
        Ok(())
    }

    #[test]
    fn test_out_of_bounds() -> Result<()> {
        let grid = TileGrid::from_rows(SMALL_BOARD)?;
        assert!(matches!(
            grid.tile_type(4, 0),
            Err(Error::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(matches!(
            grid.vertical_run_length(0, 3),
            Err(Error::OutOfBounds { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_vertical_runs() -> Result<()> {
        let grid = TileGrid::from_rows(MEDIUM_BOARD)?;
        assert_eq!(grid.vertical_run_length(0, 2)?, 4);
        assert_eq!(grid.vertical_run_length(1, 0)?, 1);
        assert_eq!(grid.vertical_run_length(1, 3)?, 1);
        assert_eq!(grid.vertical_run_length(2, 1)?, 0);
        assert_eq!(grid.vertical_run_top(1, 3), 3);
        assert_eq!(grid.vertical_run_top(4, 2), 0);

        let grid = TileGrid::from_rows(&["OX", "OO", "XO", "OO"])?;
        assert_eq!(grid.vertical_run_length(0, 0)?, 2);
        assert_eq!(grid.vertical_run_length(0, 3)?, 1);
        assert_eq!(grid.vertical_run_length(1, 1)?, 3);
        assert_eq!(grid.vertical_run_top(1, 3), 1);
        Ok(())
    }

    #[test]
    fn test_starting_points() -> Result<()> {
        let grid = TileGrid::from_rows(BLOCKED_BOARD)?;
        let expect = [
            (1, 0, 3),
            (6, 0, 3),
            (0, 1, 4),
            (6, 1, 4),
            (0, 2, 4),
            (6, 2, 4),
            (0, 3, 10),
            (3, 4, 4),
            (3, 5, 4),
            (0, 6, 10),
            (0, 7, 4),
            (6, 7, 4),
            (0, 8, 4),
            (6, 8, 4),
            (1, 9, 3),
            (6, 9, 3),
        ];
        let points = grid.horizontal_starting_points();
        assert_eq!(points.len(), expect.len());
        for (point, &(x, y, length)) in points.iter().zip(&expect) {
            assert_eq!(*point, StartingPoint::new(x, y, length));
        }
        Ok(())
    }

    #[test]
    fn test_single_tile_runs() -> Result<()> {
        let grid = TileGrid::from_rows(&["OXO"])?;
        assert_eq!(
            grid.horizontal_starting_points(),
            &[StartingPoint::new(0, 0, 1), StartingPoint::new(2, 0, 1)]
        );
        assert_eq!(grid.vertical_run_length(2, 0)?, 1);
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<()> {
        let text = BLOCKED_BOARD.join("\n");
        let a: TileGrid = text.parse()?;
        let b: TileGrid = text.parse()?;
        assert_eq!(a, b);
        assert_eq!(a.to_string(), text);
        Ok(())
    }

    #[test]
    fn test_from_reader() -> Result<()> {
        let grid = TileGrid::from_reader("OO\r\nOX\n".as_bytes())?;
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile_type(1, 1)?, TileType::Closed);
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let err = TileGrid::from_file("no/such/template.txt").unwrap_err();
        assert!(matches!(err, Error::ReadError { ref path, .. } if path == "no/such/template.txt"));
    }
}
