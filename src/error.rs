use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned
pub enum Error {
    /// Error reading a wordfile or template file.
    /// `path` is empty when reading from an in-memory reader.
    #[error("File \"{path}\" could not be read")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// The template has no rows, or its rows are empty
    #[error("Template is empty")]
    EmptyTemplate,

    /// All template rows must have the length of the first row
    #[error("Invalid template row {row}: length {found}, expect {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Template character is neither open (`O`) nor closed (`X`)
    #[error("Invalid template tile '{ch}' at x={x}, y={y}")]
    InvalidTile { x: usize, y: usize, ch: char },

    /// Attempt to query a tile outside the template
    #[error("Tile x={x}, y={y} is outside the {width}x{height} template")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl Error {
    /// True for errors caused by a malformed template.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyTemplate | Error::InvalidRowLength { .. } | Error::InvalidTile { .. }
        )
    }
}
