use std::fmt;

/// The leftmost cell of a maximal horizontal run of open tiles, with the run length.
/// Anchors one horizontal word placement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartingPoint {
    pub x: usize,
    pub y: usize,
    /// word length including the starting point
    pub length: usize,
}

impl StartingPoint {
    pub fn new(x: usize, y: usize, length: usize) -> StartingPoint {
        StartingPoint { x, y, length }
    }

    /// Iterate over the `(x, y)` cells covered by the word.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let y = self.y;
        (self.x..self.x + self.length).map(move |x| (x, y))
    }
}

impl fmt::Display for StartingPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{}:{})", self.x, self.y, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        let point = StartingPoint::new(2, 5, 3);
        assert_eq!(point.cells().collect::<Vec<_>>(), [(2, 5), (3, 5), (4, 5)]);
        assert_eq!(point.to_string(), "(2,5:3)");
        assert_eq!(point, StartingPoint { x: 2, y: 5, length: 3 });
    }
}
