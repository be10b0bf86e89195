use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A single coordinate along one axis of the board.
pub type Coord = usize;
/// The side length of a board, which is never zero.
pub type Dimension = NonZero<Coord>;

/// A cell of the board in `(x, y)` order, 0-based, with the origin at the top left.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// Row-major index into an [`ndarray::Array2`].
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Offset this location by `rhs`, wrapping instead of going negative.
    ///
    /// A wrapped coordinate lands far outside any board, so [`Self::is_within`] rejects it.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a square board with side `size`.
    pub fn is_within(&self, size: Dimension) -> bool {
        self.0 < size.get() && self.1 < size.get()
    }

    /// Taxicab distance to `other`.
    pub fn manhattan(&self, other: Location) -> usize {
        self.0.abs_diff(other.0).saturating_add(self.1.abs_diff(other.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
