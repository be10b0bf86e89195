//! Cell geometry.

use std::hash::Hash;

use strum::VariantArray;

use crate::location::Location;

/// Stepping between neighboring cells, implemented per cell shape.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie off the board; callers check bounds themselves.
    fn attempt_from(&self, location: Location) -> Location;
}

/// The square cell type found on Flow Free boards.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Toward row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Toward column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}

/// Functionality on top of [`Step`] with identical implementation across all shapes.
pub trait BoardShape: Step {
    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Step::attempt_from) until one works.
    ///
    /// Returns [`None`] unless `a` and `b` are direct neighbors.
    fn direction_to(a: Location, b: Location) -> Option<Self>;
    /// The direction of a straight run from `from` to `to`.
    ///
    /// Returns [`None`] when the two locations coincide or share neither a row nor a column.
    fn toward(from: Location, to: Location) -> Option<Self>;
}

impl<Sh> BoardShape for Sh
where
    Sh: Step,
{
    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    fn toward(from: Location, to: Location) -> Option<Self> {
        if from == to || (from.0 != to.0 && from.1 != to.1) {
            return None;
        }

        // the one step that stays inside the box spanned by `from` and `to`; wrapped steps land far outside it
        let xs = from.0.min(to.0)..=from.0.max(to.0);
        let ys = from.1.min(to.1)..=from.1.max(to.1);
        Self::VARIANTS.iter()
            .find(|dir| {
                let next = dir.attempt_from(from);
                next != from && xs.contains(&next.0) && ys.contains(&next.1)
            })
            .copied()
    }
}
