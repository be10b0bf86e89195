use std::collections::HashSet;

use crate::affiliation::FlowId;
use crate::shape::SquareStep;

/// What occupies a cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FrozenCellType {
    /// One of the two fixed termini of a flow.
    Terminus {
        /// Owning flow.
        flow: FlowId,
    },
    /// A drawn node between the termini of a flow.
    Path {
        /// Owning flow.
        flow: FlowId,
    },
    /// Nothing.
    #[default]
    Empty,
}

/// A cell, frozen for drawing or printing.
///
/// `exits` lists the directions in which this cell's node links to a neighbor of the same flow.
/// Open links of an incomplete flow are not exits.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrozenCell {
    /// Directions leaving this cell along its flow.
    pub exits: HashSet<SquareStep>,
    /// Occupant of the cell.
    pub cell_type: FrozenCellType,
}

impl FrozenCell {
    /// The flow owning this cell, if any.
    pub fn flow(&self) -> Option<FlowId> {
        match self.cell_type {
            FrozenCellType::Terminus { flow } | FrozenCellType::Path { flow } => Some(flow),
            FrozenCellType::Empty => None,
        }
    }
}
