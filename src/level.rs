use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::{Display as StrumDisplay, FromRepr};

use crate::affiliation::{display_of, FlowId};
use crate::cell::{FrozenCell, FrozenCellType};
use crate::flow::{ChainPosition, Flow};
use crate::location::{Dimension, Location};
use crate::reclaim::ReclaimMode;
use crate::shape::{BoardShape, SquareStep};

/// How far a level has been solved, as persisted in level packs.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd, FromRepr, StrumDisplay)]
#[repr(u8)]
pub enum LevelState {
    /// Never solved.
    #[default]
    Uncompleted = 0,
    /// Solved at least once, but never with every cell covered.
    Completed = 1,
    /// Solved with every cell covered.
    Starred = 2,
}

/// A square board and the flows drawn on it.
///
/// [`Level`]s are loaded from level packs by [`load_levels`](crate::store::load_levels)
/// or put together by hand with a [`LevelBuilder`](crate::builder::LevelBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level {
    size: Dimension,
    pub(crate) flows: Vec<Flow>,
    pub(crate) state: LevelState,
    time_record: u32,
}

impl Level {
    pub(crate) fn new(size: Dimension, flows: Vec<Flow>, state: LevelState, time_record: u32) -> Self {
        Self {
            size,
            flows,
            state,
            time_record,
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> Dimension {
        self.size
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.size.get() * self.size.get()
    }

    /// All flows, in the order their termini were declared.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// The flow with index `flow`, if there is one.
    pub fn flow(&self, flow: FlowId) -> Option<&Flow> {
        self.flows.get(flow)
    }

    /// Number of flows on the board; at least 1.
    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    /// The persisted solve state; see [`Self::is_solved`] for the state of the board right now.
    pub fn rating(&self) -> LevelState {
        self.state
    }

    /// Best time recorded for this level. Display-only.
    pub fn time_record(&self) -> u32 {
        self.time_record
    }

    /// Replace the best time recorded for this level.
    pub fn set_time_record(&mut self, time_record: u32) {
        self.time_record = time_record;
    }

    /// Whether every flow on the board is currently connected.
    pub fn is_solved(&self) -> bool {
        self.flows.iter().all(Flow::is_completed)
    }

    /// The flow owning `location` and where in its chain the location sits.
    pub fn owner_of(&self, location: Location) -> Option<(FlowId, ChainPosition)> {
        self.flows.iter()
            .enumerate()
            .find_map(|(id, flow)| flow.position_of(location).map(|position| (id, position)))
    }

    /// Reclaim every flow back to its bare termini.
    ///
    /// The persisted [`rating`](Self::rating) and time record are kept.
    pub fn reset(&mut self) {
        for id in 0..self.flows.len() {
            let (first, last) = self.flows[id].termini();
            // the result only says whether anything was freed
            let _ = self.reclaim(first, ReclaimMode::FromCellOnward);
            let _ = self.reclaim(last, ReclaimMode::FromCellOnward);
            self.flows[id].reopen();
        }
    }

    /// Which flow owns each cell, indexed `[y, x]`.
    pub fn occupancy(&self) -> Array2<Option<FlowId>> {
        let mut ret = Array2::from_elem((self.size.get(), self.size.get()), None);
        for (id, flow) in self.flows.iter().enumerate() {
            for location in flow.chain() {
                if let Some(cell) = ret.get_mut(location.as_index()) {
                    *cell = Some(id);
                }
            }
        }

        ret
    }

    /// The occupant of `location` and the directions in which its path leaves it.
    pub fn cell_at(&self, location: Location) -> FrozenCell {
        let Some((id, position)) = self.owner_of(location) else {
            return FrozenCell::default();
        };
        let flow = &self.flows[id];

        let index = match position {
            ChainPosition::First => 0,
            ChainPosition::Interior(n) => n + 1,
            ChainPosition::Last => flow.node_count() - 1,
        };

        let mut exits = HashSet::with_capacity(2);
        let chain = flow.chain().collect_vec();
        if index > 0 && !flow.is_link_open(index - 1) {
            exits.extend(SquareStep::direction_to(location, chain[index - 1]));
        }
        if index + 1 < chain.len() && !flow.is_link_open(index) {
            exits.extend(SquareStep::direction_to(location, chain[index + 1]));
        }

        FrozenCell {
            exits,
            cell_type: match position {
                ChainPosition::Interior(_) => FrozenCellType::Path { flow: id },
                _ => FrozenCellType::Terminus { flow: id },
            },
        }
    }

    /// Every cell frozen for drawing, indexed `[y, x]`.
    pub fn frozen(&self) -> Array2<FrozenCell> {
        Array2::from_shape_fn((self.size.get(), self.size.get()), |index| self.cell_at(Location::from(index)))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let board = self.occupancy().indexed_iter()
            .map(|(index, owner)| match owner {
                None => '.',
                Some(id) => {
                    let display = display_of(*id);
                    let (first, last) = self.flows[*id].termini();
                    if Location::from(index) == first || Location::from(index) == last {
                        display.to_ascii_uppercase()
                    } else {
                        display.to_ascii_lowercase()
                    }
                }
            })
            .collect_vec();

        for row in board.chunks(self.size.get()) {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }

        Ok(())
    }
}
