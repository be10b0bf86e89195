use std::collections::VecDeque;
use std::iter;

use crate::affiliation::Color;
use crate::error::AllocationFailure;
use crate::location::Location;

/// Which end of a flow may currently be extended.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum GrowthEnd {
    /// The path is anchored at the first terminus and its tip sits next to the last.
    First,
    /// The path is anchored at the last terminus and its tip sits next to the first.
    Last,
    /// Either end; only while untouched or fully connected.
    #[default]
    Both,
}

/// Where a location sits in a flow's chain of nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChainPosition {
    /// The first terminus.
    First,
    /// The `n`th node between the termini, counted from the first terminus.
    Interior(usize),
    /// The last terminus.
    Last,
}

/// One color's path between two fixed termini.
///
/// The chain always reads first terminus, interior nodes, last terminus.
/// Termini are never removed; an incomplete flow leaves the link between its tip and the far terminus open.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Flow {
    first: Location,
    last: Location,
    interior: VecDeque<Location>,
    color: Color,
    completed: bool,
    growth: GrowthEnd,
}

impl Flow {
    pub(crate) fn new(termini: (Location, Location), color: Color) -> Self {
        Self {
            first: termini.0,
            last: termini.1,
            interior: VecDeque::new(),
            color,
            completed: false,
            growth: GrowthEnd::Both,
        }
    }

    /// The first terminus, as declared in the level pack.
    pub fn first(&self) -> Location {
        self.first
    }

    /// The last terminus, as declared in the level pack.
    pub fn last(&self) -> Location {
        self.last
    }

    /// Both termini, first then last.
    pub fn termini(&self) -> (Location, Location) {
        (self.first, self.last)
    }

    /// Color handed out from the palette when the level was loaded.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the path connects both termini.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Which end is currently extendable.
    pub fn growth_end(&self) -> GrowthEnd {
        self.growth
    }

    /// Nodes strictly between the termini, from the first terminus onward.
    pub fn interior(&self) -> impl ExactSizeIterator<Item = Location> + '_ {
        self.interior.iter().copied()
    }

    /// Number of nodes including both termini; never less than 2.
    pub fn node_count(&self) -> usize {
        self.interior.len() + 2
    }

    /// Whether this flow is back to its bare termini.
    pub fn is_pristine(&self) -> bool {
        !self.completed && self.interior.is_empty()
    }

    /// Every node of the chain, first terminus to last.
    pub fn chain(&self) -> impl Iterator<Item = Location> + '_ {
        iter::once(self.first)
            .chain(self.interior.iter().copied())
            .chain(iter::once(self.last))
    }

    /// Locate `location` in this flow's chain.
    pub fn position_of(&self, location: Location) -> Option<ChainPosition> {
        if location == self.first {
            Some(ChainPosition::First)
        } else if location == self.last {
            Some(ChainPosition::Last)
        } else {
            self.interior.iter().position(|l| *l == location).map(ChainPosition::Interior)
        }
    }

    /// Whether this flow owns `location`, terminus or not.
    pub fn contains(&self, location: Location) -> bool {
        self.position_of(location).is_some()
    }

    fn grows_from_last(&self) -> bool {
        // `Both` behaves like `First` when growing, the first terminus being the default anchor
        self.growth == GrowthEnd::Last
    }

    /// The terminus the drawn path hangs from.
    pub fn anchored_end(&self) -> Location {
        if self.grows_from_last() {
            self.last
        } else {
            self.first
        }
    }

    /// The terminus the drawn path is reaching for.
    pub fn open_end(&self) -> Location {
        if self.grows_from_last() {
            self.first
        } else {
            self.last
        }
    }

    /// The node new cells are appended to.
    pub fn tip(&self) -> Location {
        if self.grows_from_last() {
            self.interior.front().copied().unwrap_or(self.last)
        } else {
            self.interior.back().copied().unwrap_or(self.first)
        }
    }

    /// Whether the link from chain node `index` to node `index + 1` is not yet drawn.
    ///
    /// Only incomplete flows have an open link: the one touching their open terminus.
    pub fn is_link_open(&self, index: usize) -> bool {
        let open = if self.grows_from_last() {
            0
        } else {
            self.interior.len()
        };
        !self.completed && index == open
    }

    /// Make the terminus `anchor`, if it is one, the end the path hangs from.
    pub(crate) fn reorient(&mut self, anchor: Location) {
        if anchor == self.first {
            self.growth = GrowthEnd::First;
        } else if anchor == self.last {
            self.growth = GrowthEnd::Last;
        }
    }

    pub(crate) fn set_growth(&mut self, growth: GrowthEnd) {
        self.growth = growth;
    }

    /// Connect the tip to the open terminus.
    pub(crate) fn complete(&mut self) {
        self.completed = true;
        self.growth = GrowthEnd::Both;
    }

    /// Break the connection to the open terminus, keeping `growth` as the side still drawn.
    pub(crate) fn uncomplete(&mut self, growth: GrowthEnd) {
        self.completed = false;
        self.growth = growth;
    }

    /// Drop every interior node, leaving both termini open.
    pub(crate) fn reopen(&mut self) -> usize {
        let freed = self.interior.len();
        self.interior.clear();
        self.completed = false;
        self.growth = GrowthEnd::Both;
        freed
    }

    /// Append `location` past the tip.
    pub(crate) fn push_tip(&mut self, location: Location) -> Result<(), AllocationFailure> {
        self.interior.try_reserve(1)?;
        if self.grows_from_last() {
            self.interior.push_front(location);
        } else {
            self.interior.push_back(location);
        }

        Ok(())
    }

    /// Free the interior nodes beyond interior node `index`, looking away from the anchored terminus.
    /// Node `index` itself goes too unless `keep_cell` is set.
    ///
    /// Returns how many nodes were freed.
    pub(crate) fn cut_beyond(&mut self, index: usize, keep_cell: bool) -> usize {
        let before = self.interior.len();
        if self.grows_from_last() {
            let end = if keep_cell { index } else { index + 1 };
            self.interior.drain(..end.min(before));
        } else {
            let start = if keep_cell { index + 1 } else { index };
            self.interior.truncate(start);
        }

        before - self.interior.len()
    }
}
