//! Evicting cells from the flow that owns them.
//!
//! Reclaiming is the only way nodes ever leave a chain.
//! Every eviction is a single range cut on the owning flow, so the cost is bounded by the path length and nothing recurses.

use tracing::debug;

use crate::flow::{ChainPosition, GrowthEnd};
use crate::level::Level;
use crate::location::Location;

/// How much of the owning path goes along with the reclaimed cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReclaimMode {
    /// Free the cell itself, and whatever hangs off it, so another flow can take it.
    OnlyThisCell,
    /// Keep the cell and free everything past it, so its own flow can regrow from there.
    FromCellOnward,
}

/// Outcome of [`Level::reclaim`].
#[must_use]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reclaim {
    /// The request was carried out, possibly without anything to do.
    Evicted,
    /// The cell is protected; nothing changed.
    Refused,
}

impl Level {
    /// Evict `location` from whichever flow owns it.
    ///
    /// Termini are never removed: reclaiming one with [`ReclaimMode::OnlyThisCell`] is refused,
    /// while [`ReclaimMode::FromCellOnward`] on a completed flow's terminus reopens both of its ends.
    /// Breaking a completed flow keeps its longer side; on a tie the side toward the last terminus is kept.
    pub fn reclaim(&mut self, location: Location, mode: ReclaimMode) -> Reclaim {
        let Some((id, position)) = self.owner_of(location) else {
            return Reclaim::Evicted;
        };
        let flow = &mut self.flows[id];
        let keep_cell = mode == ReclaimMode::FromCellOnward;

        if flow.is_completed() {
            return match position {
                ChainPosition::First | ChainPosition::Last => match mode {
                    ReclaimMode::OnlyThisCell => Reclaim::Refused,
                    ReclaimMode::FromCellOnward => {
                        let freed = flow.reopen();
                        debug!(flow = id, %location, freed, "reopened completed flow");
                        Reclaim::Evicted
                    }
                },
                ChainPosition::Interior(index) => {
                    // nodes strictly between the cell and each terminus
                    let toward_last = flow.node_count() - 3 - index;
                    let toward_first = index;
                    let kept = if toward_last >= toward_first {
                        GrowthEnd::Last
                    } else {
                        GrowthEnd::First
                    };

                    flow.uncomplete(kept);
                    let freed = flow.cut_beyond(index, keep_cell);
                    debug!(flow = id, %location, ?mode, ?kept, freed, "broke completed flow");
                    Reclaim::Evicted
                }
            };
        }

        match (position, mode) {
            (ChainPosition::Interior(index), _) => {
                let freed = flow.cut_beyond(index, keep_cell);
                debug!(flow = id, %location, ?mode, freed, "cut flow");
                Reclaim::Evicted
            }
            (_, ReclaimMode::OnlyThisCell) => Reclaim::Refused,
            (_, ReclaimMode::FromCellOnward) => {
                // from the anchored terminus everything goes; the open terminus has nothing beyond it
                if location == flow.anchored_end() && flow.node_count() > 2 {
                    let growth = flow.growth_end();
                    let freed = flow.reopen();
                    flow.set_growth(growth);
                    debug!(flow = id, %location, freed, "cleared flow back to its terminus");
                }
                Reclaim::Evicted
            }
        }
    }
}
