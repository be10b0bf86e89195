//! Growing and retracting the flow being dragged.
//!
//! The router never searches for a path: a drag extends the active flow along one straight run from its tip,
//! which mirrors what a pointer moving across neighboring cells reports anyway.

use tracing::debug;

use crate::affiliation::FlowId;
use crate::error::AllocationFailure;
use crate::flow::{ChainPosition, GrowthEnd};
use crate::level::Level;
use crate::location::Location;
use crate::reclaim::{Reclaim, ReclaimMode};
use crate::shape::{BoardShape, SquareStep, Step};

impl Level {
    /// Take hold of flow `id` at `anchor`, the cell a drag started from.
    ///
    /// A completed flow is broken at the anchor; an incomplete flow is reoriented to grow from the anchor
    /// when it is a terminus and cut back to the anchor otherwise.
    pub(crate) fn seize(&mut self, id: FlowId, anchor: Location) {
        let Some(flow) = self.flows.get_mut(id) else {
            return;
        };
        if !flow.contains(anchor) {
            return;
        }

        if !flow.is_completed() {
            flow.reorient(anchor);
        }
        let _ = self.reclaim(anchor, ReclaimMode::FromCellOnward);
    }

    /// Drag flow `id`, held at `anchor`, to `target`.
    ///
    /// Illegal requests leave the board untouched. Cells appended before a blocked cell stay appended.
    pub(crate) fn route(&mut self, id: FlowId, anchor: Location, target: Location) -> Result<(), AllocationFailure> {
        if !target.is_within(self.size()) {
            return Ok(());
        }
        let Some(flow) = self.flows.get_mut(id) else {
            return Ok(());
        };

        if flow.is_completed() {
            if target == anchor {
                self.seize(id, anchor);
            } else {
                self.regrab(id, anchor, target);
            }
            return Ok(());
        }

        flow.reorient(anchor);
        if flow.contains(target) {
            // backtracking
            let _ = self.reclaim(target, ReclaimMode::FromCellOnward);
        }

        self.grow(id, target)
    }

    /// A completed flow still held by the pointer is pulled back off one of its termini.
    fn regrab(&mut self, id: FlowId, anchor: Location, target: Location) {
        let flow = &mut self.flows[id];
        let Some(ChainPosition::Interior(index)) = flow.position_of(target) else {
            return;
        };

        let inside_first = index == 0;
        let inside_last = index + 3 == flow.node_count();
        let growth = match (inside_first, inside_last) {
            // a lone interior node touches both termini; keep the side the drag started from
            (true, true) if anchor == flow.first() => GrowthEnd::First,
            (true, _) => GrowthEnd::Last,
            (false, true) => GrowthEnd::First,
            (false, false) => return,
        };

        debug!(flow = id, %target, ?growth, "regrabbed completed flow");
        flow.uncomplete(growth);
    }

    /// Extend flow `id` from its tip along a straight run to `target`.
    fn grow(&mut self, id: FlowId, target: Location) -> Result<(), AllocationFailure> {
        let tip = self.flows[id].tip();
        let Some(step) = SquareStep::toward(tip, target) else {
            return Ok(());
        };

        let mut cell = tip;
        while cell != target {
            cell = step.attempt_from(cell);
            if !cell.is_within(self.size()) {
                return Ok(());
            }

            let flow = &mut self.flows[id];
            if cell == flow.open_end() {
                flow.complete();
                debug!(flow = id, %cell, "flow completed");
                return Ok(());
            }
            if flow.contains(cell) {
                // paths never cross themselves
                return Ok(());
            }

            if self.reclaim(cell, ReclaimMode::OnlyThisCell) == Reclaim::Refused {
                debug!(flow = id, %cell, "growth blocked");
                return Ok(());
            }
            self.flows[id].push_tip(cell)?;
        }

        Ok(())
    }
}
