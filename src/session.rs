use tracing::debug;

use crate::affiliation::FlowId;
use crate::error::AllocationFailure;
use crate::level::Level;
use crate::location::Location;
use crate::progress::Progress;

/// The flow a pointer is currently holding, and where it took hold.
///
/// A session borrows no level; pass the same [`Level`] to every call between [`pick`](Self::pick)
/// and [`release`](Self::release).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DragSession {
    active: Option<(FlowId, Location)>,
}

impl DragSession {
    /// A session holding nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The flow being dragged, if any.
    pub fn active_flow(&self) -> Option<FlowId> {
        self.active.map(|(flow, _)| flow)
    }

    /// The cell the current drag started from.
    pub fn anchor(&self) -> Option<Location> {
        self.active.map(|(_, anchor)| anchor)
    }

    /// Start a drag at `location`.
    ///
    /// Grabbing a flow takes hold of it at the grabbed cell: whatever lies beyond the cell is dropped,
    /// and a completed flow is broken there.
    /// Returns the grabbed flow, or `None` (holding nothing) if the cell is free.
    pub fn pick(&mut self, level: &mut Level, location: Location) -> Option<FlowId> {
        let Some((flow, _)) = level.owner_of(location) else {
            self.release();
            return None;
        };

        debug!(flow, %location, "picked flow");
        self.active = Some((flow, location));
        level.seize(flow, location);
        Some(flow)
    }

    /// Drag the held flow to `target` and recount the board.
    ///
    /// Without a held flow nothing moves. On failure the session lets go of its flow.
    pub fn drag_to(&mut self, level: &mut Level, target: Location) -> Result<Progress, AllocationFailure> {
        let routed = match self.active {
            Some((flow, anchor)) => level.route(flow, anchor, target),
            None => Ok(()),
        };
        self.settle(level, routed)
    }

    fn settle(&mut self, level: &mut Level, routed: Result<(), AllocationFailure>) -> Result<Progress, AllocationFailure> {
        if let Err(e) = routed {
            debug!(flow = ?self.active_flow(), error = %e, "dropped flow after failed drag");
            self.release();
            return Err(e);
        }

        Ok(level.track())
    }

    /// Let go of the held flow. The board is left as it is.
    pub fn release(&mut self) {
        self.active = None;
    }
}
