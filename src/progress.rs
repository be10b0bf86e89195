use tracing::debug;

use crate::level::{Level, LevelState};

/// Counters derived from a [`Level`] after a drag.
///
/// These are never stored on the level; take a fresh [`Progress`] whenever the board changes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Progress {
    /// Flows connecting both of their termini.
    pub completed_flows: usize,
    /// Cells covered by a path, not counting termini.
    pub filled_cells: usize,
    /// Flows on the board.
    pub flow_count: usize,
    /// Cells on the board.
    pub cell_count: usize,
}

impl Progress {
    /// Count up `level` as it stands.
    pub fn of(level: &Level) -> Self {
        Self {
            completed_flows: level.flows().iter().filter(|flow| flow.is_completed()).count(),
            filled_cells: level.flows().iter().map(|flow| flow.node_count() - 2).sum(),
            flow_count: level.flow_count(),
            cell_count: level.cell_count(),
        }
    }

    /// Whether every flow is connected.
    pub fn is_solved(&self) -> bool {
        self.completed_flows == self.flow_count
    }

    /// Whether paths and termini together cover every cell.
    pub fn covers_board(&self) -> bool {
        self.filled_cells + 2 * self.flow_count == self.cell_count
    }

    /// The rating this board would earn right now, ignoring earlier solves.
    pub fn rating(&self) -> LevelState {
        match (self.is_solved(), self.covers_board()) {
            (false, _) => LevelState::Uncompleted,
            (true, false) => LevelState::Completed,
            (true, true) => LevelState::Starred,
        }
    }
}

impl Level {
    /// Recount this level and raise its [`rating`](Level::rating) if the board is solved.
    ///
    /// A rating is never lowered, so a starred level stays starred.
    pub fn track(&mut self) -> Progress {
        let progress = Progress::of(self);
        let earned = progress.rating();
        if earned > self.state {
            debug!(from = %self.state, to = %earned, "level rating raised");
            self.state = earned;
        }

        progress
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;
    use crate::builder::LevelBuilder;
    use crate::location::Location;

    fn single_flow(state: LevelState) -> Level {
        // A: (0, 0) - (2, 0) on a 3x3 board
        LevelBuilder::with_size(NonZero::new(3).unwrap())
            .add_termini((Location(0, 0), Location(2, 0)))
            .state(state)
            .build()
            .unwrap()
    }

    #[test]
    fn untouched_level_counts_nothing() {
        let mut level = single_flow(LevelState::Uncompleted);
        let progress = level.track();
        assert_eq!(progress, Progress { completed_flows: 0, filled_cells: 0, flow_count: 1, cell_count: 9 });
        assert!(!progress.is_solved());
        assert_eq!(level.rating(), LevelState::Uncompleted);
    }

    #[test]
    fn short_solve_is_completed() {
        let mut level = single_flow(LevelState::Uncompleted);
        level.route(0, Location(0, 0), Location(2, 0)).unwrap();
        let progress = level.track();
        assert!(progress.is_solved());
        assert!(!progress.covers_board());
        assert_eq!(progress.filled_cells, 1);
        assert_eq!(level.rating(), LevelState::Completed);
    }

    #[test]
    fn solve_leaving_gaps_is_completed() {
        let mut level = single_flow(LevelState::Uncompleted);
        for target in [Location(0, 2), Location(1, 2), Location(1, 1), Location(2, 1), Location(2, 0)] {
            level.route(0, Location(0, 0), target).unwrap();
        }
        assert_eq!(format!("{}", level), "A.A
aaa
aa.
");
        assert_eq!(level.track().rating(), LevelState::Completed);
    }

    #[test]
    fn covering_solve_is_starred() {
        let mut level = single_flow(LevelState::Uncompleted);
        for target in [Location(0, 2), Location(2, 2), Location(2, 1), Location(1, 1), Location(1, 0), Location(2, 0)] {
            level.route(0, Location(0, 0), target).unwrap();
        }
        assert_eq!(format!("{}", level), "AaA
aaa
aaa
");
        let progress = level.track();
        assert!(progress.covers_board());
        assert_eq!(level.rating(), LevelState::Starred);
    }

    #[test]
    fn starred_is_never_downgraded() {
        let mut level = single_flow(LevelState::Starred);
        level.route(0, Location(0, 0), Location(2, 0)).unwrap();
        assert_eq!(level.track().rating(), LevelState::Completed);
        assert_eq!(level.rating(), LevelState::Starred);
    }
}
