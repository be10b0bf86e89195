#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::LevelBuilder;
    use crate::level::{Level, LevelState};
    use crate::location::Location;
    use crate::session::DragSession;
    use crate::store::load_levels;
    use crate::LoadError;

    fn drag(level: &mut Level, from: Location, through: &[Location]) {
        let mut session = DragSession::new();
        session.pick(level, from);
        for target in through {
            session.drag_to(level, *target).unwrap();
        }
        session.release();
    }

    fn diagonal_corners() -> Level {
        LevelBuilder::with_size(NonZero::new(3).unwrap())
            .add_termini((Location(0, 0), Location(2, 2)))
            .build()
            .unwrap()
    }

    #[test]
    fn solve_around_the_edge() {
        let mut level = diagonal_corners();
        let mut session = DragSession::new();
        assert_eq!(session.pick(&mut level, Location(0, 0)), Some(0));

        let mut progress = None;
        for target in [Location(1, 0), Location(2, 0), Location(2, 1), Location(2, 2)] {
            progress = Some(session.drag_to(&mut level, target).unwrap());
        }
        let progress = progress.unwrap();

        assert_eq!(progress.completed_flows, 1);
        assert!(progress.is_solved());
        assert!(level.is_solved());
        assert_eq!(level.rating(), LevelState::Completed);
        assert_eq!(format!("{}", level), "Aaa
..a
..A
");
    }

    #[test]
    fn solve_covering_every_cell() {
        let mut level = diagonal_corners();
        drag(&mut level, Location(0, 0), &[
            Location(2, 0),
            Location(2, 1),
            Location(0, 1),
            Location(0, 2),
            Location(2, 2),
        ]);

        assert_eq!(format!("{}", level), "Aaa
aaa
aaA
");
        assert_eq!(level.rating(), LevelState::Starred);
    }

    #[test]
    fn retract_to_the_anchor() {
        let mut level = diagonal_corners();
        let mut session = DragSession::new();
        session.pick(&mut level, Location(0, 0));
        session.drag_to(&mut level, Location(1, 0)).unwrap();
        assert_eq!(format!("{}", level), "Aa.
...
..A
");

        session.drag_to(&mut level, Location(0, 0)).unwrap();
        assert!(level.flows()[0].is_pristine());
        assert_eq!(format!("{}", level), format!("{}", diagonal_corners()));
    }

    #[test]
    fn contested_path_cell() {
        // A: (0, 1) - (3, 1), drawn straight across; B: (1, 0) - (1, 3), drawn straight down over it
        let mut level = LevelBuilder::with_size(NonZero::new(4).unwrap())
            .add_termini((Location(0, 1), Location(3, 1)))
            .add_termini((Location(1, 0), Location(1, 3)))
            .build()
            .unwrap();

        drag(&mut level, Location(0, 1), &[Location(3, 1)]);
        assert_eq!(format!("{}", level), ".B..
AaaA
....
.B..
");

        // A loses its shorter side: (1, 1) goes, (2, 1) stays hanging from (3, 1)
        drag(&mut level, Location(1, 0), &[Location(1, 3)]);
        assert_eq!(format!("{}", level), ".B..
AbaA
.b..
.B..
");
        assert!(!level.flows()[0].is_completed());
        assert_eq!(level.flows()[0].tip(), Location(2, 1));
        assert!(level.flows()[1].is_completed());
        assert!(!level.is_solved());
    }

    #[test]
    fn contested_terminus() {
        // B runs down column 1 into A's terminus at (1, 2)
        let mut level = LevelBuilder::with_size(NonZero::new(4).unwrap())
            .add_termini((Location(1, 2), Location(3, 3)))
            .add_termini((Location(1, 0), Location(0, 3)))
            .build()
            .unwrap();

        drag(&mut level, Location(1, 0), &[Location(1, 3)]);
        assert_eq!(format!("{}", level), ".B..
.b..
.A..
B..A
");
        assert_eq!(level.owner_of(Location(1, 2)).map(|(flow, _)| flow), Some(0));
    }

    #[test]
    fn grab_a_completed_flow_in_the_middle() {
        let mut level = LevelBuilder::with_size(NonZero::new(5).unwrap())
            .add_termini((Location(0, 0), Location(4, 0)))
            .build()
            .unwrap();
        drag(&mut level, Location(0, 0), &[Location(4, 0)]);
        assert_eq!(level.rating(), LevelState::Completed);

        // one node on either side of (2, 0): the tie goes to the side of the last terminus
        let mut session = DragSession::new();
        session.pick(&mut level, Location(2, 0));
        session.drag_to(&mut level, Location(2, 1)).unwrap();
        assert_eq!(format!("{}", level), "A.aaA
..a..
.....
.....
.....
");
        assert!(!level.is_solved());
        assert_eq!(level.rating(), LevelState::Completed);
    }

    #[test]
    fn truncated_record() {
        let error = load_levels("{{1,1,3,3},{1,3,3,1},5,0,0}\n{{1,1,2,2},{1,2").unwrap_err();
        assert!(matches!(error, LoadError::Malformed { record: 2, .. }));
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn reset_twice() {
        let mut level = diagonal_corners();
        drag(&mut level, Location(0, 0), &[Location(2, 0), Location(2, 1)]);
        drag(&mut level, Location(2, 2), &[Location(1, 2)]);

        level.reset();
        let once = level.clone();
        level.reset();
        assert_eq!(level, once);
        assert_eq!(format!("{}", level), "A..
...
..A
");
    }
}
