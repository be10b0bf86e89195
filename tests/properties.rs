use std::collections::HashMap;
use std::num::NonZero;

use flowline::builder::LevelBuilder;
use flowline::{load_levels, save_levels, DragSession, Level, Location, TimeRecordPolicy};
use proptest::prelude::*;

const PACK: &str = "{{1,1,5,5},{2,1,5,1},{1,2,1,5},{3,3,4,4},5,0,0}";

#[derive(Clone, Debug)]
enum Op {
    Pick { x: usize, y: usize },
    Drag { x: usize, y: usize },
    Release,
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // one row and column past the board, so off-board targets come up too
    prop_oneof![
        2 => (0usize..6, 0usize..6).prop_map(|(x, y)| Op::Pick { x, y }),
        6 => (0usize..6, 0usize..6).prop_map(|(x, y)| Op::Drag { x, y }),
        1 => Just(Op::Release),
        1 => Just(Op::Reset),
    ]
}

fn apply_op(level: &mut Level, session: &mut DragSession, op: Op) {
    match op {
        Op::Pick { x, y } => {
            session.pick(level, Location(x, y));
        }
        Op::Drag { x, y } => {
            let progress = session.drag_to(level, Location(x, y)).unwrap();
            assert_eq!(progress.is_solved(), level.is_solved());
        }
        Op::Release => session.release(),
        Op::Reset => level.reset(),
    }
}

fn assert_invariants(level: &Level, pristine: &Level) {
    let mut owners: HashMap<Location, usize> = HashMap::new();
    for (id, flow) in level.flows().iter().enumerate() {
        assert_eq!(flow.termini(), pristine.flows()[id].termini(), "flow {} lost a terminus", id);
        assert!(flow.node_count() >= 2);

        let chain: Vec<Location> = flow.chain().collect();
        for location in &chain {
            assert!(location.is_within(level.size()), "flow {} left the board at {}", id, location);
            if let Some(other) = owners.insert(*location, id) {
                panic!("{} owned by flows {} and {}", location, other, id);
            }
        }

        for (index, link) in chain.windows(2).enumerate() {
            if !flow.is_link_open(index) {
                assert_eq!(link[0].manhattan(link[1]), 1, "flow {} jumps from {} to {}", id, link[0], link[1]);
            }
        }
        if !flow.is_completed() {
            // the one open link is the only gap
            assert_eq!(chain.windows(2).enumerate().filter(|(index, _)| flow.is_link_open(*index)).count(), 1);
        }
    }
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..60)
}

// shuffled board cells, paired off into termini
fn termini_strategy() -> impl Strategy<Value = Vec<(Location, Location)>> {
    (1usize..8).prop_flat_map(|flows| {
        Just((0..25).collect::<Vec<usize>>())
            .prop_shuffle()
            .prop_map(move |cells| {
                cells.chunks(2)
                    .take(flows)
                    .map(|pair| (Location(pair[0] % 5, pair[0] / 5), Location(pair[1] % 5, pair[1] / 5)))
                    .collect()
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]
    #[test]
    fn drawing_invariants(seq in sequence_strategy()) {
        let pristine = load_levels(PACK).unwrap().remove(0);
        let mut level = pristine.clone();
        let mut session = DragSession::new();
        for op in seq {
            apply_op(&mut level, &mut session, op);
            assert_invariants(&level, &pristine);
        }
    }

    #[test]
    fn reset_is_idempotent(seq in sequence_strategy()) {
        let mut level = load_levels(PACK).unwrap().remove(0);
        let mut session = DragSession::new();
        for op in seq {
            apply_op(&mut level, &mut session, op);
        }

        level.reset();
        let once = level.clone();
        level.reset();
        prop_assert_eq!(&level, &once);
        prop_assert!(level.flows().iter().all(|flow| flow.is_pristine()));
    }

    #[test]
    fn saved_levels_reload(termini in termini_strategy()) {
        let mut builder = LevelBuilder::with_size(NonZero::new(5).unwrap());
        for pair in &termini {
            builder.add_termini(*pair);
        }
        let level = builder.build().unwrap();

        let reloaded = load_levels(&save_levels(&[level.clone()], TimeRecordPolicy::Reset)).unwrap();
        prop_assert_eq!(reloaded.len(), 1);
        prop_assert_eq!(reloaded[0].size(), level.size());
        let before: Vec<_> = level.flows().iter().map(|flow| flow.termini()).collect();
        let after: Vec<_> = reloaded[0].flows().iter().map(|flow| flow.termini()).collect();
        prop_assert_eq!(before, after);
    }
}
