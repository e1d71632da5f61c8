//! Property-based tests for table lookup and the dispatch loop.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated tables and walks.

use chrono::Utc;
use proptest::prelude::*;
use tablefsm::builder::fixed_transition;
use tablefsm::{
    ErrorChannel, FsmInfo, RunHistory, StateId, Transition, TransitionRecord, TransitionTable,
};

prop_compose! {
    fn arbitrary_state()(raw in -1..12i32) -> StateId {
        StateId::new(raw)
    }
}

prop_compose! {
    fn arbitrary_entry()(from in arbitrary_state(), to in arbitrary_state(), tag in 0..1000i32)
        -> (StateId, StateId, i32) {
        (from, to, tag)
    }
}

fn tagged_table(entries: &[(StateId, StateId, i32)]) -> TransitionTable<()> {
    TransitionTable::new(
        entries
            .iter()
            .map(|&(from, to, tag)| fixed_transition(from, to, StateId::new(tag))),
    )
}

proptest! {
    #[test]
    fn lookup_returns_first_match_in_table_order(
        entries in prop::collection::vec(arbitrary_entry(), 0..24),
        from in arbitrary_state(),
        to in arbitrary_state(),
    ) {
        let table = tagged_table(&entries);

        let expected = entries
            .iter()
            .take_while(|(f, _, _)| *f != StateId::IGNORE)
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|&(_, _, tag)| StateId::new(tag));

        let found = table
            .lookup(from, to)
            .map(|t| t.perform(&mut ErrorChannel::default(), &mut ()));

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn table_length_stops_at_first_sentinel(
        entries in prop::collection::vec(arbitrary_entry(), 0..24),
    ) {
        let table = tagged_table(&entries);
        let expected = entries
            .iter()
            .position(|(f, _, _)| *f == StateId::IGNORE)
            .unwrap_or(entries.len());

        prop_assert_eq!(table.len(), expected);
        prop_assert!(table.iter().all(|t| !t.is_sentinel()));
    }

    #[test]
    fn linear_walk_dispatches_once_per_step(steps in 1..20i32) {
        let mut entries: Vec<Transition<u32>> = Vec::new();
        entries.push(Transition::new(StateId::INIT, StateId::user(0), move |_, n: &mut u32| {
            *n += 1;
            if steps == 1 { StateId::EXIT } else { StateId::user(1) }
        }));
        for i in 1..steps {
            let action = move |_: &mut ErrorChannel, n: &mut u32| {
                *n += 1;
                if i + 1 == steps { StateId::EXIT } else { StateId::user(i + 1) }
            };
            entries.push(Transition::new(StateId::user(i - 1), StateId::user(i), action));
        }
        let table = TransitionTable::new(entries);
        let mut info = FsmInfo::builder("walk").record_history(true).build().unwrap();
        let mut count = 0u32;

        let (from, to) = info.run(&mut count, &table).unwrap();

        prop_assert_eq!(count, steps as u32);
        prop_assert_eq!(info.dispatch_count(), steps as usize);
        prop_assert_eq!(from, StateId::user(steps - 1));
        prop_assert_eq!(to, StateId::EXIT);

        let path = info.history().unwrap().get_path();
        prop_assert_eq!(path.len(), steps as usize + 1);
        prop_assert_eq!(path[0], StateId::INIT);
    }

    #[test]
    fn history_path_follows_records(
        states in prop::collection::vec(arbitrary_state(), 1..10)
    ) {
        let mut history = RunHistory::new();
        let mut expected = vec![StateId::INIT];

        for (i, to) in states.iter().enumerate() {
            let from = if i == 0 { StateId::INIT } else { states[i - 1] };
            history.record(TransitionRecord {
                from,
                to: *to,
                next: StateId::EXIT,
                timestamp: Utc::now(),
            });
            expected.push(*to);
        }

        prop_assert_eq!(history.get_path(), expected);
    }

    #[test]
    fn state_roundtrip_serialization(state in arbitrary_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: StateId = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(state, deserialized);
    }
}
