use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use crate::domain::resolver::{resolve, Resolution};

fn move_id() -> impl Strategy<Value = String> {
    "[a-h][1-8][a-h][1-8]"
}

fn tally() -> impl Strategy<Value = BTreeMap<String, u32>> {
    prop::collection::btree_map(move_id(), 0u32..50, 0..12)
}

proptest! {
    /// Property: identical inputs always resolve identically.
    #[test]
    fn prop_resolve_is_deterministic(
        tally in tally(),
        extra_legal in prop::collection::btree_set(move_id(), 0..6),
    ) {
        let mut legal: BTreeSet<String> = tally.keys().take(tally.len() / 2 + 1).cloned().collect();
        legal.extend(extra_legal);
        prop_assert_eq!(resolve(&tally, &legal), resolve(&tally, &legal));
    }

    /// Property: the winner is legal, has the maximum legal count, and no
    /// legal move with the same count sorts before it.
    #[test]
    fn prop_winner_is_max_and_smallest(
        tally in tally(),
    ) {
        let legal: BTreeSet<String> = tally.keys().step_by(2).cloned().collect();
        let max = tally
            .iter()
            .filter(|(k, v)| legal.contains(*k) && **v > 0)
            .map(|(_, v)| *v)
            .max();

        match (resolve(&tally, &legal), max) {
            (Resolution::WinningMove { uci, votes }, Some(max)) => {
                prop_assert!(legal.contains(&uci));
                prop_assert_eq!(votes, max);
                let first = tally
                    .iter()
                    .find(|(k, v)| legal.contains(*k) && **v == max)
                    .map(|(k, _)| k.clone());
                prop_assert_eq!(Some(uci), first);
            }
            (Resolution::NoDecision, None) => {}
            (other, max) => prop_assert!(false, "resolution {:?} inconsistent with max {:?}", other, max),
        }
    }
}
