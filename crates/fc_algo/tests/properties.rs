//! Property tests for the algorithm layer.
//!
//! These pin the enumeration-count, single-winner, and determinism
//! guarantees across randomized contests rather than hand-picked cases.

use fc_algo::enumerate::OutcomeSpace;
use fc_algo::{scoring, winner};
use fc_core::{Contestant, Outcome, OutcomeVector, Params, Question, Ranking, Resolution};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ranking(n: usize) -> impl Strategy<Value = Ranking> {
    Just((1..=n as u32).collect::<Vec<u32>>())
        .prop_shuffle()
        .prop_map(Ranking::new)
}

fn resolution() -> impl Strategy<Value = Resolution> {
    prop_oneof![
        Just(Resolution::Yes),
        Just(Resolution::No),
        Just(Resolution::Pending),
    ]
}

fn questions(n: usize) -> impl Strategy<Value = Vec<Question>> {
    proptest::collection::vec(resolution(), n).prop_map(|states| {
        states
            .iter()
            .enumerate()
            .map(|(i, r)| Question {
                id: format!("Q{i}").parse().unwrap(),
                text: None,
                resolution: *r,
            })
            .collect()
    })
}

fn outcome_vector(n: usize) -> impl Strategy<Value = OutcomeVector> {
    proptest::collection::vec(any::<bool>(), n).prop_map(|bits| {
        OutcomeVector::new(
            bits.into_iter()
                .map(|b| if b { Outcome::Yes } else { Outcome::No })
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn score_never_exceeds_the_rank_sum(r in ranking(8), v in outcome_vector(8)) {
        let s = scoring::score(&r, &v);
        prop_assert!(s <= scoring::max_total_score(8));
    }

    #[test]
    fn enumerator_yields_exactly_two_to_the_pending(qs in questions(8)) {
        let space = OutcomeSpace::new(&qs).unwrap();
        let pending = qs.iter().filter(|q| q.resolution.is_pending()).count();
        prop_assert_eq!(space.len(), 1u64 << pending);

        // Each vector visited exactly once, resolved positions held fixed.
        let keys: BTreeSet<String> = space.iter().map(|v| v.key()).collect();
        prop_assert_eq!(keys.len() as u64, space.len());
        for v in space.iter() {
            for (i, q) in qs.iter().enumerate() {
                if let Some(o) = q.resolution.as_outcome() {
                    prop_assert_eq!(v.get(i), o);
                }
            }
        }
    }

    #[test]
    fn resolver_returns_exactly_one_winner_and_repeats_it(
        rankings in proptest::collection::vec(ranking(6), 1..5),
        v in outcome_vector(6),
    ) {
        let field: Vec<Contestant> = rankings
            .into_iter()
            .enumerate()
            .map(|(i, ranking)| Contestant {
                id: format!("c{i}").parse().unwrap(),
                ranking,
            })
            .collect();
        let first = winner::resolve(&v, &field, &Params::default()).unwrap();
        prop_assert!(field.iter().any(|c| c.id == first.winner));
        prop_assert!(first.top_scorers.contains(&first.winner));
        prop_assert_eq!(first.was_tie, first.top_scorers.len() > 1);

        let again = winner::resolve(&v, &field, &Params::default()).unwrap();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn range_split_reproduces_the_full_enumeration(qs in questions(6), split in any::<u64>()) {
        let space = OutcomeSpace::new(&qs).unwrap();
        let m = split % (space.len() + 1);
        let whole: Vec<String> = space.iter().map(|v| v.key()).collect();
        let mut parts: Vec<String> = space.range(0, m).map(|v| v.key()).collect();
        parts.extend(space.range(m, space.len()).map(|v| v.key()));
        prop_assert_eq!(whole, parts);
    }
}
