//! Aggregation: fold every outcome vector's classification into the
//! contest-wide summary tables.
//!
//! The fold is a **local** accumulation over a half-open index range of the
//! outcome space; two fragments built over disjoint ranges merge by plain
//! addition of counts. That shape is what makes safe partitioning possible:
//! no shared tally is ever mutated across workers, and the shipped driver
//! stays single-threaded. Everything is keyed by stable identifiers in
//! `BTreeMap`s so iteration order never depends on insertion order.

use fc_algo::enumerate::{EnumerateError, OutcomeSpace};
use fc_algo::winner::{self, WinnerError};
use fc_algo::scoring;
use fc_core::{Contest, ContestantId, Outcome, Params, QuestionId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Per-question `Yes`/`No` counts over one contestant's win-paths.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct NeedSplit {
    pub yes: u64,
    pub no: u64,
}

impl NeedSplit {
    pub fn total(self) -> u64 {
        self.yes + self.no
    }

    /// Fraction of win-paths where the question resolved `Yes`; defined as
    /// 0 when the contestant has no win-paths at all (never an error).
    pub fn yes_fraction(self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.yes as f64 / self.total() as f64
        }
    }
}

/// One contestant's aggregate view.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Standing {
    /// Vectors where this contestant is the recorded winner (incl. via
    /// tie-break).
    pub wins: u64,
    /// Vectors won without any tie-break.
    pub outright_wins: u64,
    /// Vectors where this contestant was in a tied top-scorer set.
    pub tie_paths: u64,
    /// Vectors where this contestant was winner or tie participant.
    pub win_or_tie_paths: u64,
    /// Score already banked from questions resolved `Yes`.
    pub banked_score: u32,
    /// Per pending question: `Yes`/`No` split over this contestant's
    /// win-or-tie vectors.
    pub needs: BTreeMap<QuestionId, NeedSplit>,
}

impl Standing {
    /// Appears in tied sets but never wins a vector outright.
    pub fn is_tie_only(&self) -> bool {
        self.outright_wins == 0 && self.tie_paths > 0
    }

    /// No win-paths at all, not even through a tie.
    pub fn is_eliminated(&self) -> bool {
        self.win_or_tie_paths == 0
    }
}

/// The engine's full output for one contest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Exactly `2^P` for the enumerated range union.
    pub total_outcomes: u64,
    /// Vectors that required tie-breaking.
    pub tie_outcomes: u64,
    /// `Yes` outcomes already known before enumeration began.
    pub baseline_yes: u32,
    /// Pending question ids, in question order.
    pub pending: Vec<QuestionId>,
    pub standings: BTreeMap<ContestantId, Standing>,
    /// Keyed by "additional `Yes` outcomes beyond baseline" →
    /// (winner-or-tie-participant → count). Every key `0..=P` is present.
    pub delta_buckets: BTreeMap<u32, BTreeMap<ContestantId, u64>>,
}

impl AggregateResult {
    /// Empty accumulator for a contest: all contestants present with zeroed
    /// tallies, need splits pre-seeded for every pending question, delta
    /// buckets pre-seeded for every possible delta.
    fn empty(contest: &Contest) -> Self {
        let pending = contest.pending_ids();
        let needs_template: BTreeMap<QuestionId, NeedSplit> = pending
            .iter()
            .map(|q| (q.clone(), NeedSplit::default()))
            .collect();
        let standings = contest
            .contestants
            .iter()
            .map(|c| {
                (
                    c.id.clone(),
                    Standing {
                        banked_score: scoring::banked_score(&c.ranking, &contest.questions),
                        needs: needs_template.clone(),
                        ..Standing::default()
                    },
                )
            })
            .collect();
        let delta_buckets = (0..=pending.len() as u32)
            .map(|d| (d, BTreeMap::new()))
            .collect();
        AggregateResult {
            total_outcomes: 0,
            tie_outcomes: 0,
            baseline_yes: contest.known_yes_count(),
            pending,
            standings,
            delta_buckets,
        }
    }

    pub fn win_fraction(&self, id: &ContestantId) -> f64 {
        match self.standings.get(id) {
            Some(s) if self.total_outcomes > 0 => s.wins as f64 / self.total_outcomes as f64,
            _ => 0.0,
        }
    }

    pub fn tie_fraction(&self, id: &ContestantId) -> f64 {
        match self.standings.get(id) {
            Some(s) if self.total_outcomes > 0 => s.tie_paths as f64 / self.total_outcomes as f64,
            _ => 0.0,
        }
    }

    /// The necessity analysis re-keyed question-first: "who benefits if this
    /// resolves Yes". Only contestants with at least one win-path appear.
    pub fn question_view(&self) -> BTreeMap<QuestionId, BTreeMap<ContestantId, NeedSplit>> {
        let mut out: BTreeMap<QuestionId, BTreeMap<ContestantId, NeedSplit>> = self
            .pending
            .iter()
            .map(|q| (q.clone(), BTreeMap::new()))
            .collect();
        for (id, standing) in &self.standings {
            if standing.is_eliminated() {
                continue;
            }
            for (q, split) in &standing.needs {
                out.get_mut(q)
                    .expect("needs are keyed by pending questions only")
                    .insert(id.clone(), *split);
            }
        }
        out
    }

    /// Fold another fragment (built over a disjoint index range of the same
    /// contest) into this one. Counts add; nothing else changes.
    pub fn merge(&mut self, other: AggregateResult) {
        debug_assert_eq!(self.baseline_yes, other.baseline_yes);
        debug_assert_eq!(self.pending, other.pending);
        self.total_outcomes += other.total_outcomes;
        self.tie_outcomes += other.tie_outcomes;
        for (id, theirs) in other.standings {
            let ours = self
                .standings
                .get_mut(&id)
                .expect("fragments share one contestant set");
            ours.wins += theirs.wins;
            ours.outright_wins += theirs.outright_wins;
            ours.tie_paths += theirs.tie_paths;
            ours.win_or_tie_paths += theirs.win_or_tie_paths;
            for (q, split) in theirs.needs {
                let slot = ours
                    .needs
                    .get_mut(&q)
                    .expect("fragments share one pending set");
                slot.yes += split.yes;
                slot.no += split.no;
            }
        }
        for (delta, theirs) in other.delta_buckets {
            let bucket = self
                .delta_buckets
                .get_mut(&delta)
                .expect("buckets are pre-seeded 0..=P");
            for (id, count) in theirs {
                *bucket.entry(id).or_insert(0) += count;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    Enumerate(EnumerateError),
    Winner(WinnerError),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::Enumerate(e) => write!(f, "{e}"),
            AggregateError::Winner(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AggregateError {}

impl From<EnumerateError> for AggregateError {
    fn from(e: EnumerateError) -> Self {
        AggregateError::Enumerate(e)
    }
}

impl From<WinnerError> for AggregateError {
    fn from(e: WinnerError) -> Self {
        AggregateError::Winner(e)
    }
}

/// Aggregate the whole outcome space of `contest`.
pub fn aggregate(contest: &Contest, params: &Params) -> Result<AggregateResult, AggregateError> {
    let space = OutcomeSpace::new(&contest.questions)?;
    aggregate_range(contest, params, &space, 0, space.len())
}

/// Aggregate the half-open index range `[start, end)` of `space`.
///
/// Fragments over disjoint ranges combine with [`AggregateResult::merge`];
/// `aggregate` is exactly the single-range call over `[0, 2^P)`.
pub fn aggregate_range(
    contest: &Contest,
    params: &Params,
    space: &OutcomeSpace,
    start: u64,
    end: u64,
) -> Result<AggregateResult, AggregateError> {
    let mut acc = AggregateResult::empty(contest);
    let pending_positions = space.pending_positions();

    for vector in space.range(start, end) {
        let win = winner::resolve(&vector, &contest.contestants, params)?;

        acc.total_outcomes += 1;
        if win.was_tie {
            acc.tie_outcomes += 1;
        }

        {
            let s = acc
                .standings
                .get_mut(&win.winner)
                .expect("winner comes from the contestant set");
            s.wins += 1;
            if !win.was_tie {
                s.outright_wins += 1;
            }
        }

        let delta = vector.yes_count() - acc.baseline_yes;
        let bucket = acc
            .delta_buckets
            .get_mut(&delta)
            .expect("buckets are pre-seeded 0..=P");

        // Everyone in the top-scorer set holds a win-path through this
        // vector: the outright winner alone, or the whole tied set.
        for id in &win.top_scorers {
            let s = acc
                .standings
                .get_mut(id)
                .expect("top scorers come from the contestant set");
            s.win_or_tie_paths += 1;
            if win.was_tie {
                s.tie_paths += 1;
            }
            for (&pos, q) in pending_positions.iter().zip(acc.pending.iter()) {
                let split = s.needs.get_mut(q).expect("needs pre-seeded per pending question");
                match vector.get(pos) {
                    Outcome::Yes => split.yes += 1,
                    Outcome::No => split.no += 1,
                }
            }
            *bucket.entry(id.clone()).or_insert(0) += 1;
        }
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::{Contestant, Question, Ranking, Resolution};

    fn contest(states: &[Resolution], rankings: &[(&str, Vec<u32>)]) -> Contest {
        Contest {
            title: None,
            questions: states
                .iter()
                .enumerate()
                .map(|(i, r)| Question {
                    id: format!("Q{i}").parse().unwrap(),
                    text: None,
                    resolution: *r,
                })
                .collect(),
            contestants: rankings
                .iter()
                .map(|(id, ranks)| Contestant {
                    id: id.parse().unwrap(),
                    ranking: Ranking::new(ranks.clone()),
                })
                .collect(),
        }
    }

    fn id(s: &str) -> ContestantId {
        s.parse().unwrap()
    }

    fn qid(s: &str) -> QuestionId {
        s.parse().unwrap()
    }

    /// X=[3,1,2], Y=[1,3,2], all three pending: eight vectors, worked by
    /// hand. X wins the identical-multiset ties on identifier order.
    fn xy_contest() -> Contest {
        contest(
            &[Resolution::Pending; 3],
            &[("X", vec![3, 1, 2]), ("Y", vec![1, 3, 2])],
        )
    }

    #[test]
    fn two_contestant_worked_example() {
        let agg = aggregate(&xy_contest(), &Params::default()).unwrap();
        assert_eq!(agg.total_outcomes, 8);
        assert_eq!(agg.tie_outcomes, 4);

        let x = &agg.standings[&id("X")];
        let y = &agg.standings[&id("Y")];
        // Recorded wins: X takes both outright wins plus all four ties.
        assert_eq!(x.wins, 6);
        assert_eq!(y.wins, 2);
        assert_eq!(x.outright_wins, 2);
        assert_eq!(y.outright_wins, 2);
        assert_eq!(x.tie_paths, 4);
        assert_eq!(y.tie_paths, 4);
        assert_eq!(x.win_or_tie_paths, 6);
        assert_eq!(y.win_or_tie_paths, 6);
        assert!(!x.is_tie_only());
        assert!(!y.is_tie_only());
    }

    #[test]
    fn need_splits_count_yes_and_no_over_win_paths() {
        let agg = aggregate(&xy_contest(), &Params::default()).unwrap();
        let x = &agg.standings[&id("X")];
        // X's six win-or-tie vectors are {}, {0}, {2}, {0,1}, {0,2}, {0,1,2}.
        assert_eq!(x.needs[&qid("Q0")], NeedSplit { yes: 4, no: 2 });
        assert_eq!(x.needs[&qid("Q1")], NeedSplit { yes: 2, no: 4 });
        assert_eq!(x.needs[&qid("Q2")], NeedSplit { yes: 3, no: 3 });
    }

    #[test]
    fn need_split_totals_recover_the_path_tally() {
        let agg = aggregate(&xy_contest(), &Params::default()).unwrap();
        for standing in agg.standings.values() {
            for split in standing.needs.values() {
                assert_eq!(split.total(), standing.win_or_tie_paths);
            }
        }
    }

    #[test]
    fn delta_buckets_are_keyed_by_additional_yes() {
        let agg = aggregate(&xy_contest(), &Params::default()).unwrap();
        assert_eq!(
            agg.delta_buckets.keys().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(agg.delta_buckets[&0][&id("X")], 1);
        assert_eq!(agg.delta_buckets[&0][&id("Y")], 1);
        assert_eq!(agg.delta_buckets[&1][&id("X")], 2);
        assert_eq!(agg.delta_buckets[&1][&id("Y")], 2);
        assert_eq!(agg.delta_buckets[&2][&id("X")], 2);
        assert_eq!(agg.delta_buckets[&2][&id("Y")], 2);
        assert_eq!(agg.delta_buckets[&3][&id("X")], 1);
        assert_eq!(agg.delta_buckets[&3][&id("Y")], 1);
    }

    #[test]
    fn baseline_offsets_delta_buckets() {
        use Resolution::*;
        // One question already Yes; deltas range over the two pending only.
        let c = contest(
            &[Yes, Pending, Pending],
            &[("X", vec![3, 1, 2]), ("Y", vec![1, 3, 2])],
        );
        let agg = aggregate(&c, &Params::default()).unwrap();
        assert_eq!(agg.baseline_yes, 1);
        assert_eq!(
            agg.delta_buckets.keys().copied().collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(agg.total_outcomes, 4);
    }

    #[test]
    fn fully_resolved_contest_yields_one_outcome() {
        use Resolution::*;
        let c = contest(
            &[Yes, No, Yes],
            &[("X", vec![3, 1, 2]), ("Y", vec![1, 3, 2])],
        );
        let agg = aggregate(&c, &Params::default()).unwrap();
        assert_eq!(agg.total_outcomes, 1);
        // X banks 3+2=5, Y banks 1+2=3; X wins the only vector outright.
        assert_eq!(agg.standings[&id("X")].wins, 1);
        assert_eq!(agg.standings[&id("X")].banked_score, 5);
        assert_eq!(agg.standings[&id("Y")].banked_score, 3);
        assert_eq!(agg.standings[&id("Y")].wins, 0);
        assert!(agg.standings[&id("Y")].is_eliminated());
    }

    #[test]
    fn eliminated_contestant_has_zero_need_fractions() {
        use Resolution::*;
        let c = contest(
            &[Yes, Yes, No, Pending],
            &[
                ("X", vec![4, 3, 1, 2]),
                ("Y", vec![3, 4, 2, 1]),
                ("Z", vec![1, 2, 3, 4]),
            ],
        );
        let agg = aggregate(&c, &Params::default()).unwrap();
        // Z banks 3 vs X's 7 and Y's 7, and can gain at most 4 of the
        // remaining rank — never enough. Division-by-zero must not occur.
        let z = &agg.standings[&id("Z")];
        assert!(z.is_eliminated());
        for split in z.needs.values() {
            assert_eq!(split.yes_fraction(), 0.0);
        }
    }

    #[test]
    fn tie_only_contestant_is_flagged() {
        use Resolution::*;
        // A already Yes, B pending. X=[2,1], Y=[1,2]:
        //   B no  → X 2, Y 1 (X outright)
        //   B yes → X 3, Y 3 tie, identical ladders? X holds {2,1}, Y {1,2}
        //           → identical multisets → X on identifier order.
        let c = contest(&[Yes, Pending], &[("X", vec![2, 1]), ("Y", vec![1, 2])]);
        let agg = aggregate(&c, &Params::default()).unwrap();
        let y = &agg.standings[&id("Y")];
        assert_eq!(y.wins, 0);
        assert_eq!(y.tie_paths, 1);
        assert!(y.is_tie_only());
        assert!(!agg.standings[&id("X")].is_tie_only());
    }

    #[test]
    fn question_that_never_helps_shows_zero_need() {
        use Resolution::*;
        // X put its lowest rank (1) on the pending question and wins only
        // when that question stays No: 0% need, flagged must-not-happen.
        let c = contest(
            &[Pending, Yes, No],
            &[
                ("X", vec![1, 3, 2]),
                ("Y", vec![2, 1, 3]),
                ("Z", vec![3, 2, 1]),
            ],
        );
        let agg = aggregate(&c, &Params::default()).unwrap();
        let x = &agg.standings[&id("X")];
        let z = &agg.standings[&id("Z")];
        assert_eq!(x.win_or_tie_paths, 1);
        assert_eq!(x.needs[&qid("Q0")], NeedSplit { yes: 0, no: 1 });
        assert_eq!(x.needs[&qid("Q0")].yes_fraction(), 0.0);
        // Z holds the mirror position: it needs the question to happen.
        assert_eq!(z.needs[&qid("Q0")], NeedSplit { yes: 1, no: 0 });
        assert!(agg.standings[&id("Y")].is_eliminated());
    }

    #[test]
    fn question_view_rekeys_needs_by_question() {
        let agg = aggregate(&xy_contest(), &Params::default()).unwrap();
        let view = agg.question_view();
        assert_eq!(view.len(), 3);
        assert_eq!(view[&qid("Q0")][&id("X")], NeedSplit { yes: 4, no: 2 });
        assert_eq!(view[&qid("Q0")][&id("Y")], NeedSplit { yes: 2, no: 4 });
    }

    #[test]
    fn range_fragments_merge_to_the_full_result() {
        let c = contest(
            &[Resolution::Pending; 5],
            &[
                ("a", vec![1, 2, 3, 4, 5]),
                ("b", vec![5, 4, 3, 2, 1]),
                ("c", vec![2, 4, 1, 5, 3]),
            ],
        );
        let params = Params::default();
        let whole = aggregate(&c, &params).unwrap();
        let space = OutcomeSpace::new(&c.questions).unwrap();
        for split_at in [0u64, 1, 7, 16, 31, 32] {
            let mut left = aggregate_range(&c, &params, &space, 0, split_at).unwrap();
            let right = aggregate_range(&c, &params, &space, split_at, space.len()).unwrap();
            left.merge(right);
            assert_eq!(left, whole);
        }
    }

    #[test]
    fn win_fractions_sum_to_one() {
        let c = contest(
            &[Resolution::Pending; 4],
            &[("a", vec![1, 2, 3, 4]), ("b", vec![4, 3, 2, 1]), ("c", vec![2, 1, 4, 3])],
        );
        let agg = aggregate(&c, &Params::default()).unwrap();
        let sum: u64 = agg.standings.values().map(|s| s.wins).sum();
        assert_eq!(sum, agg.total_outcomes);
    }
}
