//! fc_report — pure offline report model + renderers (JSON/text/HTML).
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply artifacts already in memory.
//! - Percent strings use integer arithmetic, never float formatting.
//! - Stable section order and row ordering (count descending, identifier
//!   ascending) so repeated runs render byte-identically.

#![forbid(unsafe_code)]

pub mod percent;
pub mod render_json;
pub mod render_text;
#[cfg(feature = "render_html")]
pub mod render_html;

use fc_core::Contest;
use fc_pipeline::{NeedSplit, ResultDoc, RunRecordDoc};
use percent::{percent_auto, percent_tenths};
use serde::Serialize;

// ===== Errors =====

#[derive(Debug)]
pub enum ReportError {
    Template(&'static str),
    Inconsistent(&'static str),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Template(m) => write!(f, "template error: {m}"),
            ReportError::Inconsistent(m) => write!(f, "inconsistent artifacts: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====

#[derive(Clone, Debug, Serialize)]
pub struct ReportModel {
    pub cover: SectionCover,
    pub standings: SectionStandings,
    pub ties: SectionTies,
    pub needs: SectionNeeds,
    pub sensitivity: SectionSensitivity,
    pub deltas: SectionDeltas,
    pub consensus: SectionConsensus,
    pub integrity: SectionIntegrity,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionCover {
    pub title: String,
    pub contestants: usize,
    pub questions: usize,
    pub pending: usize,
    pub baseline_yes: u32,
    pub total_outcomes: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StandingStatus {
    Active,
    TieOnly,
    Eliminated,
}

#[derive(Clone, Debug, Serialize)]
pub struct StandingRow {
    pub contestant: String,
    pub status: StandingStatus,
    /// Win share for active rows, tie-participation share for tie-only rows,
    /// "0.0%" for eliminated rows.
    pub share: String,
    pub wins: u64,
    pub win_or_tie_paths: u64,
    pub banked_score: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionStandings {
    pub rows: Vec<StandingRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionTies {
    pub tie_outcomes: u64,
    pub share: String,
    pub tie_only: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NeedCell {
    pub question: String,
    pub percent: String,
    pub yes: u64,
    pub no: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct NeedRow {
    pub contestant: String,
    pub win_or_tie_paths: u64,
    /// Pending questions, highest need first.
    pub needs: Vec<NeedCell>,
    pub must_true: Vec<String>,
    pub must_false: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionNeeds {
    pub rows: Vec<NeedRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct QuestionRow {
    pub question: String,
    /// (contestant, need percent), highest first: who benefits if this
    /// resolves `Yes`.
    pub helps: Vec<(String, String)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionSensitivity {
    pub questions: Vec<QuestionRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeltaRow {
    pub additional_yes: u32,
    /// (contestant, path count), highest first.
    pub participants: Vec<(String, u64)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionDeltas {
    pub rows: Vec<DeltaRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionConsensus {
    /// (question, mean rank), highest mean first.
    pub mean_ranks: Vec<(String, String)>,
    /// (question, median rank), highest first.
    pub median_ranks: Vec<(String, String)>,
    /// (contestant, mean absolute error vs the crowd ranking), most
    /// contrarian first.
    pub contrarians: Vec<(String, String)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionIntegrity {
    pub result_id: String,
    pub run_id: String,
    pub engine_vendor: String,
    pub engine_name: String,
    pub engine_version: String,
    pub engine_build: String,
    pub tie_policy: String,
    pub contest_sha256: String,
    pub timestamp_utc: String,
}

// ===== API =====

/// Build the report model from the contest and its artifacts (pure, offline).
pub fn build_model(
    contest: &Contest,
    result: &ResultDoc,
    run: &RunRecordDoc,
) -> Result<ReportModel, ReportError> {
    let agg = &result.aggregate;
    let total = agg.total_outcomes;

    let cover = SectionCover {
        title: contest
            .title
            .clone()
            .unwrap_or_else(|| "Forecast Contest".to_string()),
        contestants: contest.contestants.len(),
        questions: contest.question_count(),
        pending: agg.pending.len(),
        baseline_yes: agg.baseline_yes,
        total_outcomes: total,
    };

    // ---- Standings (active → tie-only → eliminated; counts desc, id asc) ----
    let mut rows: Vec<StandingRow> = agg
        .standings
        .iter()
        .map(|(id, s)| {
            let status = if s.wins > 0 {
                StandingStatus::Active
            } else if s.is_tie_only() {
                StandingStatus::TieOnly
            } else {
                StandingStatus::Eliminated
            };
            let share = match status {
                StandingStatus::Active => percent_auto(s.wins, total),
                StandingStatus::TieOnly => percent_auto(s.tie_paths, total),
                StandingStatus::Eliminated => "0.0%".to_string(),
            };
            StandingRow {
                contestant: id.to_string(),
                status,
                share,
                wins: s.wins,
                win_or_tie_paths: s.win_or_tie_paths,
                banked_score: s.banked_score,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        (a.status, std::cmp::Reverse(a.wins), std::cmp::Reverse(a.win_or_tie_paths))
            .cmp(&(b.status, std::cmp::Reverse(b.wins), std::cmp::Reverse(b.win_or_tie_paths)))
            .then_with(|| a.contestant.cmp(&b.contestant))
    });
    let standings = SectionStandings { rows };

    // ---- Ties ----
    let mut tie_only: Vec<fc_core::ContestantId> = agg
        .standings
        .iter()
        .filter(|(_, s)| s.is_tie_only())
        .map(|(id, _)| id.clone())
        .collect();
    fc_core::determinism::sort_contestant_ids(&mut tie_only);
    let ties = SectionTies {
        tie_outcomes: agg.tie_outcomes,
        share: percent_tenths(agg.tie_outcomes, total),
        tie_only: tie_only.iter().map(|id| id.to_string()).collect(),
    };

    // ---- Necessity per contestant (only those with win-paths) ----
    let mut need_rows: Vec<NeedRow> = Vec::new();
    for (id, s) in &agg.standings {
        if s.is_eliminated() {
            continue;
        }
        let mut cells: Vec<(u64, NeedCell)> = s
            .needs
            .iter()
            .map(|(q, split)| {
                let scaled = scaled_fraction(*split);
                (
                    scaled,
                    NeedCell {
                        question: q.to_string(),
                        percent: percent_auto(split.yes, split.total()),
                        yes: split.yes,
                        no: split.no,
                    },
                )
            })
            .collect();
        cells.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.question.cmp(&b.1.question)));

        let must_true = cells
            .iter()
            .filter(|(_, c)| c.no == 0 && c.yes > 0)
            .map(|(_, c)| c.question.clone())
            .collect();
        let must_false = cells
            .iter()
            .filter(|(_, c)| c.yes == 0 && c.no > 0)
            .map(|(_, c)| c.question.clone())
            .collect();

        need_rows.push(NeedRow {
            contestant: id.to_string(),
            win_or_tie_paths: s.win_or_tie_paths,
            needs: cells.into_iter().map(|(_, c)| c).collect(),
            must_true,
            must_false,
        });
    }
    need_rows.sort_by(|a, b| {
        b.win_or_tie_paths
            .cmp(&a.win_or_tie_paths)
            .then_with(|| a.contestant.cmp(&b.contestant))
    });
    let needs = SectionNeeds { rows: need_rows };

    // ---- Per-question sensitivity ----
    let view = agg.question_view();
    let questions = view
        .iter()
        .map(|(q, per_contestant)| {
            let mut helps: Vec<(u64, String, String)> = per_contestant
                .iter()
                .map(|(id, split)| {
                    (
                        scaled_fraction(*split),
                        id.to_string(),
                        percent_auto(split.yes, split.total()),
                    )
                })
                .collect();
            helps.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
            QuestionRow {
                question: q.to_string(),
                helps: helps.into_iter().map(|(_, id, p)| (id, p)).collect(),
            }
        })
        .collect();
    let sensitivity = SectionSensitivity { questions };

    // ---- Delta buckets ----
    let deltas = SectionDeltas {
        rows: agg
            .delta_buckets
            .iter()
            .map(|(delta, bucket)| {
                let mut participants: Vec<(fc_core::ContestantId, u64)> = bucket
                    .iter()
                    .map(|(id, count)| (id.clone(), *count))
                    .collect();
                participants.sort_by(fc_core::determinism::cmp_count_desc_then_id);
                DeltaRow {
                    additional_yes: *delta,
                    participants: participants
                        .into_iter()
                        .map(|(id, count)| (id.to_string(), count))
                        .collect(),
                }
            })
            .collect(),
    };

    // ---- Consensus statistics ----
    let consensus = build_consensus(contest)?;

    let integrity = SectionIntegrity {
        result_id: result.id.clone(),
        run_id: run.id.clone(),
        engine_vendor: run.engine.vendor.clone(),
        engine_name: run.engine.name.clone(),
        engine_version: run.engine.version.clone(),
        engine_build: run.engine.build.clone(),
        tie_policy: result.tie_policy.clone(),
        contest_sha256: run.inputs.contest_sha256.clone(),
        timestamp_utc: run.timestamp_utc.clone(),
    };

    Ok(ReportModel {
        cover,
        standings,
        ties,
        needs,
        sensitivity,
        deltas,
        consensus,
        integrity,
    })
}

// ===== Helpers (pure) =====

/// Need fraction scaled to 1e4 for float-free sorting.
fn scaled_fraction(split: NeedSplit) -> u64 {
    if split.total() == 0 {
        0
    } else {
        split.yes * 10_000 / split.total()
    }
}

fn build_consensus(contest: &Contest) -> Result<SectionConsensus, ReportError> {
    use fc_algo::crowd;

    let n = contest.question_count();
    let field = &contest.contestants;
    let sums = crowd::rank_sums(field, n)
        .map_err(|_| ReportError::Inconsistent("consensus requires a non-empty field"))?;

    let mut mean_rows: Vec<(u64, String, String)> = contest
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let tenths = crowd::mean_rank_tenths(sums[i], field.len());
            (tenths, q.id.to_string(), format_tenths(tenths))
        })
        .collect();
    mean_rows.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let mut median_rows: Vec<(u64, String, String)> = contest
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let tenths = crowd::median_rank_tenths(field, i);
            (tenths, q.id.to_string(), format_tenths(tenths))
        })
        .collect();
    median_rows.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let crowd_ranking = crowd::crowd_ranking(field, n)
        .map_err(|_| ReportError::Inconsistent("consensus requires a non-empty field"))?;
    let mut contrarians: Vec<(u64, String, String)> = Vec::with_capacity(field.len());
    for c in field {
        let hundredths = crowd::mean_abs_error_hundredths(&c.ranking, &crowd_ranking)
            .map_err(|_| ReportError::Inconsistent("ranking length mismatch in consensus"))?;
        contrarians.push((hundredths, c.id.to_string(), format_hundredths(hundredths)));
    }
    contrarians.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    Ok(SectionConsensus {
        mean_ranks: mean_rows.into_iter().map(|(_, q, v)| (q, v)).collect(),
        median_ranks: median_rows.into_iter().map(|(_, q, v)| (q, v)).collect(),
        contrarians: contrarians.into_iter().map(|(_, c, v)| (c, v)).collect(),
    })
}

fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

fn format_hundredths(hundredths: u64) -> String {
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::{Contestant, Params, Question, Ranking, Resolution};
    use fc_pipeline::{aggregate, build_result, build_run_record, EngineMeta};

    fn artifacts() -> (Contest, ResultDoc, RunRecordDoc) {
        let contest = Contest {
            title: Some("mini".to_string()),
            questions: vec![
                Question {
                    id: "A".parse().unwrap(),
                    text: None,
                    resolution: Resolution::Yes,
                },
                Question {
                    id: "B".parse().unwrap(),
                    text: None,
                    resolution: Resolution::Pending,
                },
                Question {
                    id: "C".parse().unwrap(),
                    text: None,
                    resolution: Resolution::Pending,
                },
            ],
            contestants: vec![
                Contestant {
                    id: "X".parse().unwrap(),
                    ranking: Ranking::new(vec![3, 1, 2]),
                },
                Contestant {
                    id: "Y".parse().unwrap(),
                    ranking: Ranking::new(vec![1, 3, 2]),
                },
            ],
        };
        let params = Params::default();
        let agg = aggregate::aggregate(&contest, &params).unwrap();
        let result = build_result::build_result(&contest, &params, agg).unwrap();
        let run = build_run_record::build_run_record(
            EngineMeta {
                vendor: "fc".into(),
                name: "forecast-engine".into(),
                version: "0.1.0".into(),
                build: "test".into(),
            },
            "2025-08-12T10:00:00Z",
            &"ab".repeat(32),
            &result,
        )
        .unwrap();
        (contest, result, run)
    }

    #[test]
    fn model_sections_are_populated() {
        let (contest, result, run) = artifacts();
        let model = build_model(&contest, &result, &run).unwrap();
        assert_eq!(model.cover.total_outcomes, 4);
        assert_eq!(model.cover.pending, 2);
        assert_eq!(model.standings.rows.len(), 2);
        assert_eq!(model.sensitivity.questions.len(), 2);
        assert_eq!(model.deltas.rows.len(), 3);
        assert_eq!(model.integrity.result_id, result.id);
    }

    #[test]
    fn standings_order_active_before_tie_only_before_eliminated() {
        let (contest, result, run) = artifacts();
        let model = build_model(&contest, &result, &run).unwrap();
        let statuses: Vec<StandingStatus> =
            model.standings.rows.iter().map(|r| r.status).collect();
        let mut sorted = statuses.clone();
        sorted.sort();
        assert_eq!(statuses, sorted);
    }

    #[test]
    fn need_rows_sort_highest_need_first() {
        let (contest, result, run) = artifacts();
        let model = build_model(&contest, &result, &run).unwrap();
        for row in &model.needs.rows {
            let scaled: Vec<u64> = row
                .needs
                .iter()
                .map(|c| {
                    if c.yes + c.no == 0 {
                        0
                    } else {
                        c.yes * 10_000 / (c.yes + c.no)
                    }
                })
                .collect();
            let mut sorted = scaled.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(scaled, sorted);
        }
    }

    #[test]
    fn consensus_ranks_every_question_and_contestant() {
        let (contest, result, run) = artifacts();
        let model = build_model(&contest, &result, &run).unwrap();
        assert_eq!(model.consensus.mean_ranks.len(), 3);
        assert_eq!(model.consensus.median_ranks.len(), 3);
        assert_eq!(model.consensus.contrarians.len(), 2);
    }

    #[test]
    fn repeated_builds_are_identical() {
        let (contest, result, run) = artifacts();
        let a = serde_json::to_string(&build_model(&contest, &result, &run).unwrap()).unwrap();
        let b = serde_json::to_string(&build_model(&contest, &result, &run).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
