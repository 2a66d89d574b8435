//! Plain-text renderer: the contest report as a terminal-friendly page.
//!
//! Section order mirrors the model. Output is deterministic; the only
//! inputs are the model's already-ordered rows.

use crate::{ReportError, ReportModel, StandingStatus};
use std::fmt::Write as _;

pub fn render_text(model: &ReportModel) -> Result<String, ReportError> {
    let mut out = String::with_capacity(4096);
    let w = &mut out;

    let c = &model.cover;
    let _ = writeln!(w, "{}", c.title);
    let _ = writeln!(w, "{}", "=".repeat(c.title.chars().count()));
    let _ = writeln!(
        w,
        "{} contestants, {} questions ({} pending, {} already yes)",
        c.contestants, c.questions, c.pending, c.baseline_yes
    );
    let _ = writeln!(w, "{} possible outcomes enumerated", c.total_outcomes);

    let _ = writeln!(w, "\nWin-path shares (banked score in parentheses)");
    for row in &model.standings.rows {
        match row.status {
            StandingStatus::Active => {
                let _ = writeln!(w, "  {}: {} ({})", row.contestant, row.share, row.banked_score);
            }
            StandingStatus::TieOnly => {
                let _ = writeln!(
                    w,
                    "  {}: {} (tie-only paths) ({})",
                    row.contestant, row.share, row.banked_score
                );
            }
            StandingStatus::Eliminated => {
                let _ = writeln!(
                    w,
                    "  {}: 0.0% (eliminated) ({})",
                    row.contestant, row.banked_score
                );
            }
        }
    }

    let t = &model.ties;
    let _ = writeln!(w, "\nTie-breaking");
    let _ = writeln!(
        w,
        "  {} of {} outcomes ({}) required tie-breaking",
        t.tie_outcomes, c.total_outcomes, t.share
    );
    if t.tie_only.is_empty() {
        let _ = writeln!(w, "  no contestants are limited to tie-break wins");
    } else {
        let _ = writeln!(
            w,
            "  tie-only contestants: {}",
            t.tie_only.join(", ")
        );
    }

    let _ = writeln!(w, "\nWhat each contestant needs (high = must happen, low = must not)");
    for row in &model.needs.rows {
        let _ = writeln!(
            w,
            "  {} — {} win paths",
            row.contestant, row.win_or_tie_paths
        );
        if !row.must_true.is_empty() {
            let _ = writeln!(w, "    must happen: {}", row.must_true.join(", "));
        }
        if !row.must_false.is_empty() {
            let _ = writeln!(w, "    must not happen: {}", row.must_false.join(", "));
        }
        let cells: Vec<String> = row
            .needs
            .iter()
            .map(|n| format!("{} {}", n.question, n.percent))
            .collect();
        if !cells.is_empty() {
            let _ = writeln!(w, "    {}", cells.join("  "));
        }
    }

    let _ = writeln!(w, "\nPer-question sensitivity (who benefits if it resolves yes)");
    for q in &model.sensitivity.questions {
        let cells: Vec<String> = q
            .helps
            .iter()
            .map(|(id, p)| format!("{id} {p}"))
            .collect();
        let _ = writeln!(w, "  {}: {}", q.question, cells.join(", "));
    }

    let _ = writeln!(w, "\nWinners by additional yes outcomes");
    for row in &model.deltas.rows {
        if row.participants.is_empty() {
            let _ = writeln!(w, "  +{}: (no win paths)", row.additional_yes);
            continue;
        }
        let cells: Vec<String> = row
            .participants
            .iter()
            .map(|(id, n)| format!("{id} {n}"))
            .collect();
        let _ = writeln!(w, "  +{}: {}", row.additional_yes, cells.join(", "));
    }

    let cons = &model.consensus;
    let _ = writeln!(w, "\nConsensus");
    let means: Vec<String> = cons
        .mean_ranks
        .iter()
        .map(|(q, v)| format!("{q} {v}"))
        .collect();
    let _ = writeln!(w, "  mean ranks: {}", means.join(", "));
    let medians: Vec<String> = cons
        .median_ranks
        .iter()
        .map(|(q, v)| format!("{q} {v}"))
        .collect();
    let _ = writeln!(w, "  median ranks: {}", medians.join(", "));
    let maes: Vec<String> = cons
        .contrarians
        .iter()
        .map(|(id, v)| format!("{id} {v}"))
        .collect();
    let _ = writeln!(w, "  distance from crowd ranking: {}", maes.join(", "));

    let i = &model.integrity;
    let _ = writeln!(w, "\nIntegrity");
    let _ = writeln!(w, "  result {}", i.result_id);
    let _ = writeln!(w, "  run {}", i.run_id);
    let _ = writeln!(
        w,
        "  engine {}/{} v{} ({}) — tie policy {}",
        i.engine_vendor, i.engine_name, i.engine_version, i.engine_build, i.tie_policy
    );
    let _ = writeln!(w, "  contest sha256 {}", i.contest_sha256);
    let _ = writeln!(w, "  finished {}", i.timestamp_utc);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use crate::build_model;
    use fc_core::{Contest, Contestant, Params, Question, Ranking, Resolution};
    use fc_pipeline::{aggregate, build_result, build_run_record, EngineMeta};

    #[test]
    fn text_report_carries_every_section() {
        let contest = Contest {
            title: Some("mini".to_string()),
            questions: vec![
                Question {
                    id: "A".parse().unwrap(),
                    text: None,
                    resolution: Resolution::Pending,
                },
                Question {
                    id: "B".parse().unwrap(),
                    text: None,
                    resolution: Resolution::Pending,
                },
            ],
            contestants: vec![
                Contestant {
                    id: "X".parse().unwrap(),
                    ranking: Ranking::new(vec![2, 1]),
                },
                Contestant {
                    id: "Y".parse().unwrap(),
                    ranking: Ranking::new(vec![1, 2]),
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
            &"cd".repeat(32),
            &result,
        )
        .unwrap();
        let model = build_model(&contest, &result, &run).unwrap();
        let text = super::render_text(&model).unwrap();

        assert!(text.contains("Win-path shares"));
        assert!(text.contains("Tie-breaking"));
        assert!(text.contains("Per-question sensitivity"));
        assert!(text.contains("Winners by additional yes outcomes"));
        assert!(text.contains("Integrity"));
        assert!(text.contains("RES:"));
        assert!(text.contains("RUN:2025-08-12T10:00:00Z-"));
    }
}
