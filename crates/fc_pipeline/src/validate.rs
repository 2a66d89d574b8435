//! Structural & semantic validation before any computation.
//!
//! Every configuration error is collected (not just the first), ordered
//! deterministically, and reported together; a single error aborts the run
//! before any enumeration. Warnings never block.

use fc_core::{Contest, ContestantId, QuestionId};
use std::collections::BTreeSet;

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred (kept small & deterministic).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Root,
    Question(QuestionId),
    Contestant(ContestantId),
}

impl EntityRef {
    fn sort_token(&self) -> String {
        match self {
            EntityRef::Root => String::new(),
            EntityRef::Question(q) => format!("q:{q}"),
            EntityRef::Contestant(c) => format!("c:{c}"),
        }
    }
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// Deterministic report: `pass` = (no Error); issue ordering is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Stable one-line summary of all errors, for the pipeline's fatal path.
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Top-level entry point.
pub fn validate(contest: &Contest) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if contest.questions.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "no_questions",
            message: "contest has no questions".to_string(),
            where_: EntityRef::Root,
        });
    }
    if contest.contestants.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "empty_field",
            message: "contestant set is empty".to_string(),
            where_: EntityRef::Root,
        });
    }

    issues.extend(check_duplicate_questions(contest));
    issues.extend(check_duplicate_contestants(contest));
    issues.extend(check_rankings(contest));

    if !contest.questions.is_empty() && contest.pending_count() == 0 {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            code: "fully_resolved",
            message: "no pending questions; enumeration is a single outcome".to_string(),
            where_: EntityRef::Root,
        });
    }

    // Deterministic issue order for byte-identical runs.
    issues.sort_by(|a, b| {
        (a.code, a.where_.sort_token(), &a.message).cmp(&(b.code, b.where_.sort_token(), &b.message))
    });

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

fn check_duplicate_questions(contest: &Contest) -> Vec<ValidationIssue> {
    let mut seen: BTreeSet<&QuestionId> = BTreeSet::new();
    let mut out = Vec::new();
    for q in &contest.questions {
        if !seen.insert(&q.id) {
            out.push(ValidationIssue {
                severity: Severity::Error,
                code: "duplicate_question",
                message: format!("duplicate question id {}", q.id),
                where_: EntityRef::Question(q.id.clone()),
            });
        }
    }
    out
}

fn check_duplicate_contestants(contest: &Contest) -> Vec<ValidationIssue> {
    let mut seen: BTreeSet<&ContestantId> = BTreeSet::new();
    let mut out = Vec::new();
    for c in &contest.contestants {
        if !seen.insert(&c.id) {
            out.push(ValidationIssue {
                severity: Severity::Error,
                code: "duplicate_contestant",
                message: format!("duplicate contestant id {}", c.id),
                where_: EntityRef::Contestant(c.id.clone()),
            });
        }
    }
    out
}

fn check_rankings(contest: &Contest) -> Vec<ValidationIssue> {
    let n = contest.question_count();
    let mut out = Vec::new();
    for c in &contest.contestants {
        if c.ranking.len() != n {
            out.push(ValidationIssue {
                severity: Severity::Error,
                code: "ranking_length",
                message: format!(
                    "ranking for {} has {} entries, expected {}",
                    c.id,
                    c.ranking.len(),
                    n
                ),
                where_: EntityRef::Contestant(c.id.clone()),
            });
        } else if !c.ranking.is_permutation_of(n) {
            out.push(ValidationIssue {
                severity: Severity::Error,
                code: "not_a_permutation",
                message: format!("ranking for {} is not a permutation of 1..={}", c.id, n),
                where_: EntityRef::Contestant(c.id.clone()),
            });
        }
    }
    out
}
