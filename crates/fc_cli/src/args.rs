//! Deterministic, offline CLI argument parsing surface.
//!
//! Rules:
//! - One local contest JSON path; no networked inputs.
//! - `--render` emits report files into `--out`; the text report also goes
//!   to stdout unless `--quiet`.
//! - `--max-pending` is the pre-flight enumeration guard: the run is
//!   refused, not cancelled, when `2^pending` would be too large.
//! - `--validate-only` performs load + structural checks without running
//!   the engine.

use clap::Parser;
use std::path::PathBuf;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fc",
    disable_help_subcommand = true,
    about = "Offline, deterministic forecast contest evaluator"
)]
pub struct Args {
    /// Contest JSON path.
    #[arg(long)]
    pub contest: PathBuf,

    /// Output directory for artifacts and rendered reports.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Renderer(s) to emit as files. Omit to skip file rendering.
    #[arg(long, value_parser = ["json", "text", "html"], num_args = 0..=3)]
    pub render: Vec<String>,

    /// Add a synthetic crowd contestant from the field's mean rankings.
    #[arg(long)]
    pub with_crowd: bool,

    /// Identifier for the synthetic crowd contestant.
    #[arg(long, default_value = "WISCROWD")]
    pub crowd_id: String,

    /// Refuse to enumerate more than 2^MAX_PENDING outcomes.
    #[arg(long, default_value_t = 30)]
    pub max_pending: usize,

    /// Break max-score ties by identifier order instead of the
    /// rank-concentration rule.
    #[arg(long)]
    pub identifier_ties: bool,

    /// Validate inputs only (load + structural checks), do not run the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress the stdout report and non-essential logs.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NotFound(String),
    BadCrowdId(String),
    HtmlDisabled,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NotFound(p) => write!(f, "file not found: {p}"),
            BadCrowdId(s) => write!(f, "invalid crowd id: {s}"),
            HtmlDisabled => write!(f, "html rendering not compiled in (enable feature render-html)"),
        }
    }
}
impl std::error::Error for CliError {}

/// Parse argv and apply the checks clap cannot express.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate(&args)?;
    Ok(args)
}

fn validate(args: &Args) -> Result<(), CliError> {
    if !args.contest.exists() {
        return Err(CliError::NotFound(args.contest.display().to_string()));
    }
    if args.with_crowd && args.crowd_id.parse::<fc_core::ContestantId>().is_err() {
        return Err(CliError::BadCrowdId(args.crowd_id.clone()));
    }
    if args.render.iter().any(|r| r == "html") && !cfg!(feature = "render-html") {
        return Err(CliError::HtmlDisabled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("fc").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults_are_sane() {
        let a = parse(&["--contest", "c.json"]);
        assert_eq!(a.max_pending, 30);
        assert_eq!(a.crowd_id, "WISCROWD");
        assert!(!a.with_crowd);
        assert!(a.render.is_empty());
    }

    #[test]
    fn render_rejects_unknown_formats() {
        let r = Args::try_parse_from(["fc", "--contest", "c.json", "--render", "xml"]);
        assert!(r.is_err());
    }

    #[test]
    fn missing_contest_file_is_reported() {
        let a = parse(&["--contest", "/definitely/not/here.json"]);
        assert!(matches!(validate(&a), Err(CliError::NotFound(_))));
    }

    #[test]
    fn bad_crowd_id_is_rejected_only_when_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, "{}").unwrap();
        let p = path.display().to_string();

        let unused = parse(&["--contest", &p, "--crowd-id", "a b"]);
        assert!(validate(&unused).is_ok());

        let used = parse(&["--contest", &p, "--with-crowd", "--crowd-id", "a b"]);
        assert!(matches!(validate(&used), Err(CliError::BadCrowdId(_))));
    }
}
