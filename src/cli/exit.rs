//! Exit codes and stdout/stderr routing.

use serde::Serialize;

/// Pipeline step selected by the subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    UniprotAssoc,
    Buckets,
    BucketDiff,
    Annotations,
    OverrideQc,
}

impl Step {
    pub const fn as_str(self) -> &'static str {
        match self {
            Step::UniprotAssoc => "uniprot-assoc",
            Step::Buckets => "buckets",
            Step::BucketDiff => "bucket-diff",
            Step::Annotations => "annotations",
            Step::OverrideQc => "override-qc",
        }
    }
}

/// Result of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Success,
    /// Fatal pipeline error.
    Failure,
    /// QC found non-fatal errors or warnings.
    QcWarnings,
    /// QC found rows that block the load.
    QcFatal,
}

/// Output mode chosen by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

pub fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Success => 0,
        Outcome::Failure => 1,
        Outcome::QcWarnings => 2,
        Outcome::QcFatal => 3,
    }
}

/// JSON always goes to stdout; human failures go to stderr.
pub fn output_stream(outcome: Outcome, mode: OutputMode) -> OutputStream {
    match (mode, outcome) {
        (OutputMode::Json, _) => OutputStream::Stdout,
        (OutputMode::Human, Outcome::Failure) => OutputStream::Stderr,
        (OutputMode::Human, _) => OutputStream::Stdout,
    }
}
