//! Lose/gain file writer.

use std::path::{Path, PathBuf};

use super::bucket_diff::{BucketDelta, DiffEntry};
use super::snapshot::bucket_path;
use crate::bucket::BucketLabel;
use crate::error::PipelineError;
use crate::report::files::OutputFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Lose,
    Gain,
}

impl Direction {
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Lose => ".lose",
            Direction::Gain => ".gain",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Direction::Lose => "LOSE file: ",
            Direction::Gain => "GAIN file: ",
        }
    }

    fn other_bucket_question(self) -> &'static str {
        match self {
            Direction::Lose => "which bucket am I in now?",
            Direction::Gain => "which bucket was I in before?",
        }
    }
}

/// Commented header lines, ending just before the count line.
pub fn header_lines(path: &Path, bucket: BucketLabel, direction: Direction) -> Vec<String> {
    let mut lines = vec![
        "#".to_string(),
        format!("# {} {}", direction.title(), path.display()),
        "#".to_string(),
    ];
    if bucket == BucketLabel::ZeroOne {
        lines.push("# field 1:  UniProt ID".to_string());
    } else {
        lines.push("# field 1:  MGI ID".to_string());
        lines.push("# field 2:  Symbol".to_string());
        lines.push(format!("# field 3:  {}", direction.other_bucket_question()));
        lines.push("#".to_string());
        lines.push(
            "# left-hand side of the bucket name is MGI; right-hand side is UniProt".to_string(),
        );
    }
    lines.push("#".to_string());
    lines
}

fn entry_cells(entry: &DiffEntry) -> [&str; 3] {
    [
        entry.id.as_str(),
        entry.label.as_str(),
        entry.other.map(BucketLabel::as_str).unwrap_or(""),
    ]
}

fn write_one(
    path: PathBuf,
    bucket: BucketLabel,
    direction: Direction,
    entries: &[DiffEntry],
) -> Result<(), PipelineError> {
    let mut out = OutputFile::create(&path)?;
    for line in header_lines(&path, bucket, direction) {
        out.write_line(&line)?;
    }
    out.write_line(&format!("# total number of records: {}", entries.len()))?;
    out.write_line("#")?;
    for entry in entries {
        out.write_row(&entry_cells(entry))?;
    }
    out.commit()
}

/// Write `<prefix>.<label>.txt.lose` and `.gain` for every bucket.
pub fn write_deltas(dir: &Path, prefix: &str, deltas: &[BucketDelta]) -> Result<(), PipelineError> {
    for delta in deltas {
        for (direction, entries) in [
            (Direction::Lose, &delta.lost),
            (Direction::Gain, &delta.gained),
        ] {
            let path = bucket_path(dir, prefix, delta.bucket, direction.suffix());
            write_one(path, delta.bucket, direction, entries)?;
        }
    }
    Ok(())
}
