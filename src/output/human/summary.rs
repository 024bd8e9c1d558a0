//! Human run summary for completed steps.

use crate::bucket::BucketLabel;
use crate::cli::exit::Outcome;
use crate::output::json::{Counts, FileEntry, JsonOutput};

pub fn render_summary(output: &JsonOutput) -> Vec<String> {
    let mut lines = vec![format!(
        "Step: {} ({})",
        output.step.as_str(),
        outcome_label(output.outcome)
    )];
    render_counts(&output.counts, &mut lines);
    lines.extend(output.files.iter().map(render_file));
    lines
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "ok",
        Outcome::Failure => "failed",
        Outcome::QcWarnings => "QC errors or warnings",
        Outcome::QcFatal => "QC fatal errors; load file not written",
    }
}

fn render_counts(counts: &Counts, lines: &mut Vec<String>) {
    if let Some(uniprot) = &counts.uniprot {
        lines.push(format!(
            "UniProt records: {} (SwissProt {}, TrEMBL {})",
            uniprot.records, uniprot.swissprot, uniprot.trembl
        ));
        lines.push(format!(
            "Association rows: {} written, {} without EntrezGene/Ensembl/EMBL ids",
            uniprot.written, uniprot.skipped
        ));
    }
    if let Some(buckets) = &counts.buckets {
        lines.push(format!(
            "Records: MGI {}, UniProt {}; links {}",
            buckets.left_records, buckets.right_records, buckets.edges
        ));
        for label in BucketLabel::ALL {
            if let Some(count) = buckets.get(label) {
                lines.push(format!("{} Bucket: {}", label.ratio(), count.headline()));
            }
        }
    }
    if let Some(rows) = counts.report_rows {
        lines.push(format!("Association report rows: {rows}"));
    }
    if let Some(deltas) = &counts.deltas {
        for delta in deltas {
            lines.push(format!(
                "{}: lost {}, gained {}",
                delta.bucket.as_str(),
                delta.lost,
                delta.gained
            ));
        }
    }
    if let Some(annotations) = &counts.annotations {
        lines.push(format!(
            "InterPro annotations: {} ({} markers)",
            annotations.interpro, annotations.markers
        ));
        if let Some(ec_go) = annotations.ec_go {
            lines.push(format!("EC/GO annotations: {ec_go}"));
        }
        if let Some(glygen) = annotations.glygen {
            lines.push(format!(
                "GlyGen annotations: {} ({} mismatched)",
                glygen.rows, glygen.mismatches
            ));
        }
    }
    if let Some(qc) = &counts.qc {
        lines.push(format!("Rows checked: {}, to load: {}", qc.rows, qc.to_load));
        for violation in qc.violations.iter().filter(|v| v.count > 0) {
            lines.push(format!("{}: {}", violation.kind, violation.count));
        }
    }
}

fn render_file(file: &FileEntry) -> String {
    format!("File({}): {}", file.role, file.path)
}
