//! Curator override file checks.
//!
//! Rows are `uniprot_id, mgi_id, logical_db, action` after a header line.
//! Comparisons ignore case. Markers and existing associations come from the
//! gene catalog file and the current association report.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use super::violations::{Severity, ViolationCount, ViolationKind, ViolationReport};
use crate::catalog::{MGI_ID, mgi_schema};
use crate::dataset::{LoadOptions, TableDataset};
use crate::error::PipelineError;
use crate::report::assoc::read_report;
use crate::report::files::OutputFile;

const MIN_COLUMNS: usize = 4;
const ACTIONS: [&str; 2] = ["add", "delete"];
const LOGICAL_DBS: [&str; 2] = ["s", "t"];

/// Markers and their current UniProt associations, lowercased.
#[derive(Debug, Clone, Default)]
pub struct KnownAssociations {
    markers: HashSet<String>,
    uniprot: HashMap<String, HashSet<String>>,
}

impl KnownAssociations {
    pub fn insert_marker(&mut self, mgi_id: &str) {
        self.markers.insert(mgi_id.to_lowercase());
    }

    pub fn insert_association(&mut self, mgi_id: &str, uniprot_id: &str) {
        self.uniprot
            .entry(mgi_id.to_lowercase())
            .or_default()
            .insert(uniprot_id.to_lowercase());
    }

    /// Markers from the gene catalog file, associations from the report.
    pub fn load(gene_assoc: &Path, report: &Path) -> Result<Self, PipelineError> {
        let mut known = Self::default();

        let catalog = TableDataset::load_path(
            "mgi",
            mgi_schema()?,
            gene_assoc,
            LoadOptions::default(),
        )?;
        let mgi_id = catalog.schema().field(MGI_ID)?;
        for record in catalog.records() {
            known.insert_marker(&record.text(mgi_id));
        }

        let (_, rows) = read_report(report)?;
        for row in &rows {
            for uniprot_id in row.uniprot_ids() {
                known.insert_association(&row.mgi_id, uniprot_id);
            }
        }
        tracing::debug!(
            markers = known.markers.len(),
            associated = known.uniprot.len(),
            "loaded known associations"
        );
        Ok(known)
    }

    fn has_marker(&self, mgi_id: &str) -> bool {
        self.markers.contains(mgi_id)
    }

    fn is_associated(&self, mgi_id: &str, uniprot_id: &str) -> bool {
        self.uniprot
            .get(mgi_id)
            .is_some_and(|ids| ids.contains(uniprot_id))
    }
}

/// Result of checking one override file.
#[derive(Debug, Clone, Default)]
pub struct QcOutcome {
    pub report: ViolationReport,
    /// Lines that passed every check.
    pub to_load: Vec<String>,
    pub rows: usize,
}

impl QcOutcome {
    pub fn worst(&self) -> Option<Severity> {
        self.report.worst()
    }

    pub fn summary(&self) -> QcCounts {
        QcCounts {
            rows: self.rows,
            to_load: self.to_load.len(),
            violations: self.report.counts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QcCounts {
    pub rows: usize,
    pub to_load: usize,
    pub violations: Vec<ViolationCount>,
}

/// Check every data row of `input` against `known`.
pub fn check_overrides<R: BufRead>(
    input: R,
    known: &KnownAssociations,
) -> std::io::Result<QcOutcome> {
    let mut outcome = QcOutcome::default();
    let mut by_uniprot: HashMap<String, Vec<(usize, String)>> = HashMap::new();
    let mut uniprot_order: Vec<String> = Vec::new();

    for (idx, line) in input.lines().skip(1).enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        outcome.rows += 1;

        let tokens: Vec<&str> = text.split('\t').map(str::trim).collect();
        if tokens.len() < MIN_COLUMNS {
            outcome.report.push(ViolationKind::InvalidRow, line_no, text);
            continue;
        }

        let uniprot_id = tokens[0].to_lowercase();
        let seen = by_uniprot.entry(uniprot_id.clone()).or_default();
        if seen.is_empty() {
            uniprot_order.push(uniprot_id.clone());
        }
        seen.push((line_no, text.to_string()));

        let mgi_id = tokens[1].to_lowercase();
        let logical_db = tokens[2].to_lowercase();
        let action = tokens[3].to_lowercase();
        if tokens[..MIN_COLUMNS].iter().any(|token| token.is_empty())
            || !ACTIONS.contains(&action.as_str())
            || !LOGICAL_DBS.contains(&logical_db.as_str())
        {
            outcome.report.push(ViolationKind::InvalidRow, line_no, text);
            continue;
        }

        if !known.has_marker(&mgi_id) {
            outcome.report.push(ViolationKind::UnknownMgiId, line_no, text);
            continue;
        }
        let associated = known.is_associated(&mgi_id, &uniprot_id);
        if action == "add" && associated {
            outcome.report.push(ViolationKind::AddExists, line_no, text);
            continue;
        }
        if action == "delete" && !associated {
            outcome.report.push(ViolationKind::DeleteMissing, line_no, text);
            continue;
        }
        outcome.to_load.push(text.to_string());
    }

    for uniprot_id in &uniprot_order {
        let lines = &by_uniprot[uniprot_id];
        if lines.len() > 1 {
            for (line_no, text) in lines {
                outcome
                    .report
                    .push(ViolationKind::DuplicateUniProt, *line_no, text);
            }
        }
    }
    Ok(outcome)
}

/// Output paths of the QC step.
#[derive(Debug, Clone, Copy)]
pub struct QcOutputs<'p> {
    pub report: &'p Path,
    pub to_load: &'p Path,
}

/// Run the checks on `input` and write the report and the load file.
///
/// The load file is not published when a fatal violation is found.
pub fn run_override_qc(
    input: &Path,
    known: &KnownAssociations,
    outputs: QcOutputs<'_>,
) -> Result<QcOutcome, PipelineError> {
    let file = File::open(input).map_err(|err| PipelineError::io(input, err))?;
    let outcome =
        check_overrides(BufReader::new(file), known).map_err(|err| PipelineError::io(input, err))?;

    let mut report = OutputFile::create(outputs.report)?;
    for line in outcome.report.render().lines() {
        report.write_line(line)?;
    }
    report.commit()?;

    if outcome.worst() == Some(Severity::Fatal) {
        tracing::warn!(
            input = %input.display(),
            "override file has fatal errors; load file not written"
        );
        return Ok(outcome);
    }

    let mut to_load = OutputFile::create(outputs.to_load)?;
    for line in &outcome.to_load {
        to_load.write_line(line)?;
    }
    to_load.commit()?;
    tracing::info!(rows = outcome.rows, to_load = outcome.to_load.len(), "override QC done");
    Ok(outcome)
}
