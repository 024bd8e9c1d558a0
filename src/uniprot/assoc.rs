//! Protein association file and SwissProt/TrEMBL id lists.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;

use super::parser::{UniProtParseErrorKind, UniProtParser};
use crate::error::PipelineError;
use crate::report::files::OutputFile;

/// Output paths of the UniProt association step.
#[derive(Debug, Clone, Copy)]
pub struct AssocOutputs<'p> {
    pub assoc: &'p Path,
    pub swissprot: &'p Path,
    pub trembl: &'p Path,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UniProtCounts {
    pub records: usize,
    pub swissprot: usize,
    pub trembl: usize,
    pub written: usize,
    /// Entries with no EntrezGene, Ensembl or EMBL id.
    pub skipped: usize,
}

/// Parse `input` and write the association file and both id lists.
pub fn write_uniprot_assoc(
    input: &Path,
    outputs: AssocOutputs<'_>,
) -> Result<UniProtCounts, PipelineError> {
    let file = File::open(input).map_err(|err| PipelineError::io(input, err))?;
    let parser = UniProtParser::new(BufReader::new(file));

    let mut assoc = OutputFile::create(outputs.assoc)?;
    let mut swissprot = OutputFile::create(outputs.swissprot)?;
    let mut trembl = OutputFile::create(outputs.trembl)?;
    let mut counts = UniProtCounts::default();

    for record in parser {
        let record = record.map_err(|err| match err.kind {
            UniProtParseErrorKind::MissingAccession => PipelineError::UniProtParse {
                path: input.to_path_buf(),
                record: err.record,
                line: err.line,
            },
            UniProtParseErrorKind::Io(source) => PipelineError::io(input, source),
        })?;
        counts.records += 1;

        if record.is_trembl {
            counts.trembl += 1;
            trembl.write_line(&record.uniprot_id)?;
        } else {
            counts.swissprot += 1;
            swissprot.write_line(&record.uniprot_id)?;
        }

        if record.has_join_ids() {
            counts.written += 1;
            assoc.write_row(&record.assoc_cells())?;
        } else {
            counts.skipped += 1;
            tracing::debug!(uniprot_id = %record.uniprot_id, "no EntrezGene, Ensembl or EMBL id; not written");
        }
    }

    assoc.commit()?;
    swissprot.commit()?;
    trembl.commit()?;

    if counts.skipped > 0 {
        tracing::warn!(
            skipped = counts.skipped,
            "entries without EntrezGene, Ensembl or EMBL ids left out of the association file"
        );
    }
    Ok(counts)
}
