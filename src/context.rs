//! Explicit state for the bucketization step.
//!
//! Holds both loaded catalogs and the output settings; the bucketizer and
//! reporters borrow from it for the length of one run.

use std::path::PathBuf;

use crate::bucket::{BucketCounts, BucketLabel, Bucketizer};
use crate::catalog::{
    JOIN_FIELDS, MGI_PROJECTION, MGI_SUMMARY_PROJECTION, UNIPROT_PROJECTION, mgi_schema,
    uniprot_schema,
};
use crate::dataset::{LoadOptions, TableDataset};
use crate::diff::snapshot::save_previous;
use crate::error::PipelineError;
use crate::report::{AssocSchema, BucketReporter, UniProtKinds, build_rows, write_report};

/// Source files of the bucketization step.
#[derive(Debug, Clone)]
pub struct BucketInputs {
    pub mgi: PathBuf,
    pub uniprot: PathBuf,
    pub swissprot: PathBuf,
    pub trembl: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BucketSettings {
    pub dir: PathBuf,
    pub prefix: String,
    pub report: PathBuf,
    pub assoc_schema: AssocSchema,
    pub separator: char,
    /// Rename the existing bucket files to `.save` before writing.
    pub save_previous: bool,
}

#[derive(Debug)]
pub struct BucketContext {
    pub mgi: TableDataset,
    pub uniprot: TableDataset,
    pub kinds: UniProtKinds,
    pub settings: BucketSettings,
}

/// What one bucketization run produced.
#[derive(Debug, Clone)]
pub struct BucketRun {
    pub counts: BucketCounts,
    pub report_rows: usize,
    pub saved: usize,
}

impl BucketContext {
    /// Load and index both catalogs and the SwissProt/TrEMBL lists.
    pub fn load(inputs: &BucketInputs, settings: BucketSettings) -> Result<Self, PipelineError> {
        let options = LoadOptions {
            separator: settings.separator,
            ..LoadOptions::default()
        };
        let mut mgi = TableDataset::load_path("mgi", mgi_schema()?, &inputs.mgi, options)?;
        let mut uniprot =
            TableDataset::load_path("uniprot", uniprot_schema()?, &inputs.uniprot, options)?;
        mgi.add_index(&JOIN_FIELDS)?;
        uniprot.add_index(&JOIN_FIELDS)?;
        tracing::info!(mgi = mgi.len(), uniprot = uniprot.len(), "catalogs loaded");

        let kinds = UniProtKinds::load(&inputs.swissprot, &inputs.trembl)?;
        Ok(Self {
            mgi,
            uniprot,
            kinds,
            settings,
        })
    }

    /// Bucketize, write the six bucket files and the association report.
    pub fn run(&self) -> Result<BucketRun, PipelineError> {
        let mut bucketizer = Bucketizer::new(&self.mgi, &JOIN_FIELDS, &self.uniprot, &JOIN_FIELDS)?;
        bucketizer.run();
        let counts = bucketizer.counts()?;
        for label in BucketLabel::ALL {
            if let Some(count) = counts.get(label) {
                tracing::info!("{} Bucket: {}", label.ratio(), count.headline());
            }
        }

        let saved = if self.settings.save_previous {
            save_previous(&self.settings.dir, &self.settings.prefix)?
        } else {
            0
        };

        let reporter = BucketReporter::new(&bucketizer, &MGI_PROJECTION, &UNIPROT_PROJECTION)?
            .with_summary(&MGI_SUMMARY_PROJECTION, &UNIPROT_PROJECTION)?;
        reporter.write_all(&self.settings.dir, &self.settings.prefix)?;

        let rows = build_rows(&bucketizer, &self.kinds)?;
        write_report(&self.settings.report, self.settings.assoc_schema, &rows)?;
        tracing::info!(
            rows = rows.len(),
            path = %self.settings.report.display(),
            "association report written"
        );

        Ok(BucketRun {
            counts,
            report_rows: rows.len(),
            saved,
        })
    }
}
