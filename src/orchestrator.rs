//! Pipeline orchestration: resolve settings, run one step, summarize.

use crate::catalog::uniprot_schema;
use crate::cli::args::{
    AnnotationsArgs, Args, BucketDiffArgs, BucketsArgs, Command, OverrideQcArgs, UniprotAssocArgs,
};
use crate::cli::exit::{Outcome, OutputMode};
use crate::config::{
    AnnotationsConfig, BucketDiffConfig, BucketsConfig, OverrideQcConfig, UniprotAssocConfig,
};
use crate::context::BucketContext;
use crate::dataset::{LoadOptions, TableDataset};
use crate::diff::output::write_deltas;
use crate::diff::snapshot::SAVE_SUFFIX;
use crate::diff::{BucketSnapshot, Labels, PrefixClassifier, diff_snapshots};
use crate::error::PipelineError;
use crate::output::human::{render_failure, render_summary};
use crate::output::json::{Counts, FileEntry, JsonOutput, render_json};
use crate::qc::{KnownAssociations, QcOutputs, Severity, run_override_qc};
use crate::report::{
    AnnotCounts, Ec2Go, GlyGenCounts, GlyGenLinks, ec_go_rows, glygen_rows, interpro_rows,
    read_report, write_annotations, write_glygen_errors,
};
use crate::uniprot::{AssocOutputs, write_uniprot_assoc};

pub struct PipelineResult {
    pub outcome: Outcome,
    pub output: String,
}

/// What a finished step reports.
struct StepReport {
    outcome: Outcome,
    files: Vec<FileEntry>,
    counts: Counts,
}

impl StepReport {
    fn success(files: Vec<FileEntry>, counts: Counts) -> Self {
        Self {
            outcome: Outcome::Success,
            files,
            counts,
        }
    }
}

pub fn run(args: &Args) -> Result<PipelineResult, serde_json::Error> {
    let step = args.command.step();
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    tracing::info!(step = step.as_str(), "starting");

    let result = match &args.command {
        Command::UniprotAssoc(step_args) => uniprot_assoc(step_args),
        Command::Buckets(step_args) => buckets(step_args),
        Command::BucketDiff(step_args) => bucket_diff(step_args),
        Command::Annotations(step_args) => annotations(step_args),
        Command::OverrideQc(step_args) => override_qc(step_args),
    };

    match result {
        Ok(report) => {
            let output = JsonOutput::completed(step, report.outcome, report.files, report.counts);
            let text = match mode {
                OutputMode::Json => render_json(&output)?,
                OutputMode::Human => render_summary(&output).join("\n"),
            };
            Ok(PipelineResult {
                outcome: report.outcome,
                output: format!("{text}\n"),
            })
        }
        Err(err) => {
            tracing::debug!(code = err.code().as_str(), "step failed");
            let text = match mode {
                OutputMode::Json => render_json(&JsonOutput::failure(step, &err))?,
                OutputMode::Human => render_failure(step, &err).join("\n"),
            };
            Ok(PipelineResult {
                outcome: Outcome::Failure,
                output: format!("{text}\n"),
            })
        }
    }
}

fn uniprot_assoc(args: &UniprotAssocArgs) -> Result<StepReport, PipelineError> {
    let config = UniprotAssocConfig::resolve(args)?;
    let counts = write_uniprot_assoc(
        &config.input,
        AssocOutputs {
            assoc: &config.assoc,
            swissprot: &config.swissprot,
            trembl: &config.trembl,
        },
    )?;
    tracing::info!(
        records = counts.records,
        swissprot = counts.swissprot,
        trembl = counts.trembl,
        "UniProt association file written"
    );

    Ok(StepReport::success(
        vec![
            FileEntry::new("input", &config.input),
            FileEntry::new("uniprot_assoc", &config.assoc),
            FileEntry::new("swissprot", &config.swissprot),
            FileEntry::new("trembl", &config.trembl),
        ],
        Counts {
            uniprot: Some(counts),
            ..Counts::default()
        },
    ))
}

fn buckets(args: &BucketsArgs) -> Result<StepReport, PipelineError> {
    let config = BucketsConfig::resolve(args)?;
    let files = vec![
        FileEntry::new("mgi_assoc", &config.inputs.mgi),
        FileEntry::new("uniprot_assoc", &config.inputs.uniprot),
        FileEntry::new("bucket_dir", &config.settings.dir),
        FileEntry::new("report", &config.settings.report),
    ];
    let context = BucketContext::load(&config.inputs, config.settings)?;
    let run = context.run()?;
    if run.saved > 0 {
        tracing::info!(files = run.saved, "previous bucket files saved");
    }

    Ok(StepReport::success(
        files,
        Counts {
            buckets: Some(run.counts),
            report_rows: Some(run.report_rows),
            ..Counts::default()
        },
    ))
}

fn bucket_diff(args: &BucketDiffArgs) -> Result<StepReport, PipelineError> {
    let config = BucketDiffConfig::resolve(args)?;
    let classifier = PrefixClassifier::new(config.gene_prefix.as_str());
    let mut labels = Labels::default();
    let after = BucketSnapshot::load(&config.dir, &config.prefix, "", &classifier, &mut labels)?;
    let before = BucketSnapshot::load(
        &config.dir,
        &config.prefix,
        SAVE_SUFFIX,
        &classifier,
        &mut labels,
    )?;

    let deltas = diff_snapshots(&before, &after, &labels);
    write_deltas(&config.dir, &config.prefix, &deltas)?;
    for delta in &deltas {
        tracing::info!(
            bucket = delta.bucket.as_str(),
            lost = delta.lost.len(),
            gained = delta.gained.len(),
            "bucket diff"
        );
    }

    Ok(StepReport::success(
        vec![FileEntry::new("bucket_dir", &config.dir)],
        Counts {
            deltas: Some(deltas.iter().map(|delta| delta.count()).collect()),
            ..Counts::default()
        },
    ))
}

fn annotations(args: &AnnotationsArgs) -> Result<StepReport, PipelineError> {
    let config = AnnotationsConfig::resolve(args)?;
    let (_, report) = read_report(&config.report)?;
    let options = LoadOptions {
        separator: config.separator,
        ..LoadOptions::default()
    };
    let uniprot = TableDataset::load_path("uniprot", uniprot_schema()?, &config.uniprot, options)?;

    let interpro = interpro_rows(&report, &uniprot)?;
    write_annotations(&config.interpro_out, &interpro, &config.interpro_stamp)?;
    tracing::info!(rows = interpro.len(), "InterPro annotation file written");

    let mut files = vec![
        FileEntry::new("report", &config.report),
        FileEntry::new("uniprot_assoc", &config.uniprot),
        FileEntry::new("interpro_annot", &config.interpro_out),
    ];
    let ec_go = match &config.ec_go {
        Some(ec) => {
            let ec2go = Ec2Go::load(&ec.ec2go)?;
            if ec2go.is_empty() {
                tracing::warn!(path = %ec.ec2go.display(), "no EC to GO mappings found");
            }
            let rows = ec_go_rows(&report, &ec2go);
            write_annotations(&ec.output, &rows, &ec.stamp)?;
            tracing::info!(rows = rows.len(), "EC/GO annotation file written");
            files.push(FileEntry::new("ec_go_annot", &ec.output));
            Some(rows.len())
        }
        None => None,
    };
    let glygen = match &config.glygen {
        Some(gg) => {
            let links = GlyGenLinks::load(&gg.input)?;
            let check = glygen_rows(&report, &links);
            write_annotations(&gg.output, &check.rows, &gg.stamp)?;
            write_glygen_errors(&gg.errors, &check.mismatches, &gg.stamp.date)?;
            if !check.mismatches.is_empty() {
                tracing::warn!(
                    mismatches = check.mismatches.len(),
                    path = %gg.errors.display(),
                    "GlyGen pairs not in the association report"
                );
            }
            tracing::info!(rows = check.rows.len(), "GlyGen annotation file written");
            files.push(FileEntry::new("glygen_annot", &gg.output));
            files.push(FileEntry::new("glygen_errors", &gg.errors));
            Some(GlyGenCounts {
                rows: check.rows.len(),
                mismatches: check.mismatches.len(),
            })
        }
        None => None,
    };

    Ok(StepReport::success(
        files,
        Counts {
            annotations: Some(AnnotCounts {
                markers: report.len(),
                interpro: interpro.len(),
                ec_go,
                glygen,
            }),
            ..Counts::default()
        },
    ))
}

fn override_qc(args: &OverrideQcArgs) -> Result<StepReport, PipelineError> {
    let config = OverrideQcConfig::resolve(args)?;
    let known = KnownAssociations::load(&config.mgi, &config.report)?;
    let outcome = run_override_qc(
        &config.input,
        &known,
        QcOutputs {
            report: &config.qc_report,
            to_load: &config.to_load,
        },
    )?;

    let step_outcome = match outcome.worst() {
        None => Outcome::Success,
        Some(Severity::Fatal) => Outcome::QcFatal,
        Some(_) => Outcome::QcWarnings,
    };
    let mut files = vec![
        FileEntry::new("input", &config.input),
        FileEntry::new("qc_report", &config.qc_report),
    ];
    if step_outcome != Outcome::QcFatal {
        files.push(FileEntry::new("to_load", &config.to_load));
    }

    Ok(StepReport {
        outcome: step_outcome,
        files,
        counts: Counts {
            qc: Some(outcome.summary()),
            ..Counts::default()
        },
    })
}
