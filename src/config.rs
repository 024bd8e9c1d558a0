//! Required settings.
//!
//! Every subcommand flag is backed by an environment variable. Values that
//! a step cannot run without are collected here so that a single
//! `E_CONFIG` error names all of them before any file is touched.

use std::path::{Path, PathBuf};

use crate::cli::args::{
    AnnotationsArgs, BucketDiffArgs, BucketFilesArgs, BucketsArgs, OverrideQcArgs,
    UniprotAssocArgs,
};
use crate::context::{BucketInputs, BucketSettings};
use crate::error::PipelineError;
use crate::report::{AnnotStamp, GLYGEN_EVIDENCE};

#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path, or an empty path after recording `variable` as missing.
    pub fn path(&mut self, variable: &'static str, value: Option<&Path>) -> PathBuf {
        match value.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => path.to_path_buf(),
            None => {
                self.missing.push(variable);
                PathBuf::new()
            }
        }
    }

    pub fn text(&mut self, variable: &'static str, value: Option<&str>) -> String {
        match value.map(str::trim).filter(|text| !text.is_empty()) {
            Some(text) => text.to_string(),
            None => {
                self.missing.push(variable);
                String::new()
            }
        }
    }

    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn finish(self) -> Result<(), PipelineError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Config {
                missing: self.missing,
            })
        }
    }
}

/// Both values of an optional pair, or neither.
///
/// Setting only one records the other as missing.
pub fn optional_pair(
    required: &mut Required,
    first: (&'static str, Option<&Path>),
    second: (&'static str, Option<&Path>),
) -> Option<(PathBuf, PathBuf)> {
    let present = |value: Option<&Path>| value.is_some_and(|path| !path.as_os_str().is_empty());
    if !present(first.1) && !present(second.1) {
        return None;
    }
    let a = required.path(first.0, first.1);
    let b = required.path(second.0, second.1);
    Some((a, b))
}

/// Settings of the `uniprot-assoc` step.
#[derive(Debug, Clone)]
pub struct UniprotAssocConfig {
    pub input: PathBuf,
    pub assoc: PathBuf,
    pub swissprot: PathBuf,
    pub trembl: PathBuf,
}

impl UniprotAssocConfig {
    pub fn resolve(args: &UniprotAssocArgs) -> Result<Self, PipelineError> {
        let mut required = Required::new();
        let config = Self {
            input: required.path("INPUTFILE", args.input.as_deref()),
            assoc: required.path("UNIPROT_ACC_ASSOC_FILE", args.uniprot_assoc.as_deref()),
            swissprot: required.path("UNIPROT_SP_ASSOC_FILE", args.swissprot.as_deref()),
            trembl: required.path("UNIPROT_TR_ASSOC_FILE", args.trembl.as_deref()),
        };
        required.finish()?;
        Ok(config)
    }
}

/// Settings of the `buckets` step.
#[derive(Debug, Clone)]
pub struct BucketsConfig {
    pub inputs: BucketInputs,
    pub settings: BucketSettings,
}

impl BucketsConfig {
    pub fn resolve(args: &BucketsArgs) -> Result<Self, PipelineError> {
        let mut required = Required::new();
        let inputs = BucketInputs {
            mgi: required.path("MGI_ACC_ASSOC_FILE", args.mgi_assoc.as_deref()),
            uniprot: required.path("UNIPROT_ACC_ASSOC_FILE", args.uniprot_assoc.as_deref()),
            swissprot: required.path("UNIPROT_SP_ASSOC_FILE", args.swissprot.as_deref()),
            trembl: required.path("UNIPROT_TR_ASSOC_FILE", args.trembl.as_deref()),
        };
        let report = required.path("MGI_UNIPROT_LOAD_FILE", args.report.as_deref());
        let (dir, prefix) = bucket_files(&args.buckets);
        required.finish()?;
        Ok(Self {
            inputs,
            settings: BucketSettings {
                dir,
                prefix,
                report,
                assoc_schema: args.assoc_schema,
                separator: args.separator.separator,
                save_previous: args.save_previous,
            },
        })
    }
}

/// Settings of the `bucket-diff` step.
#[derive(Debug, Clone)]
pub struct BucketDiffConfig {
    pub dir: PathBuf,
    pub prefix: String,
    pub gene_prefix: String,
}

impl BucketDiffConfig {
    pub fn resolve(args: &BucketDiffArgs) -> Result<Self, PipelineError> {
        let (dir, prefix) = bucket_files(&args.buckets);
        Ok(Self {
            dir,
            prefix,
            gene_prefix: args.gene_prefix.clone(),
        })
    }
}

/// Output path and stamp of the optional EC/GO annotation file.
#[derive(Debug, Clone)]
pub struct EcGoConfig {
    pub ec2go: PathBuf,
    pub output: PathBuf,
    pub stamp: AnnotStamp,
}

/// Paths and stamp of the optional GlyGen annotation file.
#[derive(Debug, Clone)]
pub struct GlyGenConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub errors: PathBuf,
    pub stamp: AnnotStamp,
}

/// Settings of the `annotations` step.
#[derive(Debug, Clone)]
pub struct AnnotationsConfig {
    pub report: PathBuf,
    pub uniprot: PathBuf,
    pub separator: char,
    pub interpro_out: PathBuf,
    pub interpro_stamp: AnnotStamp,
    pub ec_go: Option<EcGoConfig>,
    pub glygen: Option<GlyGenConfig>,
}

impl AnnotationsConfig {
    pub fn resolve(args: &AnnotationsArgs) -> Result<Self, PipelineError> {
        let mut required = Required::new();
        let report = required.path("MGI_UNIPROT_LOAD_FILE", args.report.as_deref());
        let uniprot = required.path("UNIPROT_ACC_ASSOC_FILE", args.uniprot_assoc.as_deref());
        let interpro_out = required.path("MARKER_IP_ASSOC_FILE", args.interpro_out.as_deref());
        let interpro_ref = required.text("MARKER_IP_ANNOT_REF", args.interpro_ref.as_deref());
        let evidence = required.text("ANNOT_EVIDENCECODE", args.evidence.as_deref());
        let editor = required.text("ANNOT_EDITOR", args.editor.as_deref());
        let date = required.text("ANNOT_DATE", args.date.as_deref());

        let ec_go = optional_pair(
            &mut required,
            ("EC2GOFILE", args.ec2go.as_deref()),
            ("GO_EC_ASSOC_FILE", args.ec_go_out.as_deref()),
        )
        .map(|(ec2go, output)| {
            let reference = required.text("GO_ECANNOTREF", args.ec_go_ref.as_deref());
            EcGoConfig {
                ec2go,
                output,
                stamp: AnnotStamp {
                    reference,
                    evidence: evidence.clone(),
                    editor: editor.clone(),
                    date: date.clone(),
                },
            }
        });
        let glygen = optional_pair(
            &mut required,
            ("UNIPROT_GG_ASSOC_FILE", args.glygen.as_deref()),
            ("MARKER_GG_ASSOC_FILE", args.glygen_out.as_deref()),
        )
        .map(|(input, output)| {
            let errors = required.path("MARKER_GG_ASSOC_ERR_FILE", args.glygen_err.as_deref());
            let reference = required.text("MARKER_GG_ANNOT_REF", args.glygen_ref.as_deref());
            GlyGenConfig {
                input,
                output,
                errors,
                stamp: AnnotStamp {
                    reference,
                    evidence: GLYGEN_EVIDENCE.to_string(),
                    editor: editor.clone(),
                    date: date.clone(),
                },
            }
        });
        required.finish()?;

        Ok(Self {
            report,
            uniprot,
            separator: args.separator.separator,
            interpro_out,
            interpro_stamp: AnnotStamp {
                reference: interpro_ref,
                evidence,
                editor,
                date,
            },
            ec_go,
            glygen,
        })
    }
}

/// Settings of the `override-qc` step.
#[derive(Debug, Clone)]
pub struct OverrideQcConfig {
    pub input: PathBuf,
    pub qc_report: PathBuf,
    pub to_load: PathBuf,
    pub mgi: PathBuf,
    pub report: PathBuf,
}

impl OverrideQcConfig {
    pub fn resolve(args: &OverrideQcArgs) -> Result<Self, PipelineError> {
        let mut required = Required::new();
        let config = Self {
            input: required.path("QC_INPUT_FILE", args.input.as_deref()),
            qc_report: required.path("QC_RPT", args.qc_report.as_deref()),
            to_load: required.path("INPUT_FILE_TOLOAD", args.to_load.as_deref()),
            mgi: required.path("MGI_ACC_ASSOC_FILE", args.mgi_assoc.as_deref()),
            report: required.path("MGI_UNIPROT_LOAD_FILE", args.report.as_deref()),
        };
        required.finish()?;
        Ok(config)
    }
}

/// Bucket directory and prefix; empty values fall back to `.` and `bucket`.
fn bucket_files(args: &BucketFilesArgs) -> (PathBuf, String) {
    let dir = if args.bucket_dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        args.bucket_dir.clone()
    };
    let prefix = match args.bucket_prefix.trim() {
        "" => "bucket".to_string(),
        prefix => prefix.to_string(),
    };
    (dir, prefix)
}
