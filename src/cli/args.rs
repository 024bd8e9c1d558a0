use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use super::exit::Step;
use super::separator::parse_separator_arg;
use crate::report::AssocSchema;

const DEFAULT_BUCKET_DIR: &str = ".";
const DEFAULT_BUCKET_PREFIX: &str = "bucket";
const DEFAULT_GENE_PREFIX: &str = "MGI:";

/// Command-line arguments. Every option can also be set through the
/// environment variable named in its help text.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "uniprotload",
    version,
    about = "Bucketize gene-catalog and UniProt associations and write the load files."
)]
pub struct Args {
    /// Emit a JSON run summary (single object).
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse a UniProt flat file into the association file and id lists.
    UniprotAssoc(UniprotAssocArgs),
    /// Bucketize the catalogs; write bucket files and the association report.
    Buckets(BucketsArgs),
    /// Compare the saved and current bucket files.
    BucketDiff(BucketDiffArgs),
    /// Write marker/InterPro (and optionally EC/GO) annotation files.
    Annotations(AnnotationsArgs),
    /// Check a curator override file.
    OverrideQc(OverrideQcArgs),
}

impl Command {
    pub fn step(&self) -> Step {
        match self {
            Command::UniprotAssoc(_) => Step::UniprotAssoc,
            Command::Buckets(_) => Step::Buckets,
            Command::BucketDiff(_) => Step::BucketDiff,
            Command::Annotations(_) => Step::Annotations,
            Command::OverrideQc(_) => Step::OverrideQc,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UniprotAssocArgs {
    /// UniProt flat file.
    #[arg(long, env = "INPUTFILE", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Protein association file to write.
    #[arg(long, env = "UNIPROT_ACC_ASSOC_FILE", value_name = "PATH")]
    pub uniprot_assoc: Option<PathBuf>,

    /// SwissProt id list to write.
    #[arg(long, env = "UNIPROT_SP_ASSOC_FILE", value_name = "PATH")]
    pub swissprot: Option<PathBuf>,

    /// TrEMBL id list to write.
    #[arg(long, env = "UNIPROT_TR_ASSOC_FILE", value_name = "PATH")]
    pub trembl: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BucketsArgs {
    /// Gene catalog association file.
    #[arg(long, env = "MGI_ACC_ASSOC_FILE", value_name = "PATH")]
    pub mgi_assoc: Option<PathBuf>,

    /// Protein association file.
    #[arg(long, env = "UNIPROT_ACC_ASSOC_FILE", value_name = "PATH")]
    pub uniprot_assoc: Option<PathBuf>,

    /// SwissProt id list.
    #[arg(long, env = "UNIPROT_SP_ASSOC_FILE", value_name = "PATH")]
    pub swissprot: Option<PathBuf>,

    /// TrEMBL id list.
    #[arg(long, env = "UNIPROT_TR_ASSOC_FILE", value_name = "PATH")]
    pub trembl: Option<PathBuf>,

    #[command(flatten)]
    pub buckets: BucketFilesArgs,

    /// Association report to write.
    #[arg(long, env = "MGI_UNIPROT_LOAD_FILE", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Column set of the association report.
    #[arg(long, env = "ASSOC_SCHEMA", value_enum, default_value_t = AssocSchema::V2)]
    pub assoc_schema: AssocSchema,

    #[command(flatten)]
    pub separator: SeparatorArgs,

    /// Rename the current bucket files to `.save` before writing new ones.
    #[arg(long, env = "SAVE_PREVIOUS_BUCKETS")]
    pub save_previous: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BucketDiffArgs {
    #[command(flatten)]
    pub buckets: BucketFilesArgs,

    /// Leading-id prefix that marks a gene-catalog row.
    #[arg(long, env = "GENE_ID_PREFIX", default_value = DEFAULT_GENE_PREFIX)]
    pub gene_prefix: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AnnotationsArgs {
    /// Association report to read.
    #[arg(long, env = "MGI_UNIPROT_LOAD_FILE", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Protein association file.
    #[arg(long, env = "UNIPROT_ACC_ASSOC_FILE", value_name = "PATH")]
    pub uniprot_assoc: Option<PathBuf>,

    /// Marker/InterPro annotation file to write.
    #[arg(long, env = "MARKER_IP_ASSOC_FILE", value_name = "PATH")]
    pub interpro_out: Option<PathBuf>,

    /// Reference for InterPro annotations.
    #[arg(long, env = "MARKER_IP_ANNOT_REF", value_name = "J:NNNNN")]
    pub interpro_ref: Option<String>,

    #[arg(long, env = "ANNOT_EVIDENCECODE", value_name = "CODE")]
    pub evidence: Option<String>,

    #[arg(long, env = "ANNOT_EDITOR", value_name = "LOGIN")]
    pub editor: Option<String>,

    #[arg(long, env = "ANNOT_DATE", value_name = "DATE")]
    pub date: Option<String>,

    /// EC to GO translation file; enables the EC/GO annotation file.
    #[arg(long, env = "EC2GOFILE", value_name = "PATH")]
    pub ec2go: Option<PathBuf>,

    /// EC/GO annotation file to write.
    #[arg(long, env = "GO_EC_ASSOC_FILE", value_name = "PATH")]
    pub ec_go_out: Option<PathBuf>,

    /// Reference for EC/GO annotations.
    #[arg(long, env = "GO_ECANNOTREF", value_name = "J:NNNNN")]
    pub ec_go_ref: Option<String>,

    /// GlyGen UniProt/marker file; enables the GlyGen annotation file.
    #[arg(long, env = "UNIPROT_GG_ASSOC_FILE", value_name = "PATH")]
    pub glygen: Option<PathBuf>,

    /// GlyGen annotation file to write.
    #[arg(long, env = "MARKER_GG_ASSOC_FILE", value_name = "PATH")]
    pub glygen_out: Option<PathBuf>,

    /// GlyGen pairs missing from the association report.
    #[arg(long, env = "MARKER_GG_ASSOC_ERR_FILE", value_name = "PATH")]
    pub glygen_err: Option<PathBuf>,

    #[arg(long, env = "MARKER_GG_ANNOT_REF", value_name = "J:NNNNN")]
    pub glygen_ref: Option<String>,

    #[command(flatten)]
    pub separator: SeparatorArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OverrideQcArgs {
    /// Curator override file.
    #[arg(value_name = "OVERRIDE_FILE", env = "QC_INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// QC report to write.
    #[arg(long, env = "QC_RPT", value_name = "PATH")]
    pub qc_report: Option<PathBuf>,

    /// Rows that passed QC.
    #[arg(long, env = "INPUT_FILE_TOLOAD", value_name = "PATH")]
    pub to_load: Option<PathBuf>,

    /// Gene catalog association file (known markers).
    #[arg(long, env = "MGI_ACC_ASSOC_FILE", value_name = "PATH")]
    pub mgi_assoc: Option<PathBuf>,

    /// Association report (existing associations).
    #[arg(long, env = "MGI_UNIPROT_LOAD_FILE", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Location and naming of the bucket files.
#[derive(Debug, Clone, ClapArgs)]
pub struct BucketFilesArgs {
    #[arg(long, env = "BUCKETDIR", value_name = "DIR", default_value = DEFAULT_BUCKET_DIR)]
    pub bucket_dir: PathBuf,

    #[arg(long, env = "BUCKET_PREFIX", default_value = DEFAULT_BUCKET_PREFIX)]
    pub bucket_prefix: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SeparatorArgs {
    /// Separator inside multi-valued cells (comma/semicolon/pipe/caret/space,
    /// 0xNN, or a single ASCII character).
    #[arg(
        long,
        env = "MULTI_VALUE_SEPARATOR",
        value_name = "SEP",
        default_value = "comma",
        value_parser = parse_separator
    )]
    pub separator: char,
}

fn parse_separator(raw: &str) -> Result<char, String> {
    parse_separator_arg(raw).map_err(|err| err.to_string())
}
