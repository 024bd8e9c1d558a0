//! Output files: bucket reports, the association report, annotation loads.

pub mod annot;
pub mod assoc;
pub mod buckets;
pub mod files;

pub use annot::{
    AnnotCounts, AnnotRow, AnnotStamp, Ec2Go, GLYGEN_EVIDENCE, GlyGenCheck, GlyGenCounts,
    GlyGenLinks, ec_go_rows, glygen_rows, interpro_rows, write_annotations, write_glygen_errors,
};
pub use assoc::{AssocRow, AssocSchema, UniProtKinds, build_rows, read_report, write_report};
pub use buckets::BucketReporter;
pub use files::OutputFile;
