//! JSON run summary.

use serde::Serialize;

use crate::bucket::BucketCounts;
use crate::cli::exit::{Outcome, Step};
use crate::diff::DeltaCount;
use crate::error::PipelineError;
use crate::qc::QcCounts;
use crate::report::AnnotCounts;
use crate::uniprot::UniProtCounts;

pub const VERSION: &str = "uniprotload.v0";

/// A file the step read or wrote, with its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub role: &'static str,
    pub path: String,
}

impl FileEntry {
    pub fn new(role: &'static str, path: &std::path::Path) -> Self {
        Self {
            role,
            path: path.display().to_string(),
        }
    }
}

/// Per-step counts; only the running step's entry is set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Counts {
    pub uniprot: Option<UniProtCounts>,
    pub buckets: Option<BucketCounts>,
    pub report_rows: Option<usize>,
    pub deltas: Option<Vec<DeltaCount>>,
    pub annotations: Option<AnnotCounts>,
    pub qc: Option<QcCounts>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(err: &PipelineError) -> Self {
        Self {
            code: err.code().as_str().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub version: &'static str,
    pub step: Step,
    pub outcome: Outcome,
    pub files: Vec<FileEntry>,
    pub counts: Counts,
    pub error: Option<ErrorBody>,
}

impl JsonOutput {
    pub fn completed(step: Step, outcome: Outcome, files: Vec<FileEntry>, counts: Counts) -> Self {
        Self {
            version: VERSION,
            step,
            outcome,
            files,
            counts,
            error: None,
        }
    }

    pub fn failure(step: Step, err: &PipelineError) -> Self {
        Self {
            version: VERSION,
            step,
            outcome: Outcome::Failure,
            files: Vec::new(),
            counts: Counts::default(),
            error: Some(ErrorBody::new(err)),
        }
    }
}

pub fn render_json(output: &JsonOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{BucketCount, BucketLabel};
    use std::path::Path;

    #[test]
    fn renders_bucket_summary_shape() {
        let counts = Counts {
            buckets: Some(BucketCounts {
                left_records: 2,
                right_records: 3,
                edges: 2,
                buckets: vec![BucketCount {
                    label: BucketLabel::OneMany,
                    groups: 1,
                    left: 1,
                    right: 2,
                }],
            }),
            report_rows: Some(1),
            ..Counts::default()
        };
        let output = JsonOutput::completed(
            Step::Buckets,
            Outcome::Success,
            vec![FileEntry::new("report", Path::new("out/mgi_uniprot.txt"))],
            counts,
        );
        let value = serde_json::to_value(output).expect("json");
        assert_eq!(value["version"], "uniprotload.v0");
        assert_eq!(value["step"], "buckets");
        assert_eq!(value["outcome"], "SUCCESS");
        assert_eq!(value["files"][0]["role"], "report");
        assert_eq!(value["counts"]["buckets"]["buckets"][0]["label"], "1_N");
        assert_eq!(value["counts"]["report_rows"], 1);
        assert!(value["counts"]["qc"].is_null());
        assert!(value["error"].is_null());
    }

    #[test]
    fn renders_failure_with_code() {
        let err = PipelineError::Config {
            missing: vec!["BUCKETDIR"],
        };
        let output = JsonOutput::failure(Step::BucketDiff, &err);
        let value = serde_json::to_value(output).expect("json");
        assert_eq!(value["outcome"], "FAILURE");
        assert_eq!(value["step"], "bucket_diff");
        assert_eq!(value["error"]["code"], "E_CONFIG");
        assert_eq!(
            value["error"]["message"],
            "Environment variable not set: BUCKETDIR"
        );
    }
}
