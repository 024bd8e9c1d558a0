//! Pipeline error kinds.
//!
//! Every failure is fatal at the pipeline level. Callers and tests match on
//! [`PipelineError::code`] rather than on message text.

pub mod codes;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub use codes::ErrorCode;

#[derive(Debug)]
pub enum PipelineError {
    /// One or more required settings were unset or empty.
    Config { missing: Vec<&'static str> },
    Io { path: PathBuf, source: io::Error },
    Encoding { path: PathBuf },
    MalformedRecord {
        dataset: String,
        line: u64,
        expected: usize,
        found: usize,
    },
    UnknownField { field: String },
    DuplicateField { field: String },
    NoSuchIndex { field: String },
    JoinKeys { left: usize, right: usize },
    NotRun,
    UniProtParse {
        path: PathBuf,
        record: u64,
        line: u64,
    },
    AssocSchema { path: PathBuf, header: String },
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::Config { .. } => ErrorCode::Config,
            PipelineError::Io { .. } => ErrorCode::Io,
            PipelineError::Encoding { .. } => ErrorCode::Encoding,
            PipelineError::MalformedRecord { .. } => ErrorCode::MalformedRecord,
            PipelineError::UnknownField { .. } => ErrorCode::UnknownField,
            PipelineError::DuplicateField { .. } => ErrorCode::DuplicateField,
            PipelineError::NoSuchIndex { .. } => ErrorCode::NoSuchIndex,
            PipelineError::JoinKeys { .. } => ErrorCode::JoinKeys,
            PipelineError::NotRun => ErrorCode::NotRun,
            PipelineError::UniProtParse { .. } => ErrorCode::UniProtParse,
            PipelineError::AssocSchema { .. } => ErrorCode::AssocSchema,
        }
    }

    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        PipelineError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        PipelineError::io(path, io::Error::from(source))
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config { missing } => {
                for (idx, variable) in missing.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "Environment variable not set: {variable}")?;
                }
                Ok(())
            }
            PipelineError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            PipelineError::Encoding { path } => {
                write!(f, "{}: not UTF-8 text", path.display())
            }
            PipelineError::MalformedRecord {
                dataset,
                line,
                expected,
                found,
            } => write!(
                f,
                "{dataset}: line {line} has {found} fields, expected at least {expected}"
            ),
            PipelineError::UnknownField { field } => write!(f, "unknown field \"{field}\""),
            PipelineError::DuplicateField { field } => {
                write!(f, "field \"{field}\" appears twice in the schema")
            }
            PipelineError::NoSuchIndex { field } => {
                write!(f, "no index on field \"{field}\"")
            }
            PipelineError::JoinKeys { left, right } => write!(
                f,
                "join key lists must be non-empty and the same length (left={left}, right={right})"
            ),
            PipelineError::NotRun => f.write_str("bucketizer has not been run"),
            PipelineError::UniProtParse { path, record, line } => write!(
                f,
                "{}: record {record} ending at line {line} has no AC line",
                path.display()
            ),
            PipelineError::AssocSchema { path, header } => write!(
                f,
                "{}: unrecognized association report header \"{header}\"",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_lists_every_missing_variable() {
        let err = PipelineError::Config {
            missing: vec!["MGI_ACC_ASSOC_FILE", "BUCKETDIR"],
        };
        assert_eq!(err.code(), ErrorCode::Config);
        assert_eq!(
            err.to_string(),
            "Environment variable not set: MGI_ACC_ASSOC_FILE\nEnvironment variable not set: BUCKETDIR"
        );
    }

    #[test]
    fn io_error_names_the_path() {
        let err = PipelineError::io(
            "/tmp/missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.code(), ErrorCode::Io);
        assert!(err.to_string().starts_with("/tmp/missing.txt: "));
    }
}
