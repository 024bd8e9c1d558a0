//! Bucket diff: compare two generations of bucket files.

pub mod bucket_diff;
pub mod output;
pub mod snapshot;

pub use bucket_diff::{BucketDelta, DeltaCount, DiffEntry, diff_snapshots};
pub use snapshot::{BucketSnapshot, IdClassifier, Labels, PrefixClassifier};
