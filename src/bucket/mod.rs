//! Bucketization: connected components over shared join keys.

pub mod bucketizer;
pub mod graph;
pub mod label;

pub use bucketizer::{BucketCount, BucketCounts, Bucketizer, Partition};
pub use label::BucketLabel;
