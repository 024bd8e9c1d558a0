//! Lost and gained ids per bucket, with migration lookup.

use serde::Serialize;

use super::snapshot::{BucketSnapshot, Labels};
use crate::bucket::BucketLabel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub id: String,
    pub label: String,
    /// The other bucket holding the id: in the current generation for a
    /// loss, in the previous one for a gain.
    pub other: Option<BucketLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketDelta {
    pub bucket: BucketLabel,
    pub lost: Vec<DiffEntry>,
    pub gained: Vec<DiffEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeltaCount {
    pub bucket: BucketLabel,
    pub lost: usize,
    pub gained: usize,
}

impl BucketDelta {
    pub fn count(&self) -> DeltaCount {
        DeltaCount {
            bucket: self.bucket,
            lost: self.lost.len(),
            gained: self.gained.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lost.is_empty() && self.gained.is_empty()
    }
}

/// Compare two generations bucket by bucket; ids come out sorted.
pub fn diff_snapshots(
    before: &BucketSnapshot,
    after: &BucketSnapshot,
    labels: &Labels,
) -> Vec<BucketDelta> {
    BucketLabel::ALL
        .into_iter()
        .map(|bucket| {
            let entry = |id: &String, elsewhere: &BucketSnapshot| DiffEntry {
                id: id.clone(),
                label: labels.get(id).to_string(),
                other: find_other(elsewhere, bucket, id),
            };
            BucketDelta {
                bucket,
                lost: before
                    .members(bucket)
                    .difference(after.members(bucket))
                    .map(|id| entry(id, after))
                    .collect(),
                gained: after
                    .members(bucket)
                    .difference(before.members(bucket))
                    .map(|id| entry(id, before))
                    .collect(),
            }
        })
        .collect()
}

/// Another bucket holding `id`; the latest in file order wins.
fn find_other(snapshot: &BucketSnapshot, bucket: BucketLabel, id: &str) -> Option<BucketLabel> {
    BucketLabel::ALL
        .into_iter()
        .rev()
        .filter(|other| *other != bucket)
        .find(|other| snapshot.contains(*other, id))
}
