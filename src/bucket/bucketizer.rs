//! Cardinality partition of two datasets over shared join keys.

use serde::Serialize;

use super::graph::{Adjacency, Component, JoinField};
use super::label::BucketLabel;
use crate::dataset::{FieldId, RowKey, TableDataset};
use crate::error::PipelineError;

/// The six buckets, each in component discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub zero_one: Vec<RowKey>,
    pub one_zero: Vec<RowKey>,
    pub one_one: Vec<(RowKey, RowKey)>,
    pub one_n: Vec<(RowKey, Vec<RowKey>)>,
    pub n_one: Vec<(Vec<RowKey>, RowKey)>,
    pub n_m: Vec<(Vec<RowKey>, Vec<RowKey>)>,
}

impl Partition {
    fn from_components(components: Vec<Component>) -> Self {
        let mut partition = Partition::default();
        for Component { left, right } in components {
            let Some(label) = BucketLabel::from_counts(left.len(), right.len()) else {
                continue;
            };
            match label {
                BucketLabel::ZeroOne => partition.zero_one.push(right[0]),
                BucketLabel::OneZero => partition.one_zero.push(left[0]),
                BucketLabel::OneOne => partition.one_one.push((left[0], right[0])),
                BucketLabel::OneMany => partition.one_n.push((left[0], right)),
                BucketLabel::ManyOne => partition.n_one.push((left, right[0])),
                BucketLabel::ManyMany => partition.n_m.push((left, right)),
            }
        }
        partition
    }

    /// Number of components (groups) in a bucket.
    pub fn groups(&self, label: BucketLabel) -> usize {
        match label {
            BucketLabel::ZeroOne => self.zero_one.len(),
            BucketLabel::OneZero => self.one_zero.len(),
            BucketLabel::OneOne => self.one_one.len(),
            BucketLabel::OneMany => self.one_n.len(),
            BucketLabel::ManyOne => self.n_one.len(),
            BucketLabel::ManyMany => self.n_m.len(),
        }
    }

    /// Left and right record totals in a bucket.
    pub fn records(&self, label: BucketLabel) -> (usize, usize) {
        match label {
            BucketLabel::ZeroOne => (0, self.zero_one.len()),
            BucketLabel::OneZero => (self.one_zero.len(), 0),
            BucketLabel::OneOne => (self.one_one.len(), self.one_one.len()),
            BucketLabel::OneMany => (
                self.one_n.len(),
                self.one_n.iter().map(|(_, right)| right.len()).sum(),
            ),
            BucketLabel::ManyOne => (
                self.n_one.iter().map(|(left, _)| left.len()).sum(),
                self.n_one.len(),
            ),
            BucketLabel::ManyMany => (
                self.n_m.iter().map(|(left, _)| left.len()).sum(),
                self.n_m.iter().map(|(_, right)| right.len()).sum(),
            ),
        }
    }
}

/// Per-bucket sizes for logs and the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub label: BucketLabel,
    pub groups: usize,
    pub left: usize,
    pub right: usize,
}

impl BucketCount {
    /// The number reported on a `1:N Bucket: n` log line: records on the
    /// many side for 1:N and N:1, groups otherwise.
    pub fn headline(&self) -> usize {
        match self.label {
            BucketLabel::OneMany => self.right,
            BucketLabel::ManyOne => self.left,
            _ => self.groups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub left_records: usize,
    pub right_records: usize,
    pub edges: usize,
    pub buckets: Vec<BucketCount>,
}

impl BucketCounts {
    pub fn get(&self, label: BucketLabel) -> Option<&BucketCount> {
        self.buckets.iter().find(|count| count.label == label)
    }
}

/// Connected-components bucketizer over two indexed datasets.
///
/// The n-th left join field is matched against the n-th right join field;
/// every right join field must be indexed before construction.
#[derive(Debug)]
pub struct Bucketizer<'a> {
    left: &'a TableDataset,
    right: &'a TableDataset,
    joins: Vec<JoinField<'a>>,
    state: Option<(Partition, usize)>,
}

impl<'a> Bucketizer<'a> {
    pub fn new<S: AsRef<str>>(
        left: &'a TableDataset,
        left_fields: &[S],
        right: &'a TableDataset,
        right_fields: &[S],
    ) -> Result<Self, PipelineError> {
        if left_fields.is_empty() || left_fields.len() != right_fields.len() {
            return Err(PipelineError::JoinKeys {
                left: left_fields.len(),
                right: right_fields.len(),
            });
        }

        let left_ids: Vec<FieldId> = left.schema().fields(left_fields)?;
        let right_ids: Vec<FieldId> = right.schema().fields(right_fields)?;
        let joins = left_ids
            .into_iter()
            .zip(right_ids)
            .map(|(left_field, right_field)| {
                Ok(JoinField {
                    left: left_field,
                    right: right.index(right_field)?,
                })
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        Ok(Self {
            left,
            right,
            joins,
            state: None,
        })
    }

    /// Compute the partition. Running again recomputes the same result.
    pub fn run(&mut self) {
        let graph = Adjacency::build(self.left, &self.joins, self.right.len());
        let edges = graph.edge_count();
        let partition = Partition::from_components(graph.components());
        tracing::debug!(
            left = self.left.len(),
            right = self.right.len(),
            edges,
            "bucketizer run complete"
        );
        self.state = Some((partition, edges));
    }

    pub fn left(&self) -> &'a TableDataset {
        self.left
    }

    pub fn right(&self) -> &'a TableDataset {
        self.right
    }

    pub fn partition(&self) -> Result<&Partition, PipelineError> {
        self.state
            .as_ref()
            .map(|(partition, _)| partition)
            .ok_or(PipelineError::NotRun)
    }

    pub fn get_0_1(&self) -> Result<&[RowKey], PipelineError> {
        Ok(&self.partition()?.zero_one)
    }

    pub fn get_1_0(&self) -> Result<&[RowKey], PipelineError> {
        Ok(&self.partition()?.one_zero)
    }

    pub fn get_1_1(&self) -> Result<&[(RowKey, RowKey)], PipelineError> {
        Ok(&self.partition()?.one_one)
    }

    pub fn get_1_n(&self) -> Result<&[(RowKey, Vec<RowKey>)], PipelineError> {
        Ok(&self.partition()?.one_n)
    }

    pub fn get_n_1(&self) -> Result<&[(Vec<RowKey>, RowKey)], PipelineError> {
        Ok(&self.partition()?.n_one)
    }

    pub fn get_n_m(&self) -> Result<&[(Vec<RowKey>, Vec<RowKey>)], PipelineError> {
        Ok(&self.partition()?.n_m)
    }

    pub fn counts(&self) -> Result<BucketCounts, PipelineError> {
        let (partition, edges) = self.state.as_ref().ok_or(PipelineError::NotRun)?;
        let buckets = BucketLabel::ALL
            .into_iter()
            .map(|label| {
                let (left, right) = partition.records(label);
                BucketCount {
                    label,
                    groups: partition.groups(label),
                    left,
                    right,
                }
            })
            .collect();
        Ok(BucketCounts {
            left_records: self.left.len(),
            right_records: self.right.len(),
            edges: *edges,
            buckets,
        })
    }
}
