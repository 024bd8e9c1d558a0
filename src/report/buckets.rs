//! Bucket file formatting.
//!
//! Each file opens with `total number of unique records:  <groups>` and a
//! blank line. Grouped buckets print the single side on the first line of a
//! group and empty cells beneath it; N:N groups pair rows positionally and
//! pad whichever side runs out first.
//!
//! With a summary projection, the 1:1, 1:N and N:1 files also carry a second
//! section after the grouped rows: one line per link with the gene cells
//! first. In 1:N the repeated gene cells are blanked to spaces of the same
//! width; in N:1 only the first gene line carries the protein cells.

use std::path::Path;

use crate::bucket::{BucketLabel, Bucketizer};
use crate::dataset::{FieldId, RowKey, TableDataset};
use crate::error::PipelineError;

use super::files::OutputFile;

pub struct BucketReporter<'b, 'a> {
    bucketizer: &'b Bucketizer<'a>,
    left_fields: Vec<FieldId>,
    right_fields: Vec<FieldId>,
    summary: Option<(Vec<FieldId>, Vec<FieldId>)>,
}

impl<'b, 'a> BucketReporter<'b, 'a> {
    pub fn new<S: AsRef<str>>(
        bucketizer: &'b Bucketizer<'a>,
        left_projection: &[S],
        right_projection: &[S],
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            bucketizer,
            left_fields: bucketizer.left().schema().fields(left_projection)?,
            right_fields: bucketizer.right().schema().fields(right_projection)?,
            summary: None,
        })
    }

    /// Append the summary section using these projections.
    pub fn with_summary<S: AsRef<str>>(
        mut self,
        left_projection: &[S],
        right_projection: &[S],
    ) -> Result<Self, PipelineError> {
        self.summary = Some((
            self.bucketizer.left().schema().fields(left_projection)?,
            self.bucketizer.right().schema().fields(right_projection)?,
        ));
        Ok(self)
    }

    pub fn header(&self, label: BucketLabel) -> Result<String, PipelineError> {
        let groups = self.bucketizer.partition()?.groups(label);
        Ok(format!("total number of unique records:  {groups}"))
    }

    /// Projected rows of one bucket, grouped and padded.
    pub fn rows(&self, label: BucketLabel) -> Result<Vec<Vec<String>>, PipelineError> {
        let partition = self.bucketizer.partition()?;
        let mut rows = Vec::new();
        match label {
            BucketLabel::ZeroOne => {
                for key in &partition.zero_one {
                    rows.push(self.right_cells(*key));
                }
            }
            BucketLabel::OneZero => {
                for key in &partition.one_zero {
                    rows.push(self.left_cells(*key));
                }
            }
            BucketLabel::OneOne => {
                for (left, right) in &partition.one_one {
                    rows.push(self.pair(Some(*left), Some(*right)));
                }
            }
            BucketLabel::OneMany => {
                for (left, rights) in &partition.one_n {
                    for (idx, right) in rights.iter().enumerate() {
                        let single = (idx == 0).then_some(*left);
                        rows.push(self.pair(single, Some(*right)));
                    }
                }
            }
            BucketLabel::ManyOne => {
                for (lefts, right) in &partition.n_one {
                    for (idx, left) in lefts.iter().enumerate() {
                        let single = (idx == 0).then_some(*right);
                        rows.push(self.pair(Some(*left), single));
                    }
                }
            }
            BucketLabel::ManyMany => {
                for (lefts, rights) in &partition.n_m {
                    for idx in 0..lefts.len().max(rights.len()) {
                        rows.push(self.pair(lefts.get(idx).copied(), rights.get(idx).copied()));
                    }
                }
            }
        }
        Ok(rows)
    }

    /// Summary section of one bucket; empty without a summary projection
    /// and for the 0:1, 1:0 and N:N buckets.
    pub fn summary_rows(&self, label: BucketLabel) -> Result<Vec<Vec<String>>, PipelineError> {
        let Some((left_fields, right_fields)) = &self.summary else {
            return Ok(Vec::new());
        };
        let partition = self.bucketizer.partition()?;
        let left = |key: RowKey| project(self.bucketizer.left(), key, left_fields);
        let right = |key: RowKey| project(self.bucketizer.right(), key, right_fields);
        let mut rows = Vec::new();
        match label {
            BucketLabel::OneOne => {
                for (gene, protein) in &partition.one_one {
                    let mut cells = left(*gene);
                    cells.extend(right(*protein));
                    rows.push(cells);
                }
            }
            BucketLabel::OneMany => {
                for (gene, proteins) in &partition.one_n {
                    let gene_cells = left(*gene);
                    let blank: Vec<String> =
                        gene_cells.iter().map(|cell| " ".repeat(cell.len())).collect();
                    for (idx, protein) in proteins.iter().enumerate() {
                        let mut cells = if idx == 0 { gene_cells.clone() } else { blank.clone() };
                        cells.extend(right(*protein));
                        rows.push(cells);
                    }
                }
            }
            BucketLabel::ManyOne => {
                for (genes, protein) in &partition.n_one {
                    for (idx, gene) in genes.iter().enumerate() {
                        let mut cells = left(*gene);
                        if idx == 0 {
                            cells.extend(right(*protein));
                        } else {
                            cells.extend(std::iter::repeat_n(String::new(), right_fields.len()));
                        }
                        rows.push(cells);
                    }
                }
            }
            BucketLabel::ZeroOne | BucketLabel::OneZero | BucketLabel::ManyMany => {}
        }
        Ok(rows)
    }

    /// Write one bucket: count header, blank line, rows, then any summary rows.
    pub fn write(&self, label: BucketLabel, out: &mut OutputFile) -> Result<(), PipelineError> {
        out.write_line(&self.header(label)?)?;
        out.write_line("")?;
        for row in self.rows(label)? {
            out.write_row(&row)?;
        }
        for row in self.summary_rows(label)? {
            out.write_row(&row)?;
        }
        Ok(())
    }

    pub fn write_0_1(&self, out: &mut OutputFile) -> Result<(), PipelineError> {
        self.write(BucketLabel::ZeroOne, out)
    }

    pub fn write_1_0(&self, out: &mut OutputFile) -> Result<(), PipelineError> {
        self.write(BucketLabel::OneZero, out)
    }

    pub fn write_1_1(&self, out: &mut OutputFile) -> Result<(), PipelineError> {
        self.write(BucketLabel::OneOne, out)
    }

    pub fn write_1_n(&self, out: &mut OutputFile) -> Result<(), PipelineError> {
        self.write(BucketLabel::OneMany, out)
    }

    pub fn write_n_1(&self, out: &mut OutputFile) -> Result<(), PipelineError> {
        self.write(BucketLabel::ManyOne, out)
    }

    pub fn write_n_m(&self, out: &mut OutputFile) -> Result<(), PipelineError> {
        self.write(BucketLabel::ManyMany, out)
    }

    /// Write all six files as `<dir>/<prefix>.<label>.txt`.
    ///
    /// Files are published only after every bucket was written.
    pub fn write_all(&self, dir: &Path, prefix: &str) -> Result<(), PipelineError> {
        let mut outputs = Vec::with_capacity(BucketLabel::ALL.len());
        for label in BucketLabel::ALL {
            let mut out = OutputFile::create(dir.join(label.file_name(prefix)))?;
            self.write(label, &mut out)?;
            outputs.push(out);
        }
        for out in outputs {
            out.commit()?;
        }
        Ok(())
    }

    fn left_cells(&self, key: RowKey) -> Vec<String> {
        project(self.bucketizer.left(), key, &self.left_fields)
    }

    fn right_cells(&self, key: RowKey) -> Vec<String> {
        project(self.bucketizer.right(), key, &self.right_fields)
    }

    fn pair(&self, left: Option<RowKey>, right: Option<RowKey>) -> Vec<String> {
        let mut cells = match left {
            Some(key) => self.left_cells(key),
            None => vec![String::new(); self.left_fields.len()],
        };
        match right {
            Some(key) => cells.extend(self.right_cells(key)),
            None => cells.extend(std::iter::repeat_n(String::new(), self.right_fields.len())),
        }
        cells
    }
}

/// Partition keys always resolve; a stray key renders as empty cells.
fn project(dataset: &TableDataset, key: RowKey, fields: &[FieldId]) -> Vec<String> {
    match dataset.get_record(key) {
        Some(record) => record.project(fields),
        None => vec![String::new(); fields.len()],
    }
}
