//! Bucket file snapshots for generation-to-generation comparison.
//!
//! A snapshot keeps only an id set per bucket. Rows of the 0_1 bucket
//! carry a protein id; every other bucket is keyed by the gene id in the
//! first column, recognised by an [`IdClassifier`]. Padding rows of grouped
//! buckets start with an empty cell and are skipped by the classifier.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::bucket::BucketLabel;
use crate::error::PipelineError;

/// Suffix of the previous generation's bucket files.
pub const SAVE_SUFFIX: &str = ".save";

const COUNT_HEADER: &str = "total number of unique records:";

/// Decides whether a row's leading id is a gene-catalog id.
pub trait IdClassifier {
    fn is_gene_id(&self, id: &str) -> bool;
}

impl<F> IdClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_gene_id(&self, id: &str) -> bool {
        self(id)
    }
}

/// Ids beginning with a fixed prefix (`MGI:` by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixClassifier {
    prefix: String,
}

impl PrefixClassifier {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for PrefixClassifier {
    fn default() -> Self {
        Self::new("MGI:")
    }
}

impl IdClassifier for PrefixClassifier {
    fn is_gene_id(&self, id: &str) -> bool {
        id.starts_with(&self.prefix)
    }
}

/// Gene id to display label (symbol); the first symbol seen wins.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    symbols: HashMap<String, String>,
}

impl Labels {
    pub fn insert(&mut self, id: &str, symbol: &str) {
        if !self.symbols.contains_key(id) {
            self.symbols.insert(id.to_string(), symbol.to_string());
        }
    }

    /// Label for `id`, empty when none was recorded.
    pub fn get(&self, id: &str) -> &str {
        self.symbols.get(id).map(String::as_str).unwrap_or("")
    }
}

/// Id set per bucket for one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketSnapshot {
    members: BTreeMap<BucketLabel, BTreeSet<String>>,
}

impl BucketSnapshot {
    pub fn members(&self, label: BucketLabel) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.members.get(&label).unwrap_or(&EMPTY)
    }

    pub fn contains(&self, label: BucketLabel, id: &str) -> bool {
        self.members(label).contains(id)
    }

    pub fn insert(&mut self, label: BucketLabel, id: impl Into<String>) {
        self.members.entry(label).or_default().insert(id.into());
    }

    /// Load all six buckets `<dir>/<prefix>.<label>.txt<suffix>`.
    pub fn load(
        dir: &Path,
        prefix: &str,
        suffix: &str,
        classifier: &dyn IdClassifier,
        labels: &mut Labels,
    ) -> Result<Self, PipelineError> {
        let mut snapshot = Self::default();
        for label in BucketLabel::ALL {
            let path = bucket_path(dir, prefix, label, suffix);
            let file = File::open(&path).map_err(|err| PipelineError::io(&path, err))?;
            let ids = read_bucket(BufReader::new(file), label, classifier, labels)
                .map_err(|err| PipelineError::io(&path, err))?;
            tracing::debug!(bucket = label.as_str(), path = %path.display(), ids = ids.len(), "snapshot bucket loaded");
            snapshot.members.insert(label, ids);
        }
        Ok(snapshot)
    }
}

pub fn bucket_path(dir: &Path, prefix: &str, label: BucketLabel, suffix: &str) -> PathBuf {
    dir.join(format!("{}{suffix}", label.file_name(prefix)))
}

/// Read one bucket file into its id set, recording gene labels.
pub fn read_bucket<R: BufRead>(
    reader: R,
    label: BucketLabel,
    classifier: &dyn IdClassifier,
    labels: &mut Labels,
) -> std::io::Result<BTreeSet<String>> {
    let mut ids = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(COUNT_HEADER) {
            continue;
        }
        let mut tokens = line.split('\t');
        let id = tokens.next().unwrap_or_default();
        let is_gene = classifier.is_gene_id(id);
        if is_gene {
            labels.insert(id, tokens.next().unwrap_or_default());
        }
        if (label == BucketLabel::ZeroOne || is_gene) && !id.is_empty() {
            ids.insert(id.to_string());
        }
    }
    Ok(ids)
}

/// Move the current bucket files aside as the previous generation.
///
/// Missing current files are skipped; returns how many were moved.
pub fn save_previous(dir: &Path, prefix: &str) -> Result<usize, PipelineError> {
    let mut moved = 0;
    for label in BucketLabel::ALL {
        let current = bucket_path(dir, prefix, label, "");
        if !current.exists() {
            continue;
        }
        let saved = bucket_path(dir, prefix, label, SAVE_SUFFIX);
        fs::rename(&current, &saved).map_err(|err| PipelineError::io(&current, err))?;
        moved += 1;
    }
    Ok(moved)
}
