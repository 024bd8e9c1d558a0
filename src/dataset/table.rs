//! In-memory indexed dataset.
//!
//! Responsibilities:
//! - load every row of a delimited source positionally against a [`Schema`]
//! - split multi-valued fields on the configured separator
//! - maintain per-field secondary indexes from value to record keys

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::input::guard_input_bytes;
use super::reader::{TAB, build_reader};
use super::record::{Record, RowKey, Value};
use super::schema::{FieldId, Schema};
use super::split::split_multi;
use crate::error::PipelineError;

/// Value to the keys of every record holding it, in ascending key order.
pub type FieldIndex = HashMap<String, Vec<RowKey>>;

/// How a source is read into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub separator: char,
    /// Discard the first line (a column header).
    pub skip_header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: TAB,
            separator: ',',
            skip_header: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableDataset {
    name: String,
    schema: Schema,
    records: Vec<Record>,
    indexes: HashMap<FieldId, FieldIndex>,
}

impl TableDataset {
    /// Load a dataset from a file on disk.
    pub fn load_path(
        name: &str,
        schema: Schema,
        path: &Path,
        options: LoadOptions,
    ) -> Result<Self, PipelineError> {
        let bytes = fs::read(path).map_err(|err| PipelineError::io(path, err))?;
        Self::from_bytes(name, schema, &bytes, path, options)
    }

    /// Load a dataset from any reader; errors name the dataset.
    pub fn load<R: Read>(
        name: &str,
        schema: Schema,
        mut source: R,
        options: LoadOptions,
    ) -> Result<Self, PipelineError> {
        let origin = PathBuf::from(name);
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|err| PipelineError::io(&origin, err))?;
        Self::from_bytes(name, schema, &bytes, &origin, options)
    }

    fn from_bytes(
        name: &str,
        schema: Schema,
        bytes: &[u8],
        origin: &Path,
        options: LoadOptions,
    ) -> Result<Self, PipelineError> {
        let bytes = guard_input_bytes(bytes).map_err(|_| PipelineError::Encoding {
            path: origin.to_path_buf(),
        })?;

        let mut reader = build_reader(bytes, options.delimiter);
        let mut records = Vec::new();
        let mut skipped_header = !options.skip_header;

        for row in reader.records() {
            let row = row.map_err(|err| match err.kind() {
                csv::ErrorKind::Utf8 { .. } => PipelineError::Encoding {
                    path: origin.to_path_buf(),
                },
                _ => PipelineError::csv(origin, err),
            })?;
            if !skipped_header {
                skipped_header = true;
                continue;
            }
            if row.len() < schema.len() {
                return Err(PipelineError::MalformedRecord {
                    dataset: name.to_string(),
                    line: row.position().map(|pos| pos.line()).unwrap_or(0),
                    expected: schema.len(),
                    found: row.len(),
                });
            }

            let values = schema
                .ids()
                .map(|field| {
                    let raw = &row[field.index()];
                    if schema.is_multi_valued(field) {
                        Value::Multi(split_multi(raw, options.separator))
                    } else {
                        Value::Scalar(raw.to_string())
                    }
                })
                .collect();
            records.push(Record::new(RowKey(records.len()), values));
        }

        tracing::debug!(dataset = name, records = records.len(), "dataset loaded");

        Ok(Self {
            name: name.to_string(),
            schema,
            records,
            indexes: HashMap::new(),
        })
    }

    /// Build (or rebuild) an index for each named field.
    pub fn add_index<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), PipelineError> {
        for field in self.schema.fields(names)? {
            let mut index: FieldIndex = HashMap::new();
            for record in &self.records {
                for value in record.list(field) {
                    let keys = index.entry(value.clone()).or_default();
                    // Keys arrive in ascending order, so a repeat within one
                    // record is always the last entry.
                    if keys.last() != Some(&record.key()) {
                        keys.push(record.key());
                    }
                }
            }
            self.indexes.insert(field, index);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The record at `key`, or `None` for a key from another dataset.
    pub fn get_record(&self, key: RowKey) -> Option<&Record> {
        self.records.get(key.0)
    }

    /// Records for `keys`, in the order given; `None` if any key misses.
    pub fn get_records(&self, keys: &[RowKey]) -> Option<Vec<&Record>> {
        keys.iter().map(|key| self.get_record(*key)).collect()
    }

    pub fn is_indexed(&self, field: FieldId) -> bool {
        self.indexes.contains_key(&field)
    }

    /// The index on `field`, failing if none was built.
    pub fn index(&self, field: FieldId) -> Result<&FieldIndex, PipelineError> {
        self.indexes
            .get(&field)
            .ok_or_else(|| PipelineError::NoSuchIndex {
                field: self.schema.name(field).to_string(),
            })
    }

    /// Keys of every record holding `value` in the named field.
    pub fn lookup(&self, name: &str, value: &str) -> Result<&[RowKey], PipelineError> {
        let field = self.schema.field(name)?;
        self.lookup_field(field, value)
    }

    pub fn lookup_field(&self, field: FieldId, value: &str) -> Result<&[RowKey], PipelineError> {
        let index = self.index(field)?;
        Ok(index.get(value).map(Vec::as_slice).unwrap_or(&[]))
    }
}
