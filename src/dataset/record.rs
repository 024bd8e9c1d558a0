use std::fmt;

use super::schema::FieldId;
use super::split::join_multi;

/// Dataset-local row identifier: the record's position in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub usize);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Multi(Vec<String>),
}

impl Value {
    /// Values that take part in indexing and joins.
    ///
    /// An empty scalar holds no value.
    pub fn values(&self) -> &[String] {
        match self {
            Value::Scalar(text) if text.is_empty() => &[],
            Value::Scalar(text) => std::slice::from_ref(text),
            Value::Multi(values) => values,
        }
    }

    /// Render for tabular output; sequences are comma-joined.
    pub fn render(&self) -> String {
        match self {
            Value::Scalar(text) => text.clone(),
            Value::Multi(values) => join_multi(values),
        }
    }
}

/// One immutable row of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: RowKey,
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn new(key: RowKey, values: Vec<Value>) -> Self {
        Self { key, values }
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn get(&self, field: FieldId) -> &Value {
        &self.values[field.index()]
    }

    /// Scalar text of a field; multi-valued fields render comma-joined.
    pub fn text(&self, field: FieldId) -> String {
        self.get(field).render()
    }

    /// Individual values of a field.
    pub fn list(&self, field: FieldId) -> &[String] {
        self.get(field).values()
    }

    /// Project the given fields into rendered cells.
    pub fn project(&self, fields: &[FieldId]) -> Vec<String> {
        fields.iter().map(|field| self.text(*field)).collect()
    }
}
