//! Fixed, validated field schema for a dataset.
//!
//! Field names are resolved to [`FieldId`] handles once, when a caller sets
//! up its projections or join keys. Record access after that point goes
//! through the handle, so a misspelled field fails at construction instead of
//! at first access.

use std::collections::HashMap;

use crate::error::PipelineError;

/// Handle to one field of a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    names: Vec<String>,
    multi_valued: Vec<bool>,
    positions: HashMap<String, FieldId>,
}

impl Schema {
    /// Build a schema from ordered field names and the subset that is
    /// multi-valued.
    pub fn new<S: AsRef<str>>(names: &[S], multi_valued: &[S]) -> Result<Self, PipelineError> {
        let mut positions = HashMap::with_capacity(names.len());
        let mut owned = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if positions.insert(name.to_string(), FieldId(idx)).is_some() {
                return Err(PipelineError::DuplicateField {
                    field: name.to_string(),
                });
            }
            owned.push(name.to_string());
        }

        let mut flags = vec![false; owned.len()];
        for name in multi_valued {
            let name = name.as_ref();
            let id = positions
                .get(name)
                .ok_or_else(|| PipelineError::UnknownField {
                    field: name.to_string(),
                })?;
            flags[id.0] = true;
        }

        Ok(Self {
            names: owned,
            multi_valued: flags,
            positions,
        })
    }

    /// Resolve a field name.
    pub fn field(&self, name: &str) -> Result<FieldId, PipelineError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| PipelineError::UnknownField {
                field: name.to_string(),
            })
    }

    /// Resolve several field names, preserving order.
    pub fn fields<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<FieldId>, PipelineError> {
        names.iter().map(|name| self.field(name.as_ref())).collect()
    }

    pub fn name(&self, id: FieldId) -> &str {
        &self.names[id.0]
    }

    pub fn is_multi_valued(&self, id: FieldId) -> bool {
        self.multi_valued[id.0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        (0..self.names.len()).map(FieldId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn resolves_fields_in_order() {
        let schema = Schema::new(&["MGI ID", "Symbol", "EntrezGene ID"], &["EntrezGene ID"])
            .expect("schema");
        let ids = schema.fields(&["EntrezGene ID", "MGI ID"]).expect("fields");
        assert_eq!(ids[0].index(), 2);
        assert_eq!(ids[1].index(), 0);
        assert!(schema.is_multi_valued(ids[0]));
        assert!(!schema.is_multi_valued(ids[1]));
        assert_eq!(schema.name(ids[0]), "EntrezGene ID");
    }

    #[test]
    fn rejects_unknown_field() {
        let schema = Schema::new(&["MGI ID"], &[]).expect("schema");
        let err = schema.field("Symbol").expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::UnknownField);
    }

    #[test]
    fn rejects_unknown_multi_valued_field() {
        let err = Schema::new(&["MGI ID"], &["PDB"]).expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::UnknownField);
    }

    #[test]
    fn rejects_duplicate_field() {
        let err = Schema::new(&["EC", "EC"], &[]).expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::DuplicateField);
    }
}
