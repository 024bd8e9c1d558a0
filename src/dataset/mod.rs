//! Tabular datasets: schema, records, indexes.

pub mod input;
pub mod reader;
pub mod record;
pub mod schema;
pub mod split;
pub mod table;

pub use record::{Record, RowKey, Value};
pub use schema::{FieldId, Schema};
pub use table::{FieldIndex, LoadOptions, TableDataset};
