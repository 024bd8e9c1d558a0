//! UniProt flat-file parsing and the protein association file.

pub mod assoc;
pub mod parser;
pub mod record;

pub use assoc::{AssocOutputs, UniProtCounts, write_uniprot_assoc};
pub use parser::{UniProtParseError, UniProtParser};
pub use record::UniProtRecord;
