//! Override file QC.

pub mod override_qc;
pub mod violations;

pub use override_qc::{
    KnownAssociations, QcCounts, QcOutcome, QcOutputs, check_overrides, run_override_qc,
};
pub use violations::{Severity, Violation, ViolationCount, ViolationKind, ViolationReport};
