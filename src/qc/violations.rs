//! Itemized QC violations, grouped by kind.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// Fewer than four columns, an empty column, or an invalid action or
    /// logical DB value.
    InvalidRow,
    DuplicateUniProt,
    AddExists,
    DeleteMissing,
    UnknownMgiId,
}

impl ViolationKind {
    /// Every kind, in report order.
    pub const ALL: [ViolationKind; 5] = [
        ViolationKind::InvalidRow,
        ViolationKind::DuplicateUniProt,
        ViolationKind::AddExists,
        ViolationKind::DeleteMissing,
        ViolationKind::UnknownMgiId,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ViolationKind::InvalidRow => "INVALID_ROW",
            ViolationKind::DuplicateUniProt => "DUPLICATE_UNIPROT",
            ViolationKind::AddExists => "ADD_EXISTS",
            ViolationKind::DeleteMissing => "DELETE_MISSING",
            ViolationKind::UnknownMgiId => "UNKNOWN_MGI_ID",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            ViolationKind::InvalidRow => Severity::Fatal,
            ViolationKind::DuplicateUniProt => Severity::Warning,
            ViolationKind::AddExists
            | ViolationKind::DeleteMissing
            | ViolationKind::UnknownMgiId => Severity::Error,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            ViolationKind::InvalidRow => {
                "Input lines with missing data, invalid action values, invalid logical DB values or < 4 columns:\n\nThese errors must be fixed before publishing; if present, the load will not run"
            }
            ViolationKind::DuplicateUniProt => {
                "UniProt ID listed twice in file. These will be loaded:"
            }
            ViolationKind::AddExists => {
                "Add associations that already exist. These will not be loaded:"
            }
            ViolationKind::DeleteMissing => {
                "Delete associations that do not exist. These will not be loaded:"
            }
            ViolationKind::UnknownMgiId => {
                "Input lines where MGI ID does not exist. These will not be loaded:"
            }
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownViolationKind(pub String);

impl fmt::Display for UnknownViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown violation kind: {}", self.0)
    }
}

impl std::error::Error for UnknownViolationKind {}

impl FromStr for ViolationKind {
    type Err = UnknownViolationKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ViolationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownViolationKind(value.to_string()))
    }
}

/// One offending input line: its data-line number and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViolationCount {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationReport {
    lists: Vec<(ViolationKind, Vec<Violation>)>,
}

impl ViolationReport {
    pub fn push(&mut self, kind: ViolationKind, line: usize, text: &str) {
        let violation = Violation {
            line,
            text: text.to_string(),
        };
        match self.lists.iter_mut().find(|(existing, _)| *existing == kind) {
            Some((_, list)) => list.push(violation),
            None => self.lists.push((kind, vec![violation])),
        }
    }

    pub fn get(&self, kind: ViolationKind) -> &[Violation] {
        self.lists
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// Highest severity present, if any.
    pub fn worst(&self) -> Option<Severity> {
        self.lists
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(kind, _)| kind.severity())
            .max()
    }

    pub fn is_empty(&self) -> bool {
        self.worst().is_none()
    }

    pub fn counts(&self) -> Vec<ViolationCount> {
        ViolationKind::ALL
            .into_iter()
            .map(|kind| ViolationCount {
                kind,
                severity: kind.severity(),
                count: self.get(kind).len(),
            })
            .collect()
    }

    /// Report text: each non-empty list under its heading.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for kind in ViolationKind::ALL {
            let list = self.get(kind);
            if list.is_empty() {
                continue;
            }
            out.push('\n');
            out.push_str(kind.heading());
            out.push('\n');
            out.push_str("-----------------------------\n");
            for violation in list {
                out.push_str(&format!("{}: {}\n", violation.line, violation.text));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip() {
        for kind in ViolationKind::ALL {
            assert_eq!(kind.as_str().parse::<ViolationKind>(), Ok(kind));
        }
        assert!("NOPE".parse::<ViolationKind>().is_err());
    }

    #[test]
    fn worst_severity_wins() {
        let mut report = ViolationReport::default();
        assert_eq!(report.worst(), None);
        report.push(ViolationKind::DuplicateUniProt, 1, "p1\tMGI:1\ts\tadd");
        assert_eq!(report.worst(), Some(Severity::Warning));
        report.push(ViolationKind::AddExists, 2, "p2\tMGI:2\ts\tadd");
        assert_eq!(report.worst(), Some(Severity::Error));
        report.push(ViolationKind::InvalidRow, 3, "p3");
        assert_eq!(report.worst(), Some(Severity::Fatal));
    }

    #[test]
    fn renders_groups_in_report_order() {
        let mut report = ViolationReport::default();
        report.push(ViolationKind::UnknownMgiId, 4, "P4\tMGI:9\ts\tadd");
        report.push(ViolationKind::InvalidRow, 2, "P2");
        let text = report.render();
        let invalid = text.find("< 4 columns").expect("invalid heading");
        let unknown = text.find("MGI ID does not exist").expect("unknown heading");
        assert!(invalid < unknown);
        assert!(text.contains("2: P2\n"));
        assert!(text.contains("4: P4\tMGI:9\ts\tadd\n"));
    }
}
