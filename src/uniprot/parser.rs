//! Streaming parser for UniProt flat files.
//!
//! Entries are `//`-terminated blocks of lines with two-character tags.
//! Content after the last `//` is not an entry and is dropped.

use std::fmt;
use std::io::BufRead;

use super::record::{UniProtRecord, push_distinct};

#[derive(Debug)]
pub enum UniProtParseErrorKind {
    /// The entry had no `AC` line.
    MissingAccession,
    Io(std::io::Error),
}

/// Error with the entry number and the line where it surfaced.
#[derive(Debug)]
pub struct UniProtParseError {
    pub record: u64,
    pub line: u64,
    pub kind: UniProtParseErrorKind,
}

impl fmt::Display for UniProtParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            UniProtParseErrorKind::MissingAccession => write!(
                f,
                "record {} ending at line {} has no AC line",
                self.record, self.line
            ),
            UniProtParseErrorKind::Io(err) => write!(f, "line {}: {err}", self.line),
        }
    }
}

impl std::error::Error for UniProtParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            UniProtParseErrorKind::Io(err) => Some(err),
            UniProtParseErrorKind::MissingAccession => None,
        }
    }
}

pub struct UniProtParser<R> {
    reader: R,
    buf: String,
    line: u64,
    records: u64,
}

impl<R: BufRead> UniProtParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            records: 0,
        }
    }

    /// Lines consumed so far.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Parse the next complete entry, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<UniProtRecord>, UniProtParseError> {
        let mut record = UniProtRecord::default();
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|err| self.error(UniProtParseErrorKind::Io(err)))?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;

            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.starts_with("//") {
                self.records += 1;
                if record.uniprot_id.is_empty() {
                    return Err(self.error(UniProtParseErrorKind::MissingAccession));
                }
                return Ok(Some(record));
            }
            apply_line(&mut record, line);
        }
    }

    fn error(&self, kind: UniProtParseErrorKind) -> UniProtParseError {
        UniProtParseError {
            record: self.records,
            line: self.line,
            kind,
        }
    }
}

impl<R: BufRead> Iterator for UniProtParser<R> {
    type Item = Result<UniProtRecord, UniProtParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// `n`-th `;`-separated token after the five-column tag, trimmed.
fn nth_token(line: &str, n: usize) -> Option<&str> {
    line.get(5..)?.split(';').nth(n).map(str::trim)
}

fn apply_line(record: &mut UniProtRecord, line: &str) {
    if line.starts_with("ID") {
        if line.contains("Unreviewed;") {
            record.is_trembl = true;
        }
    } else if line.starts_with("AC") {
        if record.uniprot_id.is_empty()
            && let Some(id) = nth_token(line, 0)
        {
            record.uniprot_id = id.to_string();
        }
    } else if let Some(rest) = line.strip_prefix("DR   Ensembl;") {
        for token in rest.split(';') {
            if !token.trim().starts_with("ENSMUSG") {
                continue;
            }
            for part in token.split('.').map(str::trim) {
                if part.starts_with("ENSMUSG") {
                    push_distinct(&mut record.ensembl, part);
                }
            }
        }
    } else if line.starts_with("DR   GeneID;") {
        if let Some(id) = nth_token(line, 1) {
            push_distinct(&mut record.entrezgene, id);
        }
    } else if line.starts_with("DR   EMBL;") {
        if line.contains("mRNA")
            && let Some(id) = nth_token(line, 1)
        {
            push_distinct(&mut record.embl, id);
        }
    } else if line.starts_with("DR   PDB;") {
        if let Some(id) = nth_token(line, 1) {
            push_distinct(&mut record.pdb, id);
        }
    } else if line.starts_with("DR   InterPro;") {
        if let Some(id) = nth_token(line, 1) {
            push_distinct(&mut record.interpro, id);
        }
    } else if line.starts_with("DE   ") {
        if let Some(value) = line.split('=').nth(1).filter(|_| line.contains("EC=")) {
            let value = value.trim();
            let value = value.split(" {").next().unwrap_or(value);
            push_distinct(&mut record.ec, &value.trim().replace(';', ""));
        }
    } else if let Some(rest) = line.strip_prefix("KW   ") {
        for name in rest.split(';') {
            push_distinct(&mut record.keywords, name.trim().replace('.', "").trim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ENTRY: &str = "\
ID   1433B_MOUSE             Reviewed;         246 AA.
AC   Q9CQV8; O70455;
AC   Q9CQ00;
DE   RecName: Full=14-3-3 protein beta/alpha;
DE            EC=2.7.11.1 {ECO:0000250|UniProtKB:P31946};
DR   EMBL; AF058797; AAC14343.1; -; mRNA.
DR   EMBL; AK002784; BAB22357.1; -; Genomic_DNA.
DR   PDB; 2C1J; X-ray; 2.60 A; A/B=1-246.
DR   GeneID; 54401; -.
DR   Ensembl; ENSMUST00000018470; ENSMUSP00000018470; ENSMUSG00000018326.7.
DR   Ensembl; ENSMUST00000099999; ENSMUSP00000099999; ENSMUSG00000018326.
DR   InterPro; IPR000308; 14-3-3.
KW   3D-structure; Acetylation;
KW   Phosphoprotein; Reference proteome.
//
";

    #[test]
    fn extracts_every_accession_kind() {
        let mut parser = UniProtParser::new(Cursor::new(ENTRY));
        let record = parser.next_record().expect("parse").expect("record");
        assert_eq!(record.uniprot_id, "Q9CQV8");
        assert!(!record.is_trembl);
        assert_eq!(record.ec, ["2.7.11.1"]);
        assert_eq!(record.embl, ["AF058797"]);
        assert_eq!(record.pdb, ["2C1J"]);
        assert_eq!(record.entrezgene, ["54401"]);
        assert_eq!(record.ensembl, ["ENSMUSG00000018326"]);
        assert_eq!(record.interpro, ["IPR000308"]);
        assert_eq!(
            record.keywords,
            ["3D-structure", "Acetylation", "Phosphoprotein", "Reference proteome"]
        );
        assert!(parser.next_record().expect("eof").is_none());
    }

    #[test]
    fn unreviewed_entries_are_trembl() {
        let text = "ID   A0A0_MOUSE   Unreviewed;   100 AA.\nAC   A0A0;\n//\n";
        let records: Vec<UniProtRecord> = UniProtParser::new(Cursor::new(text))
            .collect::<Result<_, _>>()
            .expect("parse");
        assert_eq!(records.len(), 1);
        assert!(records[0].is_trembl);
        assert!(!records[0].has_join_ids());
    }

    #[test]
    fn trailing_partial_entry_is_dropped() {
        let text = "AC   P1;\n//\nAC   P2;\nDR   GeneID; 1; -.\n";
        let records: Vec<UniProtRecord> = UniProtParser::new(Cursor::new(text))
            .collect::<Result<_, _>>()
            .expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uniprot_id, "P1");
    }

    #[test]
    fn entry_without_accession_is_an_error() {
        let text = "AC   P1;\n//\nID   X   Reviewed;\n//\n";
        let mut parser = UniProtParser::new(Cursor::new(text));
        assert!(parser.next_record().expect("first").is_some());
        let err = parser.next_record().expect_err("missing AC");
        assert!(matches!(err.kind, UniProtParseErrorKind::MissingAccession));
        assert_eq!(err.record, 2);
        assert_eq!(err.line, 4);
    }
}
