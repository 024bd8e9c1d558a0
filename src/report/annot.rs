//! Annotation-load files derived from the association report.
//!
//! Rows follow the annotation loader's nine columns: term, MGI id, J:
//! reference, evidence code, inferred-from, qualifier, editor, date, notes.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::catalog::{INTERPRO_ID, UNIPROT_ID};
use crate::dataset::TableDataset;
use crate::error::PipelineError;

use super::assoc::AssocRow;
use super::files::OutputFile;

/// Reference, evidence, editor and date stamped on every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotStamp {
    pub reference: String,
    pub evidence: String,
    pub editor: String,
    pub date: String,
}

/// Rows written per annotation file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotCounts {
    pub markers: usize,
    pub interpro: usize,
    /// `None` when no EC2GO translation was configured.
    pub ec_go: Option<usize>,
    /// `None` when no GlyGen association file was configured.
    pub glygen: Option<GlyGenCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GlyGenCounts {
    pub rows: usize,
    pub mismatches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotRow {
    pub term: String,
    pub mgi_id: String,
    pub inferred_from: String,
}

impl AnnotRow {
    pub fn cells(&self, stamp: &AnnotStamp) -> [String; 9] {
        [
            self.term.clone(),
            self.mgi_id.clone(),
            stamp.reference.clone(),
            stamp.evidence.clone(),
            self.inferred_from.clone(),
            String::new(),
            stamp.editor.clone(),
            stamp.date.clone(),
            String::new(),
        ]
    }
}

/// One row per distinct (MGI id, InterPro id), markers in id order.
pub fn interpro_rows(
    report: &[AssocRow],
    uniprot: &TableDataset,
) -> Result<Vec<AnnotRow>, PipelineError> {
    let id_field = uniprot.schema().field(UNIPROT_ID)?;
    let ip_field = uniprot.schema().field(INTERPRO_ID)?;
    let mut interpro: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in uniprot.records() {
        let ips = record.list(ip_field);
        if ips.is_empty() {
            continue;
        }
        for id in record.list(id_field) {
            interpro
                .entry(id.as_str())
                .or_default()
                .extend(ips.iter().map(String::as_str));
        }
    }

    let mut markers: Vec<&AssocRow> = report.iter().collect();
    markers.sort_by(|a, b| a.mgi_id.cmp(&b.mgi_id));

    let mut rows = Vec::new();
    for marker in markers {
        let mut seen: Vec<&str> = Vec::new();
        for uniprot_id in marker.uniprot_ids() {
            let Some(ips) = interpro.get(uniprot_id) else {
                continue;
            };
            for ip in ips {
                if !seen.contains(ip) {
                    seen.push(*ip);
                }
            }
        }
        rows.extend(seen.into_iter().map(|ip| AnnotRow {
            term: ip.to_string(),
            mgi_id: marker.mgi_id.clone(),
            inferred_from: String::new(),
        }));
    }
    Ok(rows)
}

/// EC id (`EC:x.x.x.x`) to GO ids, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ec2Go {
    mapping: HashMap<String, Vec<String>>,
}

impl Ec2Go {
    /// Parse lines of the form `EC:1.1.1.1 > GO:name ; GO:0004022`.
    ///
    /// Lines that do not match (comments, headers) are skipped.
    pub fn parse<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut mapping: HashMap<String, Vec<String>> = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            if let Some((ec, go)) = parse_ec2go_line(&line) {
                mapping.entry(ec.to_string()).or_default().push(go.to_string());
            }
        }
        Ok(Self { mapping })
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(|err| PipelineError::io(path, err))?;
        Self::parse(BufReader::new(file)).map_err(|err| PipelineError::io(path, err))
    }

    pub fn go_ids(&self, ec: &str) -> &[String] {
        self.mapping.get(ec).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

fn parse_ec2go_line(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with("EC:") {
        return None;
    }
    let (ec, rest) = line.split_once(" > ")?;
    let ec = ec.trim_end();
    if ec.len() <= "EC:".len() || !rest.trim_start().starts_with("GO:") {
        return None;
    }
    let (_, go) = rest.rsplit_once(" ; ")?;
    let go = go.trim();
    let digits = go.strip_prefix("GO:")?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some((ec, go))
}

/// One row per distinct (MGI id, GO id, EC id) reachable through the
/// marker's EC ids; inferred-from carries the EC id.
pub fn ec_go_rows(report: &[AssocRow], ec2go: &Ec2Go) -> Vec<AnnotRow> {
    let mut markers: Vec<&AssocRow> = report.iter().collect();
    markers.sort_by(|a, b| a.mgi_id.cmp(&b.mgi_id));

    let mut rows: Vec<AnnotRow> = Vec::new();
    for marker in markers {
        let start = rows.len();
        for ec in &marker.ec {
            let ec = format!("EC:{ec}");
            for go in ec2go.go_ids(&ec) {
                let row = AnnotRow {
                    term: go.clone(),
                    mgi_id: marker.mgi_id.clone(),
                    inferred_from: ec.clone(),
                };
                if !rows[start..].contains(&row) {
                    rows.push(row);
                }
            }
        }
    }
    rows
}

/// Column-2 value of the GlyGen file's header row.
const GLYGEN_HEADER_ID: &str = "mgi_id";

/// Evidence code written on every GlyGen row.
pub const GLYGEN_EVIDENCE: &str = "NA";

/// UniProt ids claimed per MGI id by the GlyGen association file.
///
/// Markers keep first-seen order; each marker's ids keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyGenLinks {
    by_marker: Vec<(String, Vec<String>)>,
}

impl GlyGenLinks {
    /// Parse `uniprot_id<TAB>mgi_id` lines; the header row is skipped.
    pub fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self, PipelineError> {
        let mut by_marker: Vec<(String, Vec<String>)> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| PipelineError::io(path, err))?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let mut tokens = line.split('\t');
            let (Some(uniprot_id), Some(mgi_id)) = (tokens.next(), tokens.next()) else {
                return Err(PipelineError::MalformedRecord {
                    dataset: path.display().to_string(),
                    line: idx as u64 + 1,
                    expected: 2,
                    found: 1,
                });
            };
            if mgi_id == GLYGEN_HEADER_ID {
                continue;
            }
            let slot = *slots.entry(mgi_id.to_string()).or_insert_with(|| {
                by_marker.push((mgi_id.to_string(), Vec::new()));
                by_marker.len() - 1
            });
            by_marker[slot].1.push(uniprot_id.to_string());
        }
        Ok(Self { by_marker })
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(|err| PipelineError::io(path, err))?;
        Self::parse(BufReader::new(file), path)
    }

    /// `(mgi id, uniprot id)` pairs in file grouping order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_marker.iter().flat_map(|(mgi_id, uniprot_ids)| {
            uniprot_ids
                .iter()
                .map(move |uniprot_id| (mgi_id.as_str(), uniprot_id.as_str()))
        })
    }
}

/// GlyGen rows whose pair the association report confirms, plus the
/// `(mgi id, uniprot id)` pairs it does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyGenCheck {
    pub rows: Vec<AnnotRow>,
    pub mismatches: Vec<(String, String)>,
}

/// Term is the UniProt id. Every pair is written, repeats included.
pub fn glygen_rows(report: &[AssocRow], links: &GlyGenLinks) -> GlyGenCheck {
    let known: HashSet<(&str, &str)> = report
        .iter()
        .flat_map(|row| {
            row.uniprot_ids()
                .map(move |uniprot_id| (row.mgi_id.as_str(), uniprot_id))
        })
        .collect();

    let mut check = GlyGenCheck::default();
    for (mgi_id, uniprot_id) in links.pairs() {
        if known.contains(&(mgi_id, uniprot_id)) {
            check.rows.push(AnnotRow {
                term: uniprot_id.to_string(),
                mgi_id: mgi_id.to_string(),
                inferred_from: String::new(),
            });
        } else {
            check
                .mismatches
                .push((mgi_id.to_string(), uniprot_id.to_string()));
        }
    }
    check
}

/// Sanity log of GlyGen pairs missing from the association report.
pub fn write_glygen_errors(
    path: &Path,
    mismatches: &[(String, String)],
    date: &str,
) -> Result<(), PipelineError> {
    let mut out = OutputFile::create(path)?;
    out.write_line("#")?;
    out.write_line(&format!("# Date Generated: {date}"))?;
    out.write_line("#")?;
    out.write_line("")?;
    out.write_line("")?;
    out.write_line("GlyGen Marker/UniProt does not match MGI-UniProt file:")?;
    out.write_line("")?;
    for (mgi_id, uniprot_id) in mismatches {
        out.write_line(&format!("{mgi_id}, {uniprot_id}"))?;
    }
    out.commit()
}

pub fn write_annotations(
    path: &Path,
    rows: &[AnnotRow],
    stamp: &AnnotStamp,
) -> Result<(), PipelineError> {
    let mut out = OutputFile::create(path)?;
    for row in rows {
        out.write_row(&row.cells(stamp))?;
    }
    out.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::uniprot_schema;
    use crate::dataset::LoadOptions;
    use std::io::Cursor;

    fn marker(id: &str, swissprot: &[&str], trembl: &[&str], ec: &[&str]) -> AssocRow {
        let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        AssocRow {
            mgi_id: id.to_string(),
            swissprot: owned(swissprot),
            trembl: owned(trembl),
            ec: owned(ec),
            pdb: Vec::new(),
        }
    }

    fn stamp() -> AnnotStamp {
        AnnotStamp {
            reference: "J:53168".to_string(),
            evidence: "IEA".to_string(),
            editor: "uniprotload".to_string(),
            date: "10/18/2026".to_string(),
        }
    }

    #[test]
    fn interpro_rows_are_distinct_per_marker() {
        let uniprot = TableDataset::load(
            "uniprot",
            uniprot_schema().expect("schema"),
            Cursor::new(
                &b"P1\t1\t\t\t\t\tIPR1,IPR2\t\nT1\t1\t\t\t\t\tIPR2,IPR3\t\nP2\t2\t\t\t\t\t\t\n"[..],
            ),
            LoadOptions::default(),
        )
        .expect("load");
        let report = vec![
            marker("MGI:2", &["P2"], &[], &[]),
            marker("MGI:1", &["P1"], &["T1"], &[]),
        ];
        let rows = interpro_rows(&report, &uniprot).expect("rows");
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.mgi_id.as_str(), row.term.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("MGI:1", "IPR1"), ("MGI:1", "IPR2"), ("MGI:1", "IPR3")]
        );
        assert_eq!(
            rows[0].cells(&stamp()),
            ["IPR1", "MGI:1", "J:53168", "IEA", "", "", "uniprotload", "10/18/2026", ""]
        );
    }

    #[test]
    fn parses_ec2go_lines() {
        let text = "!version: 1\nEC:1.1.1.1 > GO:alcohol dehydrogenase (NAD+) activity ; GO:0004022\nEC:1.1.1.1 > GO:other ; GO:0000001\nEC:2.2 > nothing\n";
        let ec2go = Ec2Go::parse(Cursor::new(text)).expect("parse");
        assert_eq!(ec2go.len(), 1);
        assert_eq!(ec2go.go_ids("EC:1.1.1.1"), ["GO:0004022", "GO:0000001"]);
        assert!(ec2go.go_ids("EC:2.2").is_empty());
    }

    #[test]
    fn glygen_links_group_by_marker_in_first_seen_order() {
        let text = "uniprot_id\tmgi_id\nP2\tMGI:2\nP1\tMGI:1\nT2\tMGI:2\n\n";
        let links = GlyGenLinks::parse(Cursor::new(text), Path::new("gg.txt")).expect("parse");
        let pairs: Vec<(&str, &str)> = links.pairs().collect();
        assert_eq!(pairs, [("MGI:2", "P2"), ("MGI:2", "T2"), ("MGI:1", "P1")]);
    }

    #[test]
    fn glygen_line_without_mgi_id_is_malformed() {
        let err = GlyGenLinks::parse(Cursor::new("uniprot_id\tmgi_id\nP1\n"), Path::new("gg.txt"))
            .expect_err("short line");
        assert_eq!(err.code(), crate::error::ErrorCode::MalformedRecord);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn glygen_pairs_are_checked_against_the_report() {
        let links = GlyGenLinks::parse(
            Cursor::new("P1\tMGI:1\nT1\tMGI:1\nP9\tMGI:1\nP1\tMGI:7\n"),
            Path::new("gg.txt"),
        )
        .expect("parse");
        let report = vec![marker("MGI:1", &["P1"], &["T1"], &[])];
        let check = glygen_rows(&report, &links);
        let terms: Vec<&str> = check.rows.iter().map(|row| row.term.as_str()).collect();
        assert_eq!(terms, ["P1", "T1"]);
        assert_eq!(
            check.mismatches,
            [
                ("MGI:1".to_string(), "P9".to_string()),
                ("MGI:7".to_string(), "P1".to_string()),
            ]
        );

        let stamp = AnnotStamp {
            evidence: GLYGEN_EVIDENCE.to_string(),
            reference: "J:345062".to_string(),
            ..stamp()
        };
        assert_eq!(
            check.rows[0].cells(&stamp),
            ["P1", "MGI:1", "J:345062", "NA", "", "", "uniprotload", "10/18/2026", ""]
        );
    }

    #[test]
    fn glygen_error_log_lists_mismatches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gg.err");
        let mismatches = vec![("MGI:1".to_string(), "P9".to_string())];
        write_glygen_errors(&path, &mismatches, "10/18/2026").expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "#\n# Date Generated: 10/18/2026\n#\n\n\n\
             GlyGen Marker/UniProt does not match MGI-UniProt file:\n\nMGI:1, P9\n"
        );
    }

    #[test]
    fn ec_go_rows_carry_the_ec_id() {
        let ec2go = Ec2Go::parse(Cursor::new(
            "EC:1.1.1.1 > GO:a ; GO:0000001\nEC:2.2.2.2 > GO:a ; GO:0000001\n",
        ))
        .expect("parse");
        let report = vec![marker("MGI:1", &["P1"], &[], &["1.1.1.1", "2.2.2.2", "1.1.1.1"])];
        let rows = ec_go_rows(&report, &ec2go);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].term, "GO:0000001");
        assert_eq!(rows[0].inferred_from, "EC:1.1.1.1");
        assert_eq!(rows[1].inferred_from, "EC:2.2.2.2");
    }
}
