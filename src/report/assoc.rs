//! MGI/UniProt association report.
//!
//! Responsibilities:
//! - collect UniProt ids per MGI id from the 1:1, 1:N and N:1 buckets
//! - split them into SwissProt and TrEMBL columns by the id lists
//! - write and read the report under a versioned column set

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::bucket::Bucketizer;
use crate::catalog::{EC, MGI_ID, PDB, UNIPROT_ID};
use crate::dataset::input::strip_utf8_bom;
use crate::dataset::split::join_multi;
use crate::dataset::{LoadOptions, RowKey, Schema, TableDataset};
use crate::error::PipelineError;

use super::files::OutputFile;

const MGI: &str = "MGI";
const SWISS_PROT: &str = "SWISS-PROT";
const TREMBL: &str = "TrEMBL";

/// Column set of the association report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssocSchema {
    /// `MGI, SWISS-PROT, TrEMBL`
    V1,
    /// `MGI, SWISS-PROT, TrEMBL, EC, PDB`
    #[default]
    V2,
}

impl AssocSchema {
    pub const ALL: [AssocSchema; 2] = [AssocSchema::V1, AssocSchema::V2];

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            AssocSchema::V1 => &[MGI, SWISS_PROT, TREMBL],
            AssocSchema::V2 => &[MGI, SWISS_PROT, TREMBL, EC, PDB],
        }
    }

    pub fn header(self) -> String {
        self.columns().join("\t")
    }

    pub fn from_header(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|schema| schema.header() == line)
    }
}

/// SwissProt and TrEMBL id lists.
#[derive(Debug, Clone, Default)]
pub struct UniProtKinds {
    swissprot: HashSet<String>,
    trembl: HashSet<String>,
}

impl UniProtKinds {
    pub fn new<I, J>(swissprot: I, trembl: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        Self {
            swissprot: swissprot.into_iter().collect(),
            trembl: trembl.into_iter().collect(),
        }
    }

    /// Read both id lists, one id per line.
    pub fn load(swissprot: &Path, trembl: &Path) -> Result<Self, PipelineError> {
        Ok(Self::new(read_id_list(swissprot)?, read_id_list(trembl)?))
    }

    pub fn is_swissprot(&self, id: &str) -> bool {
        self.swissprot.contains(id)
    }

    pub fn is_trembl(&self, id: &str) -> bool {
        self.trembl.contains(id)
    }
}

pub fn read_id_list(path: &Path) -> Result<Vec<String>, PipelineError> {
    let text = fs::read_to_string(path).map_err(|err| PipelineError::io(path, err))?;
    Ok(text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// One report row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssocRow {
    pub mgi_id: String,
    pub swissprot: Vec<String>,
    pub trembl: Vec<String>,
    pub ec: Vec<String>,
    pub pdb: Vec<String>,
}

impl AssocRow {
    pub fn cells(&self, schema: AssocSchema) -> Vec<String> {
        let mut cells = vec![
            self.mgi_id.clone(),
            join_multi(&self.swissprot),
            join_multi(&self.trembl),
        ];
        if schema == AssocSchema::V2 {
            cells.push(join_multi(&self.ec));
            cells.push(join_multi(&self.pdb));
        }
        cells
    }

    pub fn uniprot_ids(&self) -> impl Iterator<Item = &str> {
        self.swissprot
            .iter()
            .chain(self.trembl.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Default)]
struct Collected {
    uniprot: Vec<String>,
    ec: Vec<String>,
    pdb: Vec<String>,
}

fn push_distinct(list: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !list.contains(value) {
            list.push(value.clone());
        }
    }
}

/// Build report rows, sorted by MGI id.
pub fn build_rows(
    bucketizer: &Bucketizer<'_>,
    kinds: &UniProtKinds,
) -> Result<Vec<AssocRow>, PipelineError> {
    let partition = bucketizer.partition()?;
    let mgi = bucketizer.left();
    let uniprot = bucketizer.right();
    let mgi_id = mgi.schema().field(MGI_ID)?;
    let uniprot_id = uniprot.schema().field(UNIPROT_ID)?;
    let ec = uniprot.schema().field(EC)?;
    let pdb = uniprot.schema().field(PDB)?;

    let mut collected: BTreeMap<String, Collected> = BTreeMap::new();
    let mut link = |left: RowKey, right: RowKey| {
        // Partition keys always resolve against their own dataset.
        let (Some(gene), Some(protein)) = (mgi.get_record(left), uniprot.get_record(right)) else {
            return;
        };
        let entry = collected.entry(gene.text(mgi_id)).or_default();
        push_distinct(&mut entry.uniprot, protein.list(uniprot_id));
        push_distinct(&mut entry.ec, protein.list(ec));
        push_distinct(&mut entry.pdb, protein.list(pdb));
    };

    for (left, right) in &partition.one_one {
        link(*left, *right);
    }
    for (left, rights) in &partition.one_n {
        for right in rights {
            link(*left, *right);
        }
    }
    for (lefts, right) in &partition.n_one {
        for left in lefts {
            link(*left, *right);
        }
    }

    Ok(collected
        .into_iter()
        .map(|(mgi_id, mut entry)| {
            entry.uniprot.sort();
            AssocRow {
                swissprot: entry
                    .uniprot
                    .iter()
                    .filter(|id| kinds.is_swissprot(id))
                    .cloned()
                    .collect(),
                trembl: entry
                    .uniprot
                    .iter()
                    .filter(|id| kinds.is_trembl(id))
                    .cloned()
                    .collect(),
                mgi_id,
                ec: entry.ec,
                pdb: entry.pdb,
            }
        })
        .collect())
}

pub fn write_report(
    path: &Path,
    schema: AssocSchema,
    rows: &[AssocRow],
) -> Result<(), PipelineError> {
    let mut out = OutputFile::create(path)?;
    out.write_line(&schema.header())?;
    for row in rows {
        out.write_row(&row.cells(schema))?;
    }
    out.commit()
}

/// Read a report back; the header decides the column set.
pub fn read_report(path: &Path) -> Result<(AssocSchema, Vec<AssocRow>), PipelineError> {
    let bytes = fs::read(path).map_err(|err| PipelineError::io(path, err))?;
    let body = strip_utf8_bom(&bytes);
    let first = body.split(|byte| *byte == b'\n').next().unwrap_or_default();
    let header = String::from_utf8_lossy(first).trim_end_matches('\r').to_string();
    let schema = AssocSchema::from_header(&header).ok_or_else(|| PipelineError::AssocSchema {
        path: path.to_path_buf(),
        header: header.clone(),
    })?;

    let columns = schema.columns();
    let fields = Schema::new(columns, &columns[1..])?;
    let options = LoadOptions {
        skip_header: true,
        ..LoadOptions::default()
    };
    let name = path.display().to_string();
    let table = TableDataset::load(&name, fields, Cursor::new(bytes.as_slice()), options)?;

    let schema_ref = table.schema();
    let ids: Vec<_> = schema_ref.ids().collect();
    let rows = table
        .records()
        .iter()
        .map(|record| {
            let list = |idx: usize| {
                ids.get(idx)
                    .map(|field| record.list(*field).to_vec())
                    .unwrap_or_default()
            };
            AssocRow {
                mgi_id: record.text(ids[0]),
                swissprot: list(1),
                trembl: list(2),
                ec: list(3),
                pdb: list(4),
            }
        })
        .collect();
    Ok((schema, rows))
}
