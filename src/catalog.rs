//! Field layout of the gene-catalog and protein-catalog association files.

use crate::dataset::Schema;
use crate::error::PipelineError;

pub const MGI_ID: &str = "MGI ID";
pub const SYMBOL: &str = "Symbol";
pub const MARKER_TYPE: &str = "Marker Type";
pub const UNIPROT_ID: &str = "UniProt ID";
pub const ENTREZGENE_ID: &str = "EntrezGene ID";
pub const ENSEMBL_ID: &str = "Ensembl ID";
pub const EMBL_ID: &str = "EMBL ID";
pub const EC: &str = "EC";
pub const PDB: &str = "PDB";
pub const INTERPRO_ID: &str = "InterPro ID";
pub const SPKW_NAME: &str = "SPKW name";

pub const MGI_FIELDS: [&str; 6] = [
    MGI_ID,
    SYMBOL,
    MARKER_TYPE,
    ENTREZGENE_ID,
    ENSEMBL_ID,
    EMBL_ID,
];

pub const UNIPROT_FIELDS: [&str; 8] = [
    UNIPROT_ID,
    ENTREZGENE_ID,
    ENSEMBL_ID,
    EMBL_ID,
    EC,
    PDB,
    INTERPRO_ID,
    SPKW_NAME,
];

/// Join fields, matched pairwise on both sides.
pub const JOIN_FIELDS: [&str; 3] = [ENTREZGENE_ID, ENSEMBL_ID, EMBL_ID];

/// Gene-side projection for bucket files.
pub const MGI_PROJECTION: [&str; 6] = MGI_FIELDS;

/// Gene-side projection for the bucket summary section.
pub const MGI_SUMMARY_PROJECTION: [&str; 5] = [MGI_ID, SYMBOL, ENTREZGENE_ID, ENSEMBL_ID, EMBL_ID];

/// Protein-side projection for bucket files.
pub const UNIPROT_PROJECTION: [&str; 4] = [UNIPROT_ID, ENTREZGENE_ID, ENSEMBL_ID, EMBL_ID];

pub fn mgi_schema() -> Result<Schema, PipelineError> {
    Schema::new(&MGI_FIELDS, &JOIN_FIELDS)
}

/// Every accession column of the protein file is a list.
pub fn uniprot_schema() -> Result<Schema, PipelineError> {
    Schema::new(&UNIPROT_FIELDS, &UNIPROT_FIELDS[1..])
}
