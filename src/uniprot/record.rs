use crate::dataset::split::join_multi;

/// Accessions extracted from one UniProt entry.
///
/// Every list keeps first-seen order without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniProtRecord {
    pub uniprot_id: String,
    /// Set by an `ID` line marked `Unreviewed;`.
    pub is_trembl: bool,
    pub entrezgene: Vec<String>,
    pub ensembl: Vec<String>,
    pub embl: Vec<String>,
    pub ec: Vec<String>,
    pub pdb: Vec<String>,
    pub interpro: Vec<String>,
    pub keywords: Vec<String>,
}

impl UniProtRecord {
    /// True when the entry can be joined against the gene catalog.
    pub fn has_join_ids(&self) -> bool {
        !(self.entrezgene.is_empty() && self.ensembl.is_empty() && self.embl.is_empty())
    }

    /// The eight association-file cells.
    pub fn assoc_cells(&self) -> [String; 8] {
        [
            self.uniprot_id.clone(),
            join_multi(&self.entrezgene),
            join_multi(&self.ensembl),
            join_multi(&self.embl),
            join_multi(&self.ec),
            join_multi(&self.pdb),
            join_multi(&self.interpro),
            join_multi(&self.keywords),
        ]
    }
}

pub(crate) fn push_distinct(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_distinct_keeps_first_seen_order() {
        let mut list = Vec::new();
        push_distinct(&mut list, "B");
        push_distinct(&mut list, "A");
        push_distinct(&mut list, "B");
        push_distinct(&mut list, "");
        assert_eq!(list, ["B", "A"]);
    }

    #[test]
    fn join_ids_require_a_catalog_link() {
        let mut record = UniProtRecord {
            uniprot_id: "P1".to_string(),
            pdb: vec!["1ABC".to_string()],
            ..UniProtRecord::default()
        };
        assert!(!record.has_join_ids());
        record.embl.push("AK000001".to_string());
        assert!(record.has_join_ids());
        assert_eq!(record.assoc_cells()[3], "AK000001");
    }
}
