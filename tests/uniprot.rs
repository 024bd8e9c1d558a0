mod helpers;

use std::path::Path;

use uniprotload::cli::args::{Args, Command, UniprotAssocArgs};
use uniprotload::cli::exit::Outcome;
use uniprotload::orchestrator::run;

fn assoc_args(dir: &Path, input: &Path) -> Args {
    Args {
        json: true,
        command: Command::UniprotAssoc(UniprotAssocArgs {
            input: Some(input.to_path_buf()),
            uniprot_assoc: Some(dir.join("uniprot_assoc.txt")),
            swissprot: Some(dir.join("swissprot.txt")),
            trembl: Some(dir.join("trembl.txt")),
        }),
    }
}

#[test]
fn flat_file_becomes_association_and_id_lists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run(&assoc_args(dir.path(), &helpers::fixture_path("uniprot.dat"))).expect("run");
    assert_eq!(result.outcome, Outcome::Success);

    let assoc = helpers::read_text(&dir.path().join("uniprot_assoc.txt"));
    assert_eq!(
        assoc.lines().collect::<Vec<_>>(),
        [
            "Q9DC51\t14679\tENSMUSG00000000001\tAK000001\t3.6.5.1\t2ODE\tIPR001019\t\
             GTP-binding,Lipoprotein,Nucleotide-binding,Reference proteome",
            "A0A0A0\t\t\tBC000002\t\t\t\t",
        ]
    );
    assert_eq!(helpers::read_text(&dir.path().join("swissprot.txt")), "Q9DC51\n");
    assert_eq!(
        helpers::read_text(&dir.path().join("trembl.txt")),
        "A0A0A0\nZ9Z9Z9\n"
    );

    let value: serde_json::Value = serde_json::from_str(&result.output).expect("json");
    let counts = &value["counts"]["uniprot"];
    assert_eq!(counts["records"], 3);
    assert_eq!(counts["swissprot"], 1);
    assert_eq!(counts["trembl"], 2);
    assert_eq!(counts["written"], 2);
    assert_eq!(counts["skipped"], 1);
}

#[test]
fn missing_flat_file_is_an_io_failure_and_leaves_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run(&assoc_args(dir.path(), &dir.path().join("absent.dat"))).expect("run");
    assert_eq!(result.outcome, Outcome::Failure);
    let value: serde_json::Value = serde_json::from_str(&result.output).expect("json");
    assert_eq!(value["error"]["code"], "E_IO");
    assert!(!dir.path().join("uniprot_assoc.txt").exists());
}

#[test]
fn entry_without_accession_is_a_parse_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("broken.dat");
    std::fs::write(&input, "ID   BROKEN_MOUSE   Reviewed;   10 AA.\nDR   GeneID; 1; -.\n//\n")
        .expect("write");
    let result = run(&assoc_args(dir.path(), &input)).expect("run");
    assert_eq!(result.outcome, Outcome::Failure);
    let value: serde_json::Value = serde_json::from_str(&result.output).expect("json");
    assert_eq!(value["error"]["code"], "E_UNIPROT_PARSE");
    assert!(!dir.path().join("swissprot.txt").exists());
}
