mod helpers;

use std::path::Path;

use uniprotload::cli::args::{Args, Command, OverrideQcArgs};
use uniprotload::cli::exit::{Outcome, exit_code};
use uniprotload::orchestrator::run;

fn qc_args(dir: &Path, input: &str, json: bool) -> Args {
    Args {
        json,
        command: Command::OverrideQc(OverrideQcArgs {
            input: Some(helpers::fixture_path(input)),
            qc_report: Some(dir.join("qc.rpt")),
            to_load: Some(dir.join("toload.txt")),
            mgi_assoc: Some(helpers::fixture_path("mgi_assoc.txt")),
            report: Some(helpers::fixture_path("mgi_uniprot.txt")),
        }),
    }
}

#[test]
fn association_errors_are_reported_and_clean_rows_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run(&qc_args(dir.path(), "override.txt", false)).expect("run");
    assert_eq!(result.outcome, Outcome::QcWarnings);
    assert_eq!(exit_code(result.outcome), 2);

    assert_eq!(
        helpers::read_text(&dir.path().join("toload.txt")),
        "P7\tMGI:5\ts\tadd\nP7\tMGI:2\tt\tadd\n"
    );

    let report = helpers::read_text(&dir.path().join("qc.rpt"));
    assert!(report.contains("UniProt ID listed twice in file. These will be loaded:"));
    assert!(report.contains("1: P7\tMGI:5\ts\tadd\n"));
    assert!(report.contains("5: P7\tMGI:2\tt\tadd\n"));
    assert!(report.contains("Add associations that already exist."));
    assert!(report.contains("2: P1\tMGI:1\ts\tadd\n"));
    assert!(report.contains("Delete associations that do not exist."));
    assert!(report.contains("3: P9\tMGI:1\ts\tdelete\n"));
    assert!(report.contains("Input lines where MGI ID does not exist."));
    assert!(report.contains("4: P8\tMGI:99\tt\tadd\n"));
    assert!(!report.contains("< 4 columns"));
}

#[test]
fn json_summary_counts_each_violation_kind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run(&qc_args(dir.path(), "override.txt", true)).expect("run");
    let value: serde_json::Value = serde_json::from_str(&result.output).expect("json");
    assert_eq!(value["step"], "override_qc");
    assert_eq!(value["outcome"], "QC_WARNINGS");
    assert_eq!(value["counts"]["qc"]["rows"], 5);
    assert_eq!(value["counts"]["qc"]["to_load"], 2);

    let violations = value["counts"]["qc"]["violations"]
        .as_array()
        .expect("violations");
    let count = |kind: &str| {
        violations
            .iter()
            .find(|entry| entry["kind"] == kind)
            .map(|entry| entry["count"].clone())
    };
    assert_eq!(count("DUPLICATE_UNIPROT"), Some(2.into()));
    assert_eq!(count("ADD_EXISTS"), Some(1.into()));
    assert_eq!(count("DELETE_MISSING"), Some(1.into()));
    assert_eq!(count("UNKNOWN_MGI_ID"), Some(1.into()));
}

#[test]
fn fatal_rows_block_the_load_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run(&qc_args(dir.path(), "override_fatal.txt", false)).expect("run");
    assert_eq!(result.outcome, Outcome::QcFatal);
    assert_eq!(exit_code(result.outcome), 3);
    assert!(!dir.path().join("toload.txt").exists());

    let report = helpers::read_text(&dir.path().join("qc.rpt"));
    assert!(report.contains("These errors must be fixed before publishing"));
    assert!(report.contains("2: P1\tMGI:1\tx\tadd\n"));
}
