#![allow(dead_code)]

use std::path::{Path, PathBuf};

use uniprotload::cli::args::{Args, BucketFilesArgs, BucketsArgs, Command, SeparatorArgs};
use uniprotload::report::AssocSchema;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn read_fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("fixture should be readable")
}

pub fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path).expect("output should be readable")
}

/// `buckets` arguments over the fixture catalogs, writing into `dir`.
pub fn buckets_args(dir: &Path, mgi: PathBuf, save_previous: bool) -> Args {
    Args {
        json: false,
        command: Command::Buckets(BucketsArgs {
            mgi_assoc: Some(mgi),
            uniprot_assoc: Some(fixture_path("uniprot_assoc.txt")),
            swissprot: Some(fixture_path("swissprot.txt")),
            trembl: Some(fixture_path("trembl.txt")),
            buckets: BucketFilesArgs {
                bucket_dir: dir.to_path_buf(),
                bucket_prefix: "bucket".to_string(),
            },
            report: Some(dir.join("mgi_uniprot.txt")),
            assoc_schema: AssocSchema::V2,
            separator: SeparatorArgs { separator: ',' },
            save_previous,
        }),
    }
}
