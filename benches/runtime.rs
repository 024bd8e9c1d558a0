// Opt-in runtime harness. Run with: cargo bench --bench runtime
use std::fmt::Write as _;
use std::hint::black_box;
use std::path::Path;
use std::time::{Duration, Instant};

use uniprotload::cli::args::{Args, BucketFilesArgs, BucketsArgs, Command, SeparatorArgs};
use uniprotload::orchestrator;
use uniprotload::report::AssocSchema;

struct Case {
    name: &'static str,
    markers: usize,
}

fn main() {
    let iterations = env_u64("UNIPROTLOAD_RUNTIME_ITERS", 20);
    let warmup = env_u64("UNIPROTLOAD_RUNTIME_WARMUP", 2);
    let budget_ms = env_f64("UNIPROTLOAD_RUNTIME_BUDGET_MS");

    println!("uniprotload runtime harness");
    println!("iterations={iterations} warmup={warmup}");
    if let Some(budget) = budget_ms {
        println!("budget_ms={budget}");
    }

    let cases = [
        Case {
            name: "buckets_small",
            markers: 1_000,
        },
        Case {
            name: "buckets_large",
            markers: 50_000,
        },
    ];

    let mut failed = false;
    for case in &cases {
        let avg_ms = run_case(case, iterations, warmup);
        if let Some(budget) = budget_ms
            && avg_ms > budget
        {
            eprintln!(
                "budget exceeded for {}: avg_ms={:.3} budget_ms={:.3}",
                case.name, avg_ms, budget
            );
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Synthetic catalogs: every fifth marker has no EntrezGene id, every
/// seventh protein has no join ids, and every third protein also carries
/// an Ensembl id shared by two markers so grouped buckets form.
fn write_inputs(dir: &Path, markers: usize) {
    let mut mgi = String::new();
    let mut uniprot = String::new();
    let mut swissprot = String::new();
    for idx in 0..markers {
        let entrez = if idx % 5 == 0 {
            String::new()
        } else {
            format!("{}", 10_000 + idx)
        };
        let ensembl = format!("ENSMUSG{:011}", idx / 2);
        let _ = writeln!(mgi, "MGI:{idx}\tGene{idx}\tGene\t{entrez}\t{ensembl}\t");

        let protein = format!("P{idx:05}");
        let (entrez, ensembl) = if idx % 7 == 0 {
            (String::new(), String::new())
        } else if idx % 3 == 0 {
            (format!("{}", 10_000 + idx), ensembl)
        } else {
            (format!("{}", 10_000 + idx), String::new())
        };
        let _ = writeln!(
            uniprot,
            "{protein}\t{entrez}\t{ensembl}\t\t1.1.1.{}\t\tIPR{idx:06}\t",
            idx % 50
        );
        let _ = writeln!(swissprot, "{protein}");
    }
    std::fs::write(dir.join("mgi.txt"), mgi).expect("write mgi");
    std::fs::write(dir.join("uniprot.txt"), uniprot).expect("write uniprot");
    std::fs::write(dir.join("sp.txt"), swissprot).expect("write swissprot");
    std::fs::write(dir.join("tr.txt"), "").expect("write trembl");
}

fn run_case(case: &Case, iterations: u64, warmup: u64) -> f64 {
    let dir = tempfile::tempdir().expect("tempdir");
    write_inputs(dir.path(), case.markers);
    let args = Args {
        json: false,
        command: Command::Buckets(BucketsArgs {
            mgi_assoc: Some(dir.path().join("mgi.txt")),
            uniprot_assoc: Some(dir.path().join("uniprot.txt")),
            swissprot: Some(dir.path().join("sp.txt")),
            trembl: Some(dir.path().join("tr.txt")),
            buckets: BucketFilesArgs {
                bucket_dir: dir.path().to_path_buf(),
                bucket_prefix: "bucket".to_string(),
            },
            report: Some(dir.path().join("mgi_uniprot.txt")),
            assoc_schema: AssocSchema::V2,
            separator: SeparatorArgs { separator: ',' },
            save_previous: false,
        }),
    };

    for _ in 0..warmup {
        let result = orchestrator::run(&args).expect("warmup run failed");
        black_box(result.output);
    }

    let mut total = Duration::ZERO;
    for _ in 0..iterations {
        let start = Instant::now();
        let result = orchestrator::run(&args).expect("timed run failed");
        black_box(result.output);
        total += start.elapsed();
    }

    let total_ms = total.as_secs_f64() * 1000.0;
    let avg_ms = if iterations == 0 {
        0.0
    } else {
        total_ms / iterations as f64
    };

    println!(
        "case {} ({} markers): avg_ms={:.3} total_ms={:.3}",
        case.name, case.markers, avg_ms, total_ms
    );

    avg_ms
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| *value > 0.0)
}
