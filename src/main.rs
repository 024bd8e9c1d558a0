#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match uniprotload::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("uniprotload: {e}");
            ExitCode::from(1)
        }
    }
}
