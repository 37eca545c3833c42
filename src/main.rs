//! Binary entrypoint for the `speckit-to-issue` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match speckit_to_issue::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
