use std::process::ExitCode;

use clap::Parser;
use todotex::cli::{Arguments, ExitStatus, is_broken_pipe, run};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match run(args) {
        Ok(status) => status.into(),
        Err(err) if is_broken_pipe(&err) => ExitStatus::Success.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
