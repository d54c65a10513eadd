//! dupesweep - concurrent duplicate file remover
//!
//! Entry point for the dupesweep CLI application.

use clap::Parser;
use dupesweep::{cli::Cli, error::ExitCode};

fn main() {
    let cli = Cli::parse();

    match dupesweep::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
