use std::process::ExitCode;

use clap::Parser;
use dynamic_lib::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match dynamic_lib::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
