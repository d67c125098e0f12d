use std::process::ExitCode;

use clap::Parser;

mod session;

fn main() -> ExitCode {
    let cli = session::Cli::parse();
    match session::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
