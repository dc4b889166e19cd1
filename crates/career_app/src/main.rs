use std::process::ExitCode;

use clap::Parser;

mod platform;

fn main() -> ExitCode {
    let cli = platform::cli::Cli::parse();
    match platform::app::run_app(cli) {
        Ok(code) => code,
        Err(err) => {
            career_logging::career_error!("career failed: {:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
