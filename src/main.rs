//! Flowkit CLI: sum integers per file with bounded concurrency; --above filters, --serial folds.

use clap::Parser;
use flowkit::engine::arg_parser::Cli;
use flowkit::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();
    let outcome = handle_run(&cli);
    log::debug!(
        "Processed {} files in {:?}",
        cli.files.len(),
        started.elapsed()
    );
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
