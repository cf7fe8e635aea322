//! CLI command handler: load settings, run the files, print the report.

use anyhow::Result;
use colored::Colorize;
use log::{debug, warn};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::core::{Report, run_files};
use crate::utils::{apply_file_to_opts, load_flowkit_toml, setup_logging};

/// Merge `.flowkit.toml` from `dir` and CLI flags (flags win) into Opts, then set up logging.
fn setup_opts(cli: &Cli, dir: &Path) -> Opts {
    let mut opts = Opts::default();
    let file = load_flowkit_toml(dir);
    if let Ok(Some(ref file)) = file {
        apply_file_to_opts(file, &mut opts);
    }
    if cli.limit.is_some() {
        opts.limit = cli.limit;
    }
    if cli.above.is_some() {
        opts.above = cli.above;
    }
    opts.serial = cli.serial.unwrap_or(opts.serial);
    opts.json = cli.json.unwrap_or(opts.json);
    opts.verbose = cli.verbose.unwrap_or(opts.verbose);

    setup_logging(opts.verbose);
    if let Err(e) = file {
        warn!("ignoring settings file: {e:#}");
    }
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);
    opts
}

/// Run the files given on the command line and print the outcome.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli, Path::new("."));
    let report = run_files(&cli.files, &opts)?;
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    match report {
        Report::Sums(sums) => {
            for s in sums {
                println!("{}: {}", s.path.display().to_string().cyan(), s.sum);
            }
        }
        Report::Kept(paths) => {
            if paths.is_empty() {
                println!("{}", "No files kept.".yellow());
            }
            for p in paths {
                println!("{}", p.display().to_string().green());
            }
        }
        Report::Total(total) => println!("{} {}", "Total:".bold(), total),
    }
}
