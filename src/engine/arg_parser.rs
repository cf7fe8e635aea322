use clap::Parser;
use std::path::PathBuf;

/// Sum the integers in each file, running files concurrently under a cap.
#[derive(Clone, Parser)]
#[command(name = "flowkit")]
#[command(about = "Sum the integers in each file with bounded concurrency; results keep input order.")]
pub struct Cli {
    /// Files to process. Each must contain whitespace-separated integers.
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Max files processed at once. Default: available threads (clamped).
    #[arg(long, short = 'n', value_parser = clap::value_parser!(usize))]
    pub limit: Option<usize>,

    /// Keep only the files whose sum exceeds this value.
    #[arg(long, short = 'a', allow_hyphen_values = true, value_parser = clap::value_parser!(i64))]
    pub above: Option<i64>,

    /// Fold file sums one file at a time into a running total.
    #[arg(long, short = 's', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub serial: Option<bool>,

    /// Print results as JSON.
    #[arg(long, short = 'j', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
