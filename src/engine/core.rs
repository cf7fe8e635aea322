//! Run the CLI's file operation through the combinators selected by [`Opts`].

use anyhow::Result;
use log::debug;
use serde::Serialize;
use std::path::PathBuf;

use super::tools::file_sum_operation;
use crate::utils::config::ConcurrencyLimits;
use crate::{Done, Opts, Step, filter_limit, map_limit, serial, wait};

/// Sum of one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileSum {
    pub path: PathBuf,
    pub sum: i64,
}

/// What a run produced, by mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    /// Default mode: every file's sum, in input order.
    Sums(Vec<FileSum>),
    /// `above` mode: files whose sum exceeds the threshold, in input order.
    Kept(Vec<PathBuf>),
    /// `serial` mode: running total over all files.
    Total(i64),
}

/// Process `files` according to `opts` and block until the combinator reports.
pub fn run_files(files: &[PathBuf], opts: &Opts) -> Result<Report> {
    let limit = opts
        .limit
        .unwrap_or_else(|| ConcurrencyLimits::current().default_limit());
    let sum_file = file_sum_operation();

    if opts.serial {
        debug!("serial total over {} files", files.len());
        let steps: Vec<Step<i64>> = files
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, path)| {
                let sum_file = sum_file.clone();
                if i == 0 {
                    Step::start(move |done: Done<i64>| sum_file(path, done))
                } else {
                    Step::then(move |total: i64, done: Done<i64>| {
                        sum_file(path, done.adapt(move |sum: i64| total.saturating_add(sum)))
                    })
                }
            })
            .collect();
        return wait(|cb| serial(steps, cb)).map(Report::Total);
    }

    if let Some(above) = opts.above {
        debug!("keeping files with sum > {above} (limit {limit})");
        let exceeds = move |path: PathBuf, done: Done<bool>| {
            sum_file(path, done.adapt(move |sum: i64| sum > above))
        };
        return wait(|cb| filter_limit(files.to_vec(), limit, exceeds, cb)).map(Report::Kept);
    }

    debug!("summing {} files (limit {limit})", files.len());
    let sums = wait(|cb| map_limit(files.to_vec(), limit, sum_file, cb))?;
    Ok(Report::Sums(
        files
            .iter()
            .cloned()
            .zip(sums)
            .map(|(path, sum)| FileSum { path, sum })
            .collect(),
    ))
}
