//! File operations used by the CLI: the caller-side work the combinators schedule.

use log::trace;
use std::path::PathBuf;

use crate::{Done, make_async};

/// Sum the whitespace-separated integers in `text`. Tokens that are not integers are skipped.
pub fn sum_numbers(text: String) -> i64 {
    text.split_whitespace()
        .filter_map(|token| match token.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                trace!("skipping non-integer token {token:?}");
                None
            }
        })
        .fold(0_i64, i64::saturating_add)
}

/// Operation: read the file on the rayon pool and report the sum of its integers.
/// An empty file reports "missing input"; read errors carry the path.
pub fn file_sum_operation() -> impl Fn(PathBuf, Done<i64>) + Clone + Send + Sync + 'static {
    let parse = make_async(sum_numbers);
    move |path: PathBuf, done: Done<i64>| {
        let parse = parse.clone();
        rayon::spawn(move || {
            let done = done.with_context(path.display().to_string());
            match std::fs::read_to_string(&path) {
                Ok(text) => parse(text, done),
                Err(err) => done.fail(err),
            }
        });
    }
}
