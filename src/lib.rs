//! Flowkit: callback-style async control flow with ordered results and bounded concurrency.
//!
//! Every combinator takes operations of the shape `Fn(input, Done<output>)` and reports once,
//! through a single completion callback, either the aggregated result or the first error.

pub mod adapter;
pub mod engine;
pub mod error;
pub mod parallel;
pub mod scheduler;
pub mod serial;
pub mod truthy;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use adapter::make_async;
pub use error::FlowError;
pub use parallel::{filter, map};
pub use scheduler::{filter_limit, map_limit, run};
pub use serial::{Step, serial};
pub use truthy::Truthy;

use crossbeam_channel::bounded;

/// Result alias used by public flowkit API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Block the current thread until the combinator started by `start` reports, and return its outcome.
///
/// `start` receives the completion callback to hand to any combinator:
///
/// ```
/// let doubled = flowkit::wait(|cb| {
///     flowkit::map_limit(vec![1, 2, 3], 2, |n: i32, done: flowkit::Done<i32>| done.ok(n * 2), cb)
/// })
/// .unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
///
/// Returns [`FlowError::Abandoned`] if the callback is dropped without being called.
pub fn wait<T, F>(start: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(Callback<T>),
{
    let (tx, rx) = bounded::<Result<T>>(1);
    start(Box::new(move |outcome| {
        let _ = tx.send(outcome);
    }));
    rx.recv()
        .unwrap_or_else(|_| Err(FlowError::Abandoned.into()))
}
