//! Public and internal types: the completion handle shared by every combinator and the CLI options.

use anyhow::Context;
use log::warn;
use std::fmt::Display;

use crate::Result;
use crate::error::FlowError;

/// Boxed completion callback, as handed out by [`wait`](crate::wait).
pub type Callback<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

/// One-shot completion handle passed to every operation.
///
/// Firing consumes the handle, so an operation can report at most once. Dropping the handle
/// without firing it reports [`FlowError::Abandoned`] to whoever is waiting on it, so a run
/// can never hang on an operation that forgot to call back.
pub struct Done<T> {
    sink: Option<Box<dyn FnOnce(Result<T>) + Send>>,
}

impl<T> Done<T> {
    pub fn new<F>(sink: F) -> Self
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    /// Report the operation's outcome.
    pub fn finish(mut self, outcome: Result<T>) {
        if let Some(sink) = self.sink.take() {
            sink(outcome);
        }
    }

    pub fn ok(self, value: T) {
        self.finish(Ok(value));
    }

    pub fn fail<E>(self, err: E)
    where
        E: Into<anyhow::Error>,
    {
        self.finish(Err(err.into()));
    }

    /// Handle for an operation producing `U`; its value is converted with `f` before reaching this handle.
    /// Errors pass through unchanged.
    pub fn adapt<U, F>(self, f: F) -> Done<U>
    where
        T: 'static,
        U: 'static,
        F: FnOnce(U) -> T + Send + 'static,
    {
        Done::new(move |outcome: Result<U>| self.finish(outcome.map(f)))
    }

    /// Handle that attaches `context` to any error before reporting it.
    pub fn with_context<C>(self, context: C) -> Done<T>
    where
        T: 'static,
        C: Display + Send + Sync + 'static,
    {
        Done::new(move |outcome: Result<T>| self.finish(outcome.context(context)))
    }
}

impl<T> Drop for Done<T> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            warn!("completion handle dropped without an outcome");
            sink(Err(FlowError::Abandoned.into()));
        }
    }
}

/// Options for the `flowkit` binary, merged from `.flowkit.toml` and CLI flags.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Max files processed at once. When None, derived from available threads.
    pub limit: Option<usize>,
    /// Filter mode: keep files whose sum exceeds this value.
    pub above: Option<i64>,
    /// Serial mode: fold sums one file at a time into a running total.
    pub serial: bool,
    /// Print results as JSON.
    pub json: bool,
    /// Debug-level logging for this crate.
    pub verbose: bool,
}
