//! Serial chains: run steps one at a time, feeding each result into the next step.

use log::{debug, trace};
use std::vec::IntoIter;

use crate::error::FlowError;
use crate::{Done, Result};

/// One link of a serial chain.
///
/// The first step has no input and must be a [`Step::Start`]; every later step receives the
/// previous result and must be a [`Step::Then`].
pub enum Step<V> {
    Start(Box<dyn FnOnce(Done<V>) + Send>),
    Then(Box<dyn FnOnce(V, Done<V>) + Send>),
}

impl<V> Step<V> {
    pub fn start<F>(f: F) -> Self
    where
        F: FnOnce(Done<V>) + Send + 'static,
    {
        Step::Start(Box::new(f))
    }

    pub fn then<F>(f: F) -> Self
    where
        F: FnOnce(V, Done<V>) + Send + 'static,
    {
        Step::Then(Box::new(f))
    }

    /// Whether this step's shape is valid at `index` in the chain.
    fn fits(&self, index: usize) -> bool {
        match self {
            Step::Start(_) => index == 0,
            Step::Then(_) => index > 0,
        }
    }
}

fn expected_shape(index: usize) -> &'static str {
    if index == 0 { "start" } else { "then" }
}

/// Run `steps` strictly in order and report the last step's result.
///
/// An empty chain reports `V::default()`. A misplaced step is rejected before anything runs;
/// the first step error aborts the rest of the chain.
pub fn serial<V, C>(steps: Vec<Step<V>>, callback: C)
where
    V: Default + Send + 'static,
    C: FnOnce(Result<V>) + Send + 'static,
{
    if let Some(index) = steps
        .iter()
        .enumerate()
        .position(|(index, step)| !step.fits(index))
    {
        callback(Err(FlowError::InvalidStep {
            index,
            expected: expected_shape(index),
        }
        .into()));
        return;
    }

    let mut rest = steps.into_iter();
    match rest.next() {
        None => callback(Ok(V::default())),
        Some(Step::Start(first)) => {
            debug!("serial chain: {} steps", rest.len() + 1);
            first(Done::new(move |outcome| resume(rest, 1, outcome, callback)));
        }
        Some(Step::Then(_)) => callback(Err(FlowError::InvalidStep {
            index: 0,
            expected: expected_shape(0),
        }
        .into())),
    }
}

/// Continue the chain after step `index - 1` reported `outcome`.
fn resume<V, C>(mut rest: IntoIter<Step<V>>, index: usize, outcome: Result<V>, callback: C)
where
    V: Send + 'static,
    C: FnOnce(Result<V>) + Send + 'static,
{
    let previous = match outcome {
        Ok(value) => value,
        Err(err) => {
            debug!("serial chain aborted at step {}", index - 1);
            callback(Err(err));
            return;
        }
    };
    match rest.next() {
        None => {
            trace!("serial chain finished after {index} steps");
            callback(Ok(previous));
        }
        Some(Step::Then(step)) => {
            step(
                previous,
                Done::new(move |outcome| resume(rest, index + 1, outcome, callback)),
            );
        }
        Some(Step::Start(_)) => callback(Err(FlowError::InvalidStep {
            index,
            expected: expected_shape(index),
        }
        .into())),
    }
}
