//! Unlimited parallel map and filter: every item starts immediately, results come back in input order.

use log::{debug, trace, warn};
use std::sync::{Arc, Mutex, PoisonError};

use crate::truthy::Truthy;
use crate::{Done, Result};

/// Outcome slots for one unlimited batch. `callback` is taken by whoever settles the batch.
struct Gather<R, C> {
    results: Vec<Option<R>>,
    remaining: usize,
    callback: Option<C>,
}

/// Run `operation` on every item at once and report the results in input order.
///
/// The first error is reported as soon as it arrives; outcomes from siblings still running are
/// discarded. Empty input reports `Ok(vec![])` immediately.
pub fn map<T, R, O, C>(items: Vec<T>, operation: O, callback: C)
where
    R: Send + 'static,
    O: Fn(T, Done<R>),
    C: FnOnce(Result<Vec<R>>) + Send + 'static,
{
    if items.is_empty() {
        callback(Ok(Vec::new()));
        return;
    }
    let total = items.len();
    debug!("parallel map: launching {total} items");

    let gather = Arc::new(Mutex::new(Gather {
        results: (0..total).map(|_| None).collect(),
        remaining: total,
        callback: Some(callback),
    }));
    for (index, item) in items.into_iter().enumerate() {
        let gather = Arc::clone(&gather);
        operation(
            item,
            Done::new(move |outcome| record(&gather, index, outcome)),
        );
    }
}

/// Run `predicate` on every item at once and report the items with a truthy verdict, in input order.
pub fn filter<T, V, O, C>(items: Vec<T>, predicate: O, callback: C)
where
    T: Clone + Send + 'static,
    V: Truthy + 'static,
    O: Fn(T, Done<V>),
    C: FnOnce(Result<Vec<T>>) + Send + 'static,
{
    map(items, keep_if_truthy(predicate), move |outcome| {
        callback(outcome.map(compact))
    });
}

fn record<R, C>(gather: &Mutex<Gather<R, C>>, index: usize, outcome: Result<R>)
where
    C: FnOnce(Result<Vec<R>>),
{
    let settled = {
        let mut gather = gather.lock().unwrap_or_else(PoisonError::into_inner);
        if gather.callback.is_none() {
            trace!("batch already settled; dropping outcome of item {index}");
            return;
        }
        match outcome {
            Err(err) => {
                debug!("parallel batch failed at item {index}");
                gather.callback.take().map(|callback| (callback, Err(err)))
            }
            Ok(value) => {
                match gather.results.get_mut(index) {
                    Some(slot) if slot.is_none() => *slot = Some(value),
                    _ => {
                        warn!("ignoring repeated outcome for item {index}");
                        return;
                    }
                }
                gather.remaining -= 1;
                if gather.remaining == 0 {
                    let results = std::mem::take(&mut gather.results)
                        .into_iter()
                        .flatten()
                        .collect();
                    gather.callback.take().map(|callback| (callback, Ok(results)))
                } else {
                    None
                }
            }
        }
    };
    if let Some((callback, outcome)) = settled {
        callback(outcome);
    }
}

/// Turn a verdict predicate into an operation that yields `Some(item)` when the verdict is truthy.
/// The returned operation is `Send`/`Sync`/`'static` whenever `predicate` is.
pub(crate) fn keep_if_truthy<T, V, O>(predicate: O) -> impl Fn(T, Done<Option<T>>)
where
    T: Clone + Send + 'static,
    V: Truthy + 'static,
    O: Fn(T, Done<V>),
{
    move |item: T, done: Done<Option<T>>| {
        let probe = item.clone();
        predicate(
            probe,
            done.adapt(move |verdict: V| verdict.is_truthy().then_some(item)),
        );
    }
}

/// Drop the rejected slots of a filter run, keeping relative order.
pub(crate) fn compact<T>(kept: Vec<Option<T>>) -> Vec<T> {
    kept.into_iter().flatten().collect()
}
