//! Admission driver for bounded runs.
//!
//! Each run owns one [`RunState`] behind a mutex. Admission is event-driven: the completion
//! handler of a finishing item records its outcome and re-runs admission directly, on whatever
//! thread it fired, so a freed slot is refilled without polling. Operations and the final
//! callback are always invoked outside the lock.
//!
//! A thread that is already starting operations for a run does not re-enter admission for that
//! same run: an operation completing synchronously just records its outcome, and the enclosing
//! pass admits for it on its next iteration. Completions on other threads always admit
//! themselves. `admit()` runs under the lock, so concurrent passes never start an item twice.

use log::{debug, trace, warn};
use std::cell::RefCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::state::RunState;
use crate::parallel::{compact, keep_if_truthy};
use crate::truthy::Truthy;
use crate::{Done, Result};

struct Shared<T, R, C> {
    state: RunState<T, R>,
    callback: Option<C>,
}

struct Run<T, R, O, C> {
    shared: Mutex<Shared<T, R, C>>,
    operation: O,
}

impl<T, R, O, C> Run<T, R, O, C> {
    fn lock(&self) -> MutexGuard<'_, Shared<T, R, C>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

thread_local! {
    /// Runs this thread is currently starting operations for, keyed by address.
    static PUMPING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a run as being pumped by the current thread until dropped.
struct PumpGuard {
    key: usize,
}

impl PumpGuard {
    /// None when this thread is already pumping the run keyed `key`.
    fn enter(key: usize) -> Option<Self> {
        PUMPING.with(|pumping| {
            let mut pumping = pumping.borrow_mut();
            if pumping.contains(&key) {
                None
            } else {
                pumping.push(key);
                Some(PumpGuard { key })
            }
        })
    }
}

impl Drop for PumpGuard {
    fn drop(&mut self) {
        PUMPING.with(|pumping| pumping.borrow_mut().retain(|k| *k != self.key));
    }
}

/// Run `operation` over `items` with at most `limit` operations in flight, reporting results in
/// input order.
///
/// Items are admitted FIFO. After the first error no further items are admitted; items
/// already running finish, and the error is reported once they have all settled.
/// `limit == 0` is rejected through `callback` before anything starts.
pub fn run<T, R, O, C>(items: Vec<T>, limit: usize, operation: O, callback: C)
where
    T: Send + 'static,
    R: Send + 'static,
    O: Fn(T, Done<R>) + Send + Sync + 'static,
    C: FnOnce(Result<Vec<R>>) + Send + 'static,
{
    let state = match RunState::new(items, limit) {
        Ok(state) => state,
        Err(err) => {
            debug!("bounded run rejected: {err}");
            callback(Err(err.into()));
            return;
        }
    };
    debug!(
        "bounded run: {} items, limit {}",
        state.total(),
        state.limit()
    );
    let run = Arc::new(Run {
        shared: Mutex::new(Shared {
            state,
            callback: Some(callback),
        }),
        operation,
    });
    pump(&run);
}

/// Bounded map: keeps each operation's result.
pub fn map_limit<T, R, O, C>(items: Vec<T>, limit: usize, operation: O, callback: C)
where
    T: Send + 'static,
    R: Send + 'static,
    O: Fn(T, Done<R>) + Send + Sync + 'static,
    C: FnOnce(Result<Vec<R>>) + Send + 'static,
{
    run(items, limit, operation, callback);
}

/// Bounded filter: keeps each item whose verdict is truthy, in input order.
pub fn filter_limit<T, V, O, C>(items: Vec<T>, limit: usize, predicate: O, callback: C)
where
    T: Clone + Send + 'static,
    V: Truthy + 'static,
    O: Fn(T, Done<V>) + Send + Sync + 'static,
    C: FnOnce(Result<Vec<T>>) + Send + 'static,
{
    run(items, limit, keep_if_truthy(predicate), move |outcome| {
        callback(outcome.map(compact))
    });
}

/// Admit and start items until nothing more can be admitted, then deliver the outcome if the
/// run is finished. Returns immediately when called re-entrantly from an operation this thread
/// is starting for the same run.
fn pump<T, R, O, C>(run: &Arc<Run<T, R, O, C>>)
where
    T: Send + 'static,
    R: Send + 'static,
    O: Fn(T, Done<R>) + Send + Sync + 'static,
    C: FnOnce(Result<Vec<R>>) + Send + 'static,
{
    let Some(_guard) = PumpGuard::enter(Arc::as_ptr(run) as usize) else {
        return;
    };
    loop {
        let admitted = {
            let mut shared = run.lock();
            let admitted = shared.state.admit();
            if admitted.is_empty() {
                let finished = match shared.state.take_outcome() {
                    Some(outcome) => shared.callback.take().map(|callback| (callback, outcome)),
                    None => None,
                };
                drop(shared);
                if let Some((callback, outcome)) = finished {
                    debug!("bounded run done (ok: {})", outcome.is_ok());
                    callback(outcome);
                }
                return;
            }
            trace!(
                "admitting {} items ({} in flight, {} queued)",
                admitted.len(),
                shared.state.in_flight(),
                shared.state.pending()
            );
            admitted
        };
        for (index, item) in admitted {
            let handle = Arc::clone(run);
            (run.operation)(
                item,
                Done::new(move |outcome| settle(&handle, index, outcome)),
            );
        }
    }
}

/// Completion handler for item `index`: record the outcome, then refill the freed slot.
fn settle<T, R, O, C>(run: &Arc<Run<T, R, O, C>>, index: usize, outcome: Result<R>)
where
    T: Send + 'static,
    R: Send + 'static,
    O: Fn(T, Done<R>) + Send + Sync + 'static,
    C: FnOnce(Result<Vec<R>>) + Send + 'static,
{
    {
        let mut shared = run.lock();
        let failed = outcome.is_err();
        let first_failure = failed && !shared.state.has_failed();
        if !shared.state.complete(index, outcome) {
            warn!("ignoring completion for item {index}: not running");
            return;
        }
        if first_failure {
            debug!(
                "item {index} failed; no further admissions, draining {} in flight",
                shared.state.in_flight()
            );
        } else {
            trace!("item {index} settled (failed: {failed})");
        }
    }
    pump(run);
}
