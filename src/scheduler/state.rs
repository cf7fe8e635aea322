//! Per-run bookkeeping for a bounded run: admission queue, in-flight count, result slots, first error.
//!
//! [`RunState`] is a plain state machine with no locking and no threads. The driver in
//! [`limit`](super::limit) serializes every call behind one mutex per run.

use anyhow::anyhow;
use std::collections::VecDeque;

use crate::Result;
use crate::error::FlowError;

/// Lifecycle of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Queued,
    Running,
    Completed,
    Failed,
}

/// Lifecycle of the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Free slots and queued items: the next admission pass will start something.
    Admitting,
    /// Every slot is taken; waiting for a completion.
    Saturated,
    /// Nothing left to admit (queue empty or an error latched); waiting for in-flight items.
    Draining,
    /// Every admitted item has settled.
    Done,
}

pub struct RunState<T, R> {
    limit: usize,
    in_flight: usize,
    pending: VecDeque<(usize, T)>,
    slots: Vec<SlotState>,
    results: Vec<Option<R>>,
    first_error: Option<anyhow::Error>,
    delivered: bool,
}

impl<T, R> RunState<T, R> {
    /// Queue `items` in input order. Fails when `limit` is 0.
    pub fn new(items: Vec<T>, limit: usize) -> std::result::Result<Self, FlowError> {
        if limit == 0 {
            return Err(FlowError::InvalidLimit { limit });
        }
        let total = items.len();
        Ok(Self {
            limit,
            in_flight: 0,
            pending: items.into_iter().enumerate().collect(),
            slots: vec![SlotState::Queued; total],
            results: (0..total).map(|_| None).collect(),
            first_error: None,
            delivered: false,
        })
    }

    pub fn total(&self) -> usize {
        self.slots.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn slot(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).copied()
    }

    pub fn has_failed(&self) -> bool {
        self.first_error.is_some()
    }

    /// Pop every item the admission rule allows right now, in FIFO order, marking each `Running`.
    /// Admits nothing once an error is latched.
    pub fn admit(&mut self) -> Vec<(usize, T)> {
        let mut admitted = Vec::new();
        while self.first_error.is_none() && self.in_flight < self.limit {
            let Some((index, item)) = self.pending.pop_front() else {
                break;
            };
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = SlotState::Running;
            }
            self.in_flight += 1;
            admitted.push((index, item));
        }
        admitted
    }

    /// Record the outcome of item `index` and free its slot.
    ///
    /// Returns false, changing nothing, when the item is not running: a repeated signal never
    /// overwrites a recorded outcome or frees a slot twice.
    pub fn complete(&mut self, index: usize, outcome: Result<R>) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if *slot != SlotState::Running {
            return false;
        }
        self.in_flight -= 1;
        match outcome {
            Ok(value) => {
                *slot = SlotState::Completed;
                if let Some(result) = self.results.get_mut(index) {
                    *result = Some(value);
                }
            }
            Err(err) => {
                *slot = SlotState::Failed;
                if self.first_error.is_none() {
                    self.first_error = Some(err);
                }
            }
        }
        true
    }

    pub fn is_finished(&self) -> bool {
        self.in_flight == 0 && (self.pending.is_empty() || self.first_error.is_some())
    }

    pub fn phase(&self) -> RunPhase {
        if self.is_finished() {
            RunPhase::Done
        } else if self.pending.is_empty() || self.first_error.is_some() {
            RunPhase::Draining
        } else if self.in_flight < self.limit {
            RunPhase::Admitting
        } else {
            RunPhase::Saturated
        }
    }

    /// The run's final outcome: the latched error, or every result in input order.
    /// Returns `Some` exactly once, and only after the run is finished.
    pub fn take_outcome(&mut self) -> Option<Result<Vec<R>>> {
        if self.delivered || !self.is_finished() {
            return None;
        }
        self.delivered = true;
        if let Some(err) = self.first_error.take() {
            return Some(Err(err));
        }
        let results = std::mem::take(&mut self.results)
            .into_iter()
            .collect::<Option<Vec<R>>>()
            .ok_or_else(|| anyhow!("bounded run finished with unsettled items"));
        Some(results)
    }
}
