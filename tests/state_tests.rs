//! RunState: admission rule, idempotent completion, phases, outcome delivery. No threads involved.

use flowkit::FlowError;
use flowkit::scheduler::{RunPhase, RunState, SlotState};

fn indices<T>(admitted: &[(usize, T)]) -> Vec<usize> {
    admitted.iter().map(|(i, _)| *i).collect()
}

#[test]
fn test_new_rejects_zero_limit() {
    let err = RunState::<u8, u8>::new(vec![1, 2], 0).err();
    assert_eq!(err, Some(FlowError::InvalidLimit { limit: 0 }));
}

#[test]
fn test_admit_fills_up_to_limit_in_order() {
    let mut state = RunState::<char, char>::new(vec!['a', 'b', 'c', 'd', 'e'], 2).unwrap();
    assert_eq!(state.phase(), RunPhase::Admitting);

    let admitted = state.admit();
    assert_eq!(admitted, vec![(0, 'a'), (1, 'b')]);
    assert_eq!(state.in_flight(), 2);
    assert_eq!(state.pending(), 3);
    assert_eq!(state.phase(), RunPhase::Saturated);
    assert!(state.admit().is_empty());
}

#[test]
fn test_completion_frees_one_slot() {
    let mut state = RunState::<u32, u32>::new(vec![10, 20, 30, 40], 2).unwrap();
    state.admit();

    assert!(state.complete(1, Ok(21)));
    assert_eq!(state.slot(1), Some(SlotState::Completed));
    assert_eq!(state.in_flight(), 1);
    assert_eq!(indices(&state.admit()), vec![2]);
    assert_eq!(state.in_flight(), 2);
    assert_eq!(state.in_flight() + state.pending() + 1, state.total());
}

#[test]
fn test_duplicate_completion_is_ignored() {
    let mut state = RunState::<u32, u32>::new(vec![1, 2, 3], 1).unwrap();
    state.admit();
    assert!(state.complete(0, Ok(100)));
    assert!(!state.complete(0, Ok(999)));
    assert!(!state.complete(0, Err(anyhow::anyhow!("late"))));
    assert_eq!(state.in_flight(), 0);
    assert!(!state.has_failed());
}

#[test]
fn test_completion_for_queued_or_unknown_index_is_ignored() {
    let mut state = RunState::<u32, u32>::new(vec![1, 2, 3], 1).unwrap();
    state.admit();
    assert!(!state.complete(2, Ok(3)));
    assert!(!state.complete(42, Ok(3)));
    assert_eq!(state.slot(2), Some(SlotState::Queued));
    assert_eq!(state.slot(42), None);
    assert_eq!(state.in_flight(), 1);
}

#[test]
fn test_error_latches_and_stops_admission() {
    let mut state = RunState::<u32, u32>::new(vec![1, 2, 3, 4], 2).unwrap();
    state.admit();

    assert!(state.complete(0, Err(anyhow::anyhow!("first"))));
    assert_eq!(state.slot(0), Some(SlotState::Failed));
    assert!(state.has_failed());
    assert!(state.admit().is_empty());
    assert_eq!(state.phase(), RunPhase::Draining);
    assert!(state.take_outcome().is_none());

    // A later failure does not replace the latched error.
    assert!(state.complete(1, Err(anyhow::anyhow!("second"))));
    assert_eq!(state.phase(), RunPhase::Done);
    let err = state.take_outcome().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "first");
    assert_eq!(state.slot(2), Some(SlotState::Queued));
}

#[test]
fn test_error_after_success_cannot_overwrite_recorded_result() {
    let mut state = RunState::<u32, u32>::new(vec![1], 1).unwrap();
    state.admit();
    assert!(state.complete(0, Ok(2)));
    assert!(!state.complete(0, Err(anyhow::anyhow!("late failure"))));
    assert_eq!(state.take_outcome().unwrap().unwrap(), vec![2]);
}

#[test]
fn test_outcome_in_input_order_and_delivered_once() {
    let mut state = RunState::<u32, u32>::new(vec![1, 2, 3], 3).unwrap();
    state.admit();
    assert_eq!(state.phase(), RunPhase::Draining);
    assert!(state.complete(2, Ok(30)));
    assert!(state.complete(0, Ok(10)));
    assert!(state.take_outcome().is_none());
    assert!(state.complete(1, Ok(20)));

    assert!(state.is_finished());
    assert_eq!(state.take_outcome().unwrap().unwrap(), vec![10, 20, 30]);
    assert!(state.take_outcome().is_none());
}

#[test]
fn test_empty_run_is_immediately_done() {
    let mut state = RunState::<u32, u32>::new(Vec::new(), 4).unwrap();
    assert_eq!(state.phase(), RunPhase::Done);
    assert!(state.admit().is_empty());
    assert_eq!(state.take_outcome().unwrap().unwrap(), Vec::<u32>::new());
}
