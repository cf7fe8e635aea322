//! Bounded-concurrency scheduler: run state bookkeeping and the admission driver.

pub mod limit;
pub mod state;

pub use limit::{filter_limit, map_limit, run};
pub use state::{RunPhase, RunState, SlotState};
