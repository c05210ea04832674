//! Process and timeline models.
//!
//! Provides the data types exchanged between the simulation engine and
//! its callers: immutable process descriptions, the mutable per-run
//! process state, and the recorded CPU timeline.
//!
//! # Lifecycle
//!
//! | State | Entered when |
//! |-------|--------------|
//! | `NotArrived` | Run starts (reset) |
//! | `Ready` | Arrival, I/O completion, preemption, quantum expiry |
//! | `Running` | Dispatched by the engine |
//! | `BlockedOnIo` | Cumulative CPU ticks reach the next I/O request point |
//! | `Completed` | Remaining burst reaches zero (terminal) |

mod process;
mod state;
mod timeline;

pub use process::{IoEpisode, ProcessSpec};
pub use state::{Lifecycle, ProcessState, TickOutcome};
pub use timeline::{Timeline, TimelineInterval};

/// Process identifier. `0` is reserved for CPU-idle timeline intervals.
pub type ProcessId = u32;

/// Simulated time, in ticks since the start of the run.
pub type Tick = u64;

/// Timeline id marking a CPU-idle gap.
pub const IDLE_PROCESS_ID: ProcessId = 0;
