//! Process (static description) model.
//!
//! A process spec is the immutable input to a simulation run. Every run
//! derives fresh [`ProcessState`](super::ProcessState) values from it.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Tick};

/// One I/O wait inside a process's CPU burst.
///
/// `request_at` is counted in *cumulative* CPU ticks consumed by the
/// process, so an episode fires exactly once no matter how often the
/// process is preempted before reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoEpisode {
    /// Cumulative CPU ticks after which the I/O request is issued.
    pub request_at: Tick,
    /// Ticks spent blocked on I/O.
    pub duration: Tick,
}

impl IoEpisode {
    /// Creates an I/O episode.
    pub fn new(request_at: Tick, duration: Tick) -> Self {
        Self {
            request_at,
            duration,
        }
    }
}

/// Immutable description of a simulated process.
///
/// # Example
/// ```
/// use u_procsim::models::ProcessSpec;
///
/// let spec = ProcessSpec::new(1, 0, 10)
///     .with_priority(3)
///     .with_io(4, 2)
///     .with_io(7, 3);
/// assert_eq!(spec.total_io_time(), 5);
/// assert_eq!(spec.io_episodes.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier (non-zero).
    pub id: ProcessId,
    /// Tick at which the process becomes ready.
    pub arrival_time: Tick,
    /// Total CPU ticks the process needs.
    pub total_burst: Tick,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// I/O episodes in increasing `request_at` order.
    #[serde(default)]
    pub io_episodes: Vec<IoEpisode>,
}

impl ProcessSpec {
    /// Creates a process spec with priority 0 and no I/O.
    pub fn new(id: ProcessId, arrival_time: Tick, total_burst: Tick) -> Self {
        Self {
            id,
            arrival_time,
            total_burst,
            priority: 0,
            io_episodes: Vec::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Appends an I/O episode.
    pub fn with_io(mut self, request_at: Tick, duration: Tick) -> Self {
        self.io_episodes.push(IoEpisode::new(request_at, duration));
        self
    }

    /// Total ticks spent blocked on I/O across all episodes.
    pub fn total_io_time(&self) -> Tick {
        self.io_episodes
            .iter()
            .fold(0, |total: Tick, e| total.saturating_add(e.duration))
    }

    /// Whether the process performs any I/O.
    pub fn has_io(&self) -> bool {
        !self.io_episodes.is_empty()
    }
}
