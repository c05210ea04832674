//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::Tick;

/// Externally supplied limits and tuning for a simulation run.
///
/// Missing fields deserialize to their defaults.
///
/// # Example
/// ```
/// use u_procsim::scheduler::SimulationConfig;
///
/// let config = SimulationConfig::default().with_time_quantum(2);
/// assert_eq!(config.time_quantum, 2);
/// assert_eq!(config.max_processes, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round-robin time quantum (ticks).
    pub time_quantum: Tick,
    /// Maximum number of processes per run.
    pub max_processes: usize,
    /// Maximum number of I/O episodes per process.
    pub max_io_episodes: usize,
    /// Watchdog: the run is abandoned once simulated time exceeds this.
    pub tick_limit: Tick,
    /// Merge back-to-back round-robin slices of the same process into
    /// one timeline interval instead of splitting at each quantum.
    pub merge_round_robin_slices: bool,
}

impl SimulationConfig {
    /// Default round-robin quantum.
    pub const DEFAULT_TIME_QUANTUM: Tick = 4;
    /// Default process ceiling.
    pub const DEFAULT_MAX_PROCESSES: usize = 100;
    /// Default I/O episode ceiling per process.
    pub const DEFAULT_MAX_IO_EPISODES: usize = 5;
    /// Default watchdog tick limit.
    pub const DEFAULT_TICK_LIMIT: Tick = 10_000;

    /// Sets the round-robin quantum.
    pub fn with_time_quantum(mut self, time_quantum: Tick) -> Self {
        self.time_quantum = time_quantum;
        self
    }

    /// Sets the process ceiling.
    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes;
        self
    }

    /// Sets the I/O episode ceiling per process.
    pub fn with_max_io_episodes(mut self, max_io_episodes: usize) -> Self {
        self.max_io_episodes = max_io_episodes;
        self
    }

    /// Sets the watchdog tick limit.
    pub fn with_tick_limit(mut self, tick_limit: Tick) -> Self {
        self.tick_limit = tick_limit;
        self
    }

    /// Sets whether consecutive round-robin slices merge.
    pub fn with_merge_round_robin_slices(mut self, merge: bool) -> Self {
        self.merge_round_robin_slices = merge;
        self
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.time_quantum == 0 {
            return Err(SchedulerError::InvalidConfig(
                "time quantum must be at least one tick".into(),
            ));
        }
        if self.max_processes == 0 {
            return Err(SchedulerError::InvalidConfig(
                "process limit must be positive".into(),
            ));
        }
        if self.tick_limit == 0 {
            return Err(SchedulerError::InvalidConfig(
                "tick limit must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_quantum: Self::DEFAULT_TIME_QUANTUM,
            max_processes: Self::DEFAULT_MAX_PROCESSES,
            max_io_episodes: Self::DEFAULT_MAX_IO_EPISODES,
            tick_limit: Self::DEFAULT_TICK_LIMIT,
            merge_round_robin_slices: false,
        }
    }
}
