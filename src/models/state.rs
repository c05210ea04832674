//! Per-run mutable process state.

use serde::{Deserialize, Serialize};

use super::{ProcessId, ProcessSpec, Tick};

/// Lifecycle of a process within one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Arrival time not reached yet.
    NotArrived,
    /// Waiting in the ready queue.
    Ready,
    /// Holding the CPU.
    Running,
    /// Waiting in the I/O queue.
    BlockedOnIo,
    /// All CPU work done. Terminal.
    Completed,
}

/// Result of advancing a running process by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still runnable.
    Continuing,
    /// Reached an I/O request point and left the CPU.
    Blocked,
    /// Finished its last CPU tick.
    Completed,
}

/// Mutable simulation state of one process.
///
/// Created by [`ProcessState::from_spec`] at the start of every run and
/// only mutated by the engine afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// The immutable description this state was derived from.
    pub spec: ProcessSpec,
    /// CPU ticks still needed.
    pub remaining_burst: Tick,
    /// CPU ticks consumed since the last I/O return (or since arrival).
    pub ticks_consumed_this_episode: Tick,
    /// CPU ticks consumed in total.
    pub total_ticks_consumed: Tick,
    /// Index of the next I/O episode to trigger.
    pub next_io_episode: usize,
    /// Current lifecycle state.
    pub lifecycle: Lifecycle,
    /// Tick at which the pending I/O completes.
    pub io_completes_at: Tick,
    /// Whether the process was ever dispatched.
    pub started_execution: bool,
    /// Tick of the first dispatch.
    pub first_dispatch_time: Option<Tick>,
    /// Arrival-to-first-dispatch delay, fixed at first dispatch.
    pub response_time: Option<Tick>,
    /// Tick at which the last CPU tick finished.
    pub completion_time: Option<Tick>,
    /// Ticks spent in the ready queue, summed over all dispatches.
    pub accumulated_waiting: Tick,
    /// Tick of the latest ready-queue entry.
    pub last_queue_entry_time: Tick,
    /// Consecutive ticks in the current slice (round-robin quantum).
    pub quantum_used: Tick,
}

impl ProcessState {
    /// Derives a fresh state from a spec.
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            spec: spec.clone(),
            remaining_burst: spec.total_burst,
            ticks_consumed_this_episode: 0,
            total_ticks_consumed: 0,
            next_io_episode: 0,
            lifecycle: Lifecycle::NotArrived,
            io_completes_at: 0,
            started_execution: false,
            first_dispatch_time: None,
            response_time: None,
            completion_time: None,
            accumulated_waiting: 0,
            last_queue_entry_time: spec.arrival_time,
            quantum_used: 0,
        }
    }

    /// Process id.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.spec.id
    }

    /// Arrival tick.
    #[inline]
    pub fn arrival_time(&self) -> Tick {
        self.spec.arrival_time
    }

    /// Priority (lower = more urgent).
    #[inline]
    pub fn priority(&self) -> i32 {
        self.spec.priority
    }

    /// Whether the process reached the terminal state.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.lifecycle == Lifecycle::Completed
    }

    /// Puts the process into the ready state, entering the queue at `now`.
    pub fn make_ready(&mut self, now: Tick) {
        self.lifecycle = Lifecycle::Ready;
        self.last_queue_entry_time = now;
    }

    /// Marks the process as dispatched at `now`.
    ///
    /// Records the response time on the first dispatch only and adds the
    /// time since the last queue entry to the accumulated waiting time.
    pub fn dispatch(&mut self, now: Tick) {
        self.lifecycle = Lifecycle::Running;
        if !self.started_execution {
            self.started_execution = true;
            self.first_dispatch_time = Some(now);
            self.response_time = Some(now.saturating_sub(self.spec.arrival_time));
        }
        self.accumulated_waiting += now.saturating_sub(self.last_queue_entry_time);
        self.quantum_used = 0;
    }

    /// Advances the running process by one CPU tick starting at `now`.
    ///
    /// An I/O request point takes precedence over completion; validated
    /// specs never place a request on the final tick.
    pub fn advance_tick(&mut self, now: Tick) -> TickOutcome {
        self.remaining_burst = self.remaining_burst.saturating_sub(1);
        self.ticks_consumed_this_episode += 1;
        self.total_ticks_consumed += 1;
        self.quantum_used += 1;

        if let Some(episode) = self.spec.io_episodes.get(self.next_io_episode) {
            if self.total_ticks_consumed == episode.request_at {
                self.lifecycle = Lifecycle::BlockedOnIo;
                self.io_completes_at = now.saturating_add(1).saturating_add(episode.duration);
                self.next_io_episode += 1;
                return TickOutcome::Blocked;
            }
        }

        if self.remaining_burst == 0 {
            self.lifecycle = Lifecycle::Completed;
            self.completion_time = Some(now + 1);
            return TickOutcome::Completed;
        }

        TickOutcome::Continuing
    }

    /// Returns from I/O into the ready state at `now`.
    pub fn finish_io(&mut self, now: Tick) {
        self.ticks_consumed_this_episode = 0;
        self.make_ready(now);
    }
}
