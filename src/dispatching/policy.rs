//! Built-in ordering policies and scheduling algorithms.
//!
//! # Policies
//!
//! | Policy | Key | Ties |
//! |--------|-----|------|
//! | FCFS | arrival time | id |
//! | SJF | remaining burst | arrival time, id |
//! | Priority | priority (lower first) | arrival time, id |
//! | Round-Robin | latest queue entry | id |
//! | IO-completion | I/O completion tick | id |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::ProcessState;

/// Total order over processes used by an [`OrderedQueue`](super::OrderedQueue).
///
/// `Ordering::Less` means "dispatch first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingPolicy {
    /// First-come, first-served.
    Fcfs,
    /// Shortest (remaining) job first.
    Sjf,
    /// Most urgent priority first.
    Priority,
    /// FIFO by queue re-entry.
    RoundRobin,
    /// Earliest I/O completion first (waiting queue only).
    IoCompletion,
}

impl OrderingPolicy {
    /// Short policy name.
    pub fn name(&self) -> &'static str {
        match self {
            OrderingPolicy::Fcfs => "FCFS",
            OrderingPolicy::Sjf => "SJF",
            OrderingPolicy::Priority => "PRIORITY",
            OrderingPolicy::RoundRobin => "RR",
            OrderingPolicy::IoCompletion => "IO",
        }
    }

    /// Policy description.
    pub fn description(&self) -> &'static str {
        match self {
            OrderingPolicy::Fcfs => "First-Come, First-Served",
            OrderingPolicy::Sjf => "Shortest Remaining Burst",
            OrderingPolicy::Priority => "Lowest Priority Value",
            OrderingPolicy::RoundRobin => "Queue Re-entry Order",
            OrderingPolicy::IoCompletion => "Earliest I/O Completion",
        }
    }

    /// Compares two processes under this policy.
    ///
    /// SJF reads `remaining_burst` at comparison time, which turns it into
    /// shortest-remaining-time when combined with preemption.
    pub fn compare(&self, a: &ProcessState, b: &ProcessState) -> Ordering {
        let primary = match self {
            OrderingPolicy::Fcfs => a.arrival_time().cmp(&b.arrival_time()),
            OrderingPolicy::Sjf => a
                .remaining_burst
                .cmp(&b.remaining_burst)
                .then_with(|| a.arrival_time().cmp(&b.arrival_time())),
            OrderingPolicy::Priority => a
                .priority()
                .cmp(&b.priority())
                .then_with(|| a.arrival_time().cmp(&b.arrival_time())),
            OrderingPolicy::RoundRobin => a.last_queue_entry_time.cmp(&b.last_queue_entry_time),
            OrderingPolicy::IoCompletion => a.io_completes_at.cmp(&b.io_completes_at),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }
}

/// CPU scheduling algorithm selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-come, first-served. Never preempts.
    Fcfs,
    /// Shortest job first; shortest remaining time when preemptive.
    Sjf,
    /// Static priority, lower value first.
    Priority,
    /// Round-robin with a fixed time quantum.
    RoundRobin,
}

impl Algorithm {
    /// All algorithms.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// The classic comparison set: every algorithm with every meaningful
    /// preemption setting.
    pub const VARIANTS: [(Algorithm, bool); 6] = [
        (Algorithm::Fcfs, false),
        (Algorithm::Sjf, false),
        (Algorithm::Sjf, true),
        (Algorithm::Priority, false),
        (Algorithm::Priority, true),
        (Algorithm::RoundRobin, false),
    ];

    /// Ready-queue ordering used by this algorithm.
    pub fn ready_policy(&self) -> OrderingPolicy {
        match self {
            Algorithm::Fcfs => OrderingPolicy::Fcfs,
            Algorithm::Sjf => OrderingPolicy::Sjf,
            Algorithm::Priority => OrderingPolicy::Priority,
            Algorithm::RoundRobin => OrderingPolicy::RoundRobin,
        }
    }

    /// Whether comparator-based preemption applies at all.
    ///
    /// FCFS is non-preemptible and round-robin preempts on its quantum
    /// only, so both ignore the caller's preemption flag.
    pub fn supports_preemption(&self) -> bool {
        matches!(self, Algorithm::Sjf | Algorithm::Priority)
    }

    /// Whether `candidate` should take the CPU from `running`.
    pub fn should_preempt(&self, candidate: &ProcessState, running: &ProcessState) -> bool {
        match self {
            Algorithm::Sjf => candidate.remaining_burst < running.remaining_burst,
            Algorithm::Priority => candidate.priority() < running.priority(),
            Algorithm::Fcfs | Algorithm::RoundRobin => false,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Priority => "Priority",
            Algorithm::RoundRobin => "Round Robin",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Algorithm::Fcfs),
            "sjf" | "srt" | "srtf" => Ok(Algorithm::Sjf),
            "priority" | "prio" => Ok(Algorithm::Priority),
            "rr" | "round-robin" | "roundrobin" | "round_robin" => Ok(Algorithm::RoundRobin),
            other => Err(SchedulerError::InvalidConfig(format!(
                "unknown scheduling algorithm '{other}'"
            ))),
        }
    }
}
