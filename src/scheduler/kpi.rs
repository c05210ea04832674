//! Simulation quality metrics (KPIs).
//!
//! Computes per-process and aggregate scheduling performance indicators
//! from a finished (or stalled) simulation run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | max(0, turnaround - burst - total I/O) |
//! | Response | first dispatch - arrival |
//! | Makespan | End of the timeline |
//! | CPU Utilization | busy ticks / makespan |
//! | Throughput | completed processes / makespan |
//!
//! Averages cover completed processes only. A run with no completions
//! reports no averages.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SimulationResult;
use crate::dispatching::Algorithm;
use crate::models::{ProcessId, ProcessState, Tick};

/// Metrics of one completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process id.
    pub process_id: ProcessId,
    /// Arrival tick.
    pub arrival_time: Tick,
    /// CPU burst.
    pub burst_time: Tick,
    /// Total I/O wait.
    pub io_time: Tick,
    /// Completion tick.
    pub completion_time: Tick,
    /// Completion minus arrival.
    pub turnaround_time: Tick,
    /// Turnaround minus burst and I/O, never negative.
    pub waiting_time: Tick,
    /// First dispatch minus arrival.
    pub response_time: Tick,
    /// Ready-queue time accumulated by the engine at each dispatch.
    pub queued_time: Tick,
}

impl ProcessMetrics {
    /// Derives metrics from a final process state.
    ///
    /// Returns `None` unless the process completed.
    pub fn from_state(state: &ProcessState) -> Option<Self> {
        if !state.is_completed() {
            return None;
        }
        let completion = state.completion_time?;
        let arrival = state.arrival_time();
        let burst = state.spec.total_burst;
        let io = state.spec.total_io_time();

        let turnaround = completion.saturating_sub(arrival);
        // Clamped at zero
        let waiting = turnaround.saturating_sub(burst.saturating_add(io));
        let response = state
            .first_dispatch_time
            .map(|t| t.saturating_sub(arrival))
            .unwrap_or(0);

        Some(Self {
            process_id: state.id(),
            arrival_time: arrival,
            burst_time: burst,
            io_time: io,
            completion_time: completion,
            turnaround_time: turnaround,
            waiting_time: waiting,
            response_time: response,
            queued_time: state.accumulated_waiting,
        })
    }
}

/// Mean values over completed processes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Mean waiting time.
    pub waiting_time: f64,
    /// Mean turnaround time.
    pub turnaround_time: f64,
    /// Mean response time.
    pub response_time: f64,
}

/// Performance indicators of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Simulated algorithm.
    pub algorithm: Algorithm,
    /// Whether preemption was in effect.
    pub preemptive: bool,
    /// Per-process metrics, ordered by process id.
    pub processes: Vec<ProcessMetrics>,
    /// Averages, or `None` when nothing completed.
    pub averages: Option<AverageMetrics>,
    /// End of the timeline.
    pub makespan: Tick,
    /// Ticks the CPU ran a process.
    pub busy_time: Tick,
    /// Ticks the CPU sat idle.
    pub idle_time: Tick,
    /// Busy fraction of the makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Processes that completed.
    pub completed: usize,
    /// Processes in the run.
    pub total: usize,
}

impl SimulationKpi {
    /// Computes KPIs from a simulation result.
    pub fn calculate(result: &SimulationResult) -> Self {
        let processes: Vec<ProcessMetrics> = result
            .final_states
            .values()
            .filter_map(ProcessMetrics::from_state)
            .collect();

        let completed = processes.len();
        let averages = if completed == 0 {
            None
        } else {
            Some(AverageMetrics {
                waiting_time: mean(&processes, |m| m.waiting_time),
                turnaround_time: mean(&processes, |m| m.turnaround_time),
                response_time: mean(&processes, |m| m.response_time),
            })
        };

        let makespan = result.timeline.makespan();
        let throughput = if makespan == 0 {
            0.0
        } else {
            completed as f64 / makespan as f64
        };

        Self {
            algorithm: result.algorithm,
            preemptive: result.preemptive,
            processes,
            averages,
            makespan,
            busy_time: result.timeline.busy_time(),
            idle_time: result.timeline.idle_time(),
            cpu_utilization: result.timeline.utilization().unwrap_or(0.0),
            throughput,
            completed,
            total: result.final_states.len(),
        }
    }

    /// Metrics of one process, if it completed.
    pub fn process(&self, id: ProcessId) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.process_id == id)
    }
}

fn mean(metrics: &[ProcessMetrics], value: impl Fn(&ProcessMetrics) -> Tick) -> f64 {
    let total: f64 = metrics.iter().map(|m| value(m) as f64).sum();
    total / metrics.len() as f64
}

impl fmt::Display for SimulationKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID | Arrival | Completion | Turnaround | Waiting | Response")?;
        writeln!(f, "----|---------|------------|------------|---------|---------")?;
        for m in &self.processes {
            writeln!(
                f,
                "{:3} | {:7} | {:10} | {:10} | {:7} | {:8}",
                m.process_id,
                m.arrival_time,
                m.completion_time,
                m.turnaround_time,
                m.waiting_time,
                m.response_time
            )?;
        }

        match &self.averages {
            Some(avg) => {
                writeln!(f, "Average Waiting Time: {:.2}", avg.waiting_time)?;
                writeln!(f, "Average Turnaround Time: {:.2}", avg.turnaround_time)?;
                writeln!(f, "Average Response Time: {:.2}", avg.response_time)?;
            }
            None => writeln!(f, "No processes were completed to evaluate.")?,
        }
        write!(
            f,
            "CPU Utilization: {:.1}% ({}/{} completed)",
            self.cpu_utilization * 100.0,
            self.completed,
            self.total
        )
    }
}
