//! Tick-driven simulation engine.
//!
//! # Algorithm
//!
//! Each tick runs these steps in a fixed order:
//! 1. Admit processes whose arrival time has been reached.
//! 2. Move finished I/O waits from the waiting queue to the ready queue.
//! 3. Preempt the running process if the ready queue's head beats it
//!    (preemptive SJF / Priority only).
//! 4. Dispatch the ready queue's head if the CPU is free.
//! 5. Execute one tick; close the timeline interval on I/O block,
//!    completion, or round-robin quantum expiry.
//!
//! Time then advances by one tick. When the CPU is idle and nothing is
//! ready, time jumps to the next arrival or I/O completion.
//!
//! # Determinism
//! Step order and the id tie-break of every ordering policy fix the
//! outcome of simultaneous events, so identical inputs always yield
//! identical timelines.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::SimulationConfig;
use crate::dispatching::{Algorithm, OrderedQueue, OrderingPolicy};
use crate::error::SchedulerError;
use crate::models::{
    Lifecycle, ProcessId, ProcessSpec, ProcessState, Tick, TickOutcome, Timeline, IDLE_PROCESS_ID,
};
use crate::validation::validate_specs;

/// Input container for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Processes to simulate.
    pub specs: Vec<ProcessSpec>,
    /// Scheduling algorithm.
    pub algorithm: Algorithm,
    /// Requested preemption (ignored by FCFS and round-robin).
    #[serde(default)]
    pub preemptive: bool,
}

impl SimulationRequest {
    /// Creates a non-preemptive request.
    pub fn new(specs: Vec<ProcessSpec>, algorithm: Algorithm) -> Self {
        Self {
            specs,
            algorithm,
            preemptive: false,
        }
    }

    /// Sets the preemption flag.
    pub fn with_preemption(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }
}

/// Why a run stopped before every process completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StuckReason {
    /// Simulated time passed the watchdog limit.
    TickLimitExceeded,
    /// Nothing was running, ready, arriving, or waiting on I/O.
    NoPendingEvents,
}

/// Diagnostic attached to a run that did not finish.
///
/// The partial timeline ends at `elapsed_ticks`. An idle gap the engine
/// refused to skip over (an event beyond the tick limit) is not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StuckDiagnostic {
    /// Stop cause.
    pub reason: StuckReason,
    /// Simulated ticks when the run stopped.
    pub elapsed_ticks: Tick,
    /// Processes completed.
    pub completed: usize,
    /// Processes in the run.
    pub total: usize,
}

impl fmt::Display for StuckDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = match self.reason {
            StuckReason::TickLimitExceeded => "possibly stuck",
            StuckReason::NoPendingEvents => "no pending events",
        };
        write!(
            f,
            "simulation {cause}: time {}, completed {}/{}",
            self.elapsed_ticks, self.completed, self.total
        )
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Algorithm that was simulated.
    pub algorithm: Algorithm,
    /// Whether comparator-based preemption was in effect.
    pub preemptive: bool,
    /// CPU occupancy over time, up to `elapsed_ticks`.
    pub timeline: Timeline,
    /// Final state of every process, keyed by id.
    pub final_states: BTreeMap<ProcessId, ProcessState>,
    /// Simulated time when the run ended.
    pub elapsed_ticks: Tick,
    /// Set when the run stopped before every process completed.
    pub diagnostic: Option<StuckDiagnostic>,
}

impl SimulationResult {
    /// Whether every process completed.
    pub fn is_complete(&self) -> bool {
        self.diagnostic.is_none()
    }

    /// Final state of one process.
    pub fn state(&self, id: ProcessId) -> Option<&ProcessState> {
        self.final_states.get(&id)
    }

    /// Ids of processes that never completed.
    pub fn incomplete_processes(&self) -> Vec<ProcessId> {
        self.final_states
            .values()
            .filter(|p| !p.is_completed())
            .map(|p| p.id())
            .collect()
    }

    /// Run label, e.g. `Preemptive SJF`.
    pub fn label(&self) -> String {
        match (self.algorithm.supports_preemption(), self.preemptive) {
            (true, true) => format!("Preemptive {}", self.algorithm),
            (true, false) => format!("Non-Preemptive {}", self.algorithm),
            (false, _) => self.algorithm.to_string(),
        }
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.label())?;
        writeln!(f, "Gantt Chart:")?;
        writeln!(f, "{}", self.timeline)?;
        if let Some(diagnostic) = &self.diagnostic {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

/// State of a single simulation run.
///
/// Owns the process arena and both queues. Created fresh for every run
/// from the immutable specs, so nothing leaks between runs.
#[derive(Debug)]
pub struct SimulationContext<'a> {
    config: &'a SimulationConfig,
    algorithm: Algorithm,
    preemptive: bool,
    processes: Vec<ProcessState>,
    ready: OrderedQueue,
    waiting: OrderedQueue,
    timeline: Timeline,
    current_time: Tick,
    running: Option<usize>,
    dispatch_start: Tick,
    completed: usize,
}

impl<'a> SimulationContext<'a> {
    /// Validates the inputs and resets every process to its initial state.
    pub fn new(
        specs: &[ProcessSpec],
        algorithm: Algorithm,
        preemptive: bool,
        config: &'a SimulationConfig,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        if specs.len() > config.max_processes {
            return Err(SchedulerError::CapacityExceeded {
                count: specs.len(),
                limit: config.max_processes,
            });
        }
        validate_specs(specs, config.max_io_episodes)?;

        let processes: Vec<ProcessState> = specs.iter().map(ProcessState::from_spec).collect();
        let capacity = processes.len();

        Ok(Self {
            config,
            algorithm,
            preemptive: preemptive && algorithm.supports_preemption(),
            processes,
            ready: OrderedQueue::with_capacity(algorithm.ready_policy(), capacity),
            waiting: OrderedQueue::with_capacity(OrderingPolicy::IoCompletion, capacity),
            timeline: Timeline::new(),
            current_time: 0,
            running: None,
            dispatch_start: 0,
            completed: 0,
        })
    }

    /// Runs the event loop to completion or until the watchdog fires.
    pub fn run(mut self) -> Result<SimulationResult, SchedulerError> {
        let total = self.processes.len();
        info!(
            "Running {} scheduler (preemptive={}) on {} processes",
            self.algorithm, self.preemptive, total
        );

        let diagnostic = loop {
            if self.completed == total {
                break None;
            }

            self.admit_arrivals()?;
            self.complete_io()?;
            self.check_preemption()?;
            self.dispatch();
            self.execute()?;

            self.current_time += 1;

            if self.completed == total {
                break None;
            }
            if self.current_time > self.config.tick_limit {
                break Some(self.stuck(StuckReason::TickLimitExceeded));
            }
            if self.running.is_none() && self.ready.is_empty() {
                match self.next_event_time() {
                    None => break Some(self.stuck(StuckReason::NoPendingEvents)),
                    Some(next) if next > self.config.tick_limit => {
                        break Some(self.stuck(StuckReason::TickLimitExceeded));
                    }
                    Some(next) if next > self.current_time => {
                        trace!("CPU idle from {} to {}", self.current_time, next);
                        self.timeline
                            .record(IDLE_PROCESS_ID, self.current_time, next);
                        self.current_time = next;
                    }
                    Some(_) => {}
                }
            }
        };

        if let Some(diagnostic) = &diagnostic {
            warn!("{} scheduler: {}", self.algorithm, diagnostic);
            self.close_open_interval();
        } else {
            info!(
                "{} scheduler finished at tick {}",
                self.algorithm, self.current_time
            );
        }

        Ok(SimulationResult {
            algorithm: self.algorithm,
            preemptive: self.preemptive,
            timeline: self.timeline,
            final_states: self
                .processes
                .into_iter()
                .map(|p| (p.id(), p))
                .collect(),
            elapsed_ticks: self.current_time,
            diagnostic,
        })
    }

    fn admit_arrivals(&mut self) -> Result<(), SchedulerError> {
        let now = self.current_time;
        for i in 0..self.processes.len() {
            let p = &mut self.processes[i];
            if p.lifecycle == Lifecycle::NotArrived && p.arrival_time() <= now {
                p.make_ready(now);
                debug!("t={now}: P{} arrived", p.id());
                self.ready.insert(i, &self.processes)?;
            }
        }
        Ok(())
    }

    fn complete_io(&mut self) -> Result<(), SchedulerError> {
        let now = self.current_time;
        while let Some(head) = self.waiting.peek_min() {
            if self.processes[head].io_completes_at > now {
                break;
            }
            let Some(i) = self.waiting.extract_min(&self.processes) else {
                break;
            };
            self.processes[i].finish_io(now);
            debug!("t={now}: P{} finished I/O", self.processes[i].id());
            self.ready.insert(i, &self.processes)?;
        }
        Ok(())
    }

    fn check_preemption(&mut self) -> Result<(), SchedulerError> {
        if !self.preemptive {
            return Ok(());
        }
        let (Some(running), Some(candidate)) = (self.running, self.ready.peek_min()) else {
            return Ok(());
        };
        if !self
            .algorithm
            .should_preempt(&self.processes[candidate], &self.processes[running])
        {
            return Ok(());
        }

        let now = self.current_time;
        debug!(
            "t={now}: P{} preempted by P{}",
            self.processes[running].id(),
            self.processes[candidate].id()
        );
        self.timeline
            .record(self.processes[running].id(), self.dispatch_start, now);
        let p = &mut self.processes[running];
        p.make_ready(now);
        p.quantum_used = 0;
        self.ready.insert(running, &self.processes)?;
        self.running = None;
        Ok(())
    }

    fn dispatch(&mut self) {
        if self.running.is_some() {
            return;
        }
        if let Some(i) = self.ready.extract_min(&self.processes) {
            let now = self.current_time;
            self.processes[i].dispatch(now);
            debug!("t={now}: dispatched P{}", self.processes[i].id());
            self.running = Some(i);
            self.dispatch_start = now;
        }
    }

    fn execute(&mut self) -> Result<(), SchedulerError> {
        let now = self.current_time;
        let Some(i) = self.running else {
            self.timeline.record(IDLE_PROCESS_ID, now, now + 1);
            return Ok(());
        };

        let id = self.processes[i].id();
        match self.processes[i].advance_tick(now) {
            TickOutcome::Blocked => {
                debug!(
                    "t={now}: P{id} blocked on I/O until {}",
                    self.processes[i].io_completes_at
                );
                self.timeline.record(id, self.dispatch_start, now + 1);
                self.waiting.insert(i, &self.processes)?;
                self.running = None;
            }
            TickOutcome::Completed => {
                debug!("t={now}: P{id} completed");
                self.timeline.record(id, self.dispatch_start, now + 1);
                self.completed += 1;
                self.running = None;
            }
            TickOutcome::Continuing => {
                if self.algorithm == Algorithm::RoundRobin
                    && self.processes[i].quantum_used >= self.config.time_quantum
                {
                    debug!("t={now}: P{id} used its quantum");
                    self.timeline.record(id, self.dispatch_start, now + 1);
                    if !self.config.merge_round_robin_slices {
                        self.timeline.seal();
                    }
                    self.processes[i].make_ready(now + 1);
                    self.ready.insert(i, &self.processes)?;
                    self.running = None;
                }
            }
        }
        Ok(())
    }

    /// Earliest future arrival or I/O completion.
    fn next_event_time(&self) -> Option<Tick> {
        let next_arrival = self
            .processes
            .iter()
            .filter(|p| p.lifecycle == Lifecycle::NotArrived)
            .map(|p| p.arrival_time())
            .min();
        let next_io = self
            .waiting
            .peek_min()
            .map(|i| self.processes[i].io_completes_at);

        match (next_arrival, next_io) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn close_open_interval(&mut self) {
        if let Some(i) = self.running {
            self.timeline
                .record(self.processes[i].id(), self.dispatch_start, self.current_time);
        }
    }

    fn stuck(&self, reason: StuckReason) -> StuckDiagnostic {
        StuckDiagnostic {
            reason,
            elapsed_ticks: self.current_time,
            completed: self.completed,
            total: self.processes.len(),
        }
    }
}

/// CPU scheduling simulator.
///
/// Each call to [`run`](Self::run) is independent: process state is
/// re-derived from the specs every time.
///
/// # Example
///
/// ```
/// use u_procsim::dispatching::Algorithm;
/// use u_procsim::models::{ProcessSpec, TimelineInterval};
/// use u_procsim::scheduler::CpuScheduler;
///
/// let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
/// let result = CpuScheduler::new()
///     .run(&specs, Algorithm::Fcfs, false)
///     .unwrap();
///
/// assert_eq!(
///     result.timeline.intervals(),
///     &[TimelineInterval::new(1, 0, 5), TimelineInterval::new(2, 5, 8)]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CpuScheduler {
    config: SimulationConfig,
}

impl CpuScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates `specs` under `algorithm`.
    ///
    /// `preemptive` only affects SJF and Priority.
    pub fn run(
        &self,
        specs: &[ProcessSpec],
        algorithm: Algorithm,
        preemptive: bool,
    ) -> Result<SimulationResult, SchedulerError> {
        SimulationContext::new(specs, algorithm, preemptive, &self.config)?.run()
    }

    /// Simulates a request.
    pub fn run_request(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SchedulerError> {
        self.run(&request.specs, request.algorithm, request.preemptive)
    }

    /// Simulates every classic variant ([`Algorithm::VARIANTS`]) in order.
    pub fn run_all(&self, specs: &[ProcessSpec]) -> Result<Vec<SimulationResult>, SchedulerError> {
        Algorithm::VARIANTS
            .iter()
            .map(|&(algorithm, preemptive)| self.run(specs, algorithm, preemptive))
            .collect()
    }
}

/// Simulates `specs` with the default configuration.
pub fn run_scheduler(
    specs: &[ProcessSpec],
    algorithm: Algorithm,
    preemptive: bool,
) -> Result<SimulationResult, SchedulerError> {
    CpuScheduler::new().run(specs, algorithm, preemptive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ProcessGenerator;
    use crate::models::TimelineInterval;
    use crate::validation::ValidationErrorKind;

    fn iv(id: ProcessId, start: Tick, end: Tick) -> TimelineInterval {
        TimelineInterval::new(id, start, end)
    }

    fn assert_contiguous(result: &SimulationResult) {
        let intervals = result.timeline.intervals();
        assert_eq!(intervals.first().map(|i| i.start), Some(0));
        for pair in intervals.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap in {pair:?}");
            assert!(pair[0].start < pair[0].end);
        }
    }

    #[test]
    fn test_fcfs_two_processes() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();

        assert_eq!(result.timeline.intervals(), &[iv(1, 0, 5), iv(2, 5, 8)]);
        assert!(result.is_complete());
        assert_eq!(result.elapsed_ticks, 8);
        assert_eq!(result.state(2).unwrap().accumulated_waiting, 4);
        assert_eq!(result.state(2).unwrap().response_time, Some(4));
    }

    #[test]
    fn test_fcfs_ignores_preemption_flag() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 1)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, true).unwrap();
        assert!(!result.preemptive);
        assert_eq!(result.timeline.intervals(), &[iv(1, 0, 5), iv(2, 5, 6)]);
    }

    #[test]
    fn test_round_robin_single_process_splits_at_quantum() {
        let specs = vec![ProcessSpec::new(1, 0, 10)];
        let result = run_scheduler(&specs, Algorithm::RoundRobin, false).unwrap();
        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 4), iv(1, 4, 8), iv(1, 8, 10)]
        );
    }

    #[test]
    fn test_round_robin_merged_slices() {
        let config = SimulationConfig::default().with_merge_round_robin_slices(true);
        let result = CpuScheduler::new()
            .with_config(config)
            .run(&[ProcessSpec::new(1, 0, 10)], Algorithm::RoundRobin, false)
            .unwrap();
        assert_eq!(result.timeline.intervals(), &[iv(1, 0, 10)]);
    }

    #[test]
    fn test_round_robin_interleaving() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
        let config = SimulationConfig::default().with_time_quantum(2);
        let result = CpuScheduler::new()
            .with_config(config)
            .run(&specs, Algorithm::RoundRobin, false)
            .unwrap();

        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 2), iv(2, 2, 4), iv(1, 4, 6), iv(2, 6, 7), iv(1, 7, 8)]
        );
        assert_eq!(result.state(1).unwrap().accumulated_waiting, 3);
        assert_eq!(result.state(2).unwrap().accumulated_waiting, 3);
    }

    #[test]
    fn test_preemptive_sjf() {
        let specs = vec![ProcessSpec::new(1, 0, 10), ProcessSpec::new(2, 2, 2)];
        let result = run_scheduler(&specs, Algorithm::Sjf, true).unwrap();

        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 2), iv(2, 2, 4), iv(1, 4, 12)]
        );
        assert_eq!(result.state(2).unwrap().completion_time, Some(4));
        assert_eq!(result.state(1).unwrap().completion_time, Some(12));
        assert_eq!(result.label(), "Preemptive SJF");
    }

    #[test]
    fn test_non_preemptive_sjf() {
        let specs = vec![
            ProcessSpec::new(1, 0, 8),
            ProcessSpec::new(2, 1, 4),
            ProcessSpec::new(3, 2, 2),
        ];
        let result = run_scheduler(&specs, Algorithm::Sjf, false).unwrap();
        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 8), iv(3, 8, 10), iv(2, 10, 14)]
        );
        assert_eq!(result.label(), "Non-Preemptive SJF");
    }

    #[test]
    fn test_priority_preemptive_and_not() {
        let specs = vec![
            ProcessSpec::new(1, 0, 6).with_priority(5),
            ProcessSpec::new(2, 2, 3).with_priority(1),
        ];

        let plain = run_scheduler(&specs, Algorithm::Priority, false).unwrap();
        assert_eq!(plain.timeline.intervals(), &[iv(1, 0, 6), iv(2, 6, 9)]);

        let preemptive = run_scheduler(&specs, Algorithm::Priority, true).unwrap();
        assert_eq!(
            preemptive.timeline.intervals(),
            &[iv(1, 0, 2), iv(2, 2, 5), iv(1, 5, 9)]
        );
    }

    #[test]
    fn test_equal_priority_does_not_preempt() {
        let specs = vec![
            ProcessSpec::new(2, 0, 4).with_priority(3),
            ProcessSpec::new(1, 1, 2).with_priority(3),
        ];
        let result = run_scheduler(&specs, Algorithm::Priority, true).unwrap();
        assert_eq!(result.timeline.intervals(), &[iv(2, 0, 4), iv(1, 4, 6)]);
    }

    #[test]
    fn test_io_interleaving() {
        let specs = vec![
            ProcessSpec::new(1, 0, 5).with_io(2, 3),
            ProcessSpec::new(2, 0, 3),
        ];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();

        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 2), iv(2, 2, 5), iv(1, 5, 8)]
        );
        let p1 = result.state(1).unwrap();
        assert_eq!(p1.completion_time, Some(8));
        assert_eq!(p1.next_io_episode, 1);
        assert_eq!(p1.total_ticks_consumed, 5);
    }

    #[test]
    fn test_idle_fast_forward_during_io() {
        let specs = vec![ProcessSpec::new(1, 0, 4).with_io(1, 3)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();
        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 1), iv(IDLE_PROCESS_ID, 1, 4), iv(1, 4, 7)]
        );
    }

    #[test]
    fn test_idle_before_first_arrival() {
        let specs = vec![ProcessSpec::new(1, 3, 2)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();
        assert_eq!(
            result.timeline.intervals(),
            &[iv(IDLE_PROCESS_ID, 0, 3), iv(1, 3, 5)]
        );
        assert_eq!(result.state(1).unwrap().response_time, Some(0));
    }

    #[test]
    fn test_simultaneous_events_tie_by_id() {
        // At t=2 process 1 arrives and process 2 returns from I/O with the
        // same queue entry time; the lower id runs first.
        let specs = vec![
            ProcessSpec::new(2, 0, 3).with_io(1, 1),
            ProcessSpec::new(1, 2, 1),
        ];
        let result = run_scheduler(&specs, Algorithm::RoundRobin, false).unwrap();
        assert_eq!(
            result.timeline.intervals(),
            &[
                iv(2, 0, 1),
                iv(IDLE_PROCESS_ID, 1, 2),
                iv(1, 2, 3),
                iv(2, 3, 5)
            ]
        );
    }

    #[test]
    fn test_io_resumes_across_preemption() {
        // Process 1 is preempted before its I/O point; the episode still
        // triggers exactly once at 3 cumulative ticks.
        let specs = vec![
            ProcessSpec::new(1, 0, 6).with_io(3, 2),
            ProcessSpec::new(2, 1, 1),
        ];
        let result = run_scheduler(&specs, Algorithm::Sjf, true).unwrap();
        assert_eq!(
            result.timeline.intervals(),
            &[
                iv(1, 0, 1),
                iv(2, 1, 2),
                iv(1, 2, 4),
                iv(IDLE_PROCESS_ID, 4, 6),
                iv(1, 6, 9)
            ]
        );
        assert_eq!(result.state(1).unwrap().next_io_episode, 1);
    }

    #[test]
    fn test_idempotent_runs() {
        let specs = ProcessGenerator::new(12).generate_seeded(7);
        let scheduler = CpuScheduler::new();
        for &(algorithm, preemptive) in &Algorithm::VARIANTS {
            let first = scheduler.run(&specs, algorithm, preemptive).unwrap();
            let second = scheduler.run(&specs, algorithm, preemptive).unwrap();
            assert_eq!(first, second, "{algorithm} preemptive={preemptive}");
        }
    }

    #[test]
    fn test_conservation_and_mutual_exclusion() {
        let specs = ProcessGenerator::new(15).generate_seeded(42);
        let results = CpuScheduler::new().run_all(&specs).unwrap();
        assert_eq!(results.len(), 6);

        for result in &results {
            assert!(result.is_complete(), "{}", result.label());
            assert_contiguous(result);
            for spec in &specs {
                let state = result.state(spec.id).unwrap();
                assert!(state.is_completed());
                assert_eq!(state.total_ticks_consumed, spec.total_burst);
                assert_eq!(result.timeline.time_for_process(spec.id), spec.total_burst);
                assert_eq!(state.next_io_episode, spec.io_episodes.len());
            }
            assert_eq!(result.timeline.makespan(), result.elapsed_ticks);
        }
    }

    #[test]
    fn test_watchdog_stops_unreachable_arrival() {
        let specs = vec![ProcessSpec::new(1, 0, 3), ProcessSpec::new(2, 50_000, 1)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();

        let diagnostic = result.diagnostic.unwrap();
        assert_eq!(diagnostic.reason, StuckReason::TickLimitExceeded);
        assert_eq!(diagnostic.elapsed_ticks, 3);
        assert_eq!(diagnostic.completed, 1);
        assert_eq!(diagnostic.total, 2);
        assert_eq!(result.incomplete_processes(), vec![2]);
        assert_eq!(result.state(2).unwrap().lifecycle, Lifecycle::NotArrived);
    }

    #[test]
    fn test_watchdog_returns_partial_timeline() {
        let config = SimulationConfig::default().with_tick_limit(20);
        let result = CpuScheduler::new()
            .with_config(config)
            .run(&[ProcessSpec::new(1, 0, 50)], Algorithm::Fcfs, false)
            .unwrap();

        let diagnostic = result.diagnostic.unwrap();
        assert_eq!(diagnostic.elapsed_ticks, 21);
        assert_eq!(result.timeline.intervals(), &[iv(1, 0, 21)]);
        assert_eq!(result.state(1).unwrap().lifecycle, Lifecycle::Running);
        assert!(diagnostic.to_string().contains("completed 0/1"));
    }

    #[test]
    fn test_huge_io_duration_stops_at_watchdog() {
        let specs = vec![ProcessSpec::new(1, 0, 3).with_io(1, u64::MAX)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();

        let p1 = result.state(1).unwrap();
        assert_eq!(p1.lifecycle, Lifecycle::BlockedOnIo);
        assert_eq!(p1.io_completes_at, u64::MAX);
        let diagnostic = result.diagnostic.unwrap();
        assert_eq!(diagnostic.reason, StuckReason::TickLimitExceeded);
        assert_eq!(diagnostic.elapsed_ticks, 1);
        assert_eq!(result.timeline.intervals(), &[iv(1, 0, 1)]);
    }

    #[test]
    fn test_stalled_timeline_ends_at_elapsed_ticks() {
        let specs = vec![ProcessSpec::new(1, 20_000, 4)];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();

        let diagnostic = result.diagnostic.unwrap();
        assert_eq!(diagnostic.elapsed_ticks, 1);
        assert_eq!(result.timeline.makespan(), diagnostic.elapsed_ticks);
        assert_eq!(result.timeline.intervals(), &[iv(IDLE_PROCESS_ID, 0, 1)]);
    }

    #[test]
    fn test_io_wakeups_at_same_tick() {
        let specs = vec![
            ProcessSpec::new(1, 0, 3).with_io(1, 2),
            ProcessSpec::new(2, 0, 3).with_io(1, 1),
        ];
        let result = run_scheduler(&specs, Algorithm::Fcfs, false).unwrap();

        // Both return from I/O at t=3; FCFS runs process 1 first.
        assert_eq!(
            result.timeline.intervals(),
            &[iv(1, 0, 1), iv(2, 1, 2), iv(IDLE_PROCESS_ID, 2, 3), iv(1, 3, 5), iv(2, 5, 7)]
        );
        assert!(result.is_complete());
    }

    #[test]
    fn test_capacity_exceeded() {
        let specs: Vec<ProcessSpec> = (1..=3).map(|id| ProcessSpec::new(id, 0, 1)).collect();
        let config = SimulationConfig::default().with_max_processes(2);
        let err = CpuScheduler::new()
            .with_config(config)
            .run(&specs, Algorithm::Fcfs, false)
            .unwrap_err();
        assert_eq!(err, SchedulerError::CapacityExceeded { count: 3, limit: 2 });
    }

    #[test]
    fn test_invalid_specs_rejected() {
        let specs = vec![ProcessSpec::new(1, 0, 0), ProcessSpec::new(1, 0, 4)];
        let err = run_scheduler(&specs, Algorithm::Sjf, false).unwrap_err();
        let kinds: Vec<_> = err.validation_errors().iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::ZeroBurst));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateId));

        let empty = run_scheduler(&[], Algorithm::Fcfs, false).unwrap_err();
        assert_eq!(
            empty.validation_errors()[0].kind,
            ValidationErrorKind::EmptyProcessSet
        );
    }

    #[test]
    fn test_run_request() {
        let request = SimulationRequest::new(
            vec![ProcessSpec::new(1, 0, 10), ProcessSpec::new(2, 2, 2)],
            Algorithm::Sjf,
        )
        .with_preemption(true);
        let result = CpuScheduler::new().run_request(&request).unwrap();
        assert!(result.preemptive);
        assert_eq!(result.timeline.len(), 3);
    }

    #[test]
    fn test_result_serializes() {
        let result = run_scheduler(&[ProcessSpec::new(1, 0, 2)], Algorithm::Fcfs, false).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_display_includes_gantt() {
        let specs = vec![ProcessSpec::new(1, 0, 2), ProcessSpec::new(2, 0, 1)];
        let result = run_scheduler(&specs, Algorithm::RoundRobin, false).unwrap();
        let text = result.to_string();
        assert!(text.contains("--- Round Robin ---"));
        assert!(text.contains("| P1 (0-2) | P2 (2-3) |"));
    }
}
