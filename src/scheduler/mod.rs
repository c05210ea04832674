//! Simulation engine, configuration, and KPI evaluation.
//!
//! # Algorithm
//!
//! [`CpuScheduler`] drives a discrete, tick-by-tick simulation of one CPU
//! over a fixed process set. The ready queue is ordered by the selected
//! [`Algorithm`](crate::dispatching::Algorithm); processes blocked on I/O
//! wait in a second queue ordered by completion time.
//!
//! # KPI
//!
//! [`SimulationKpi`] computes turnaround, waiting, and response times per
//! completed process, their averages, CPU utilization, and throughput.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod config;
mod engine;
mod kpi;

pub use config::SimulationConfig;
pub use engine::{
    run_scheduler, CpuScheduler, SimulationContext, SimulationRequest, SimulationResult,
    StuckDiagnostic, StuckReason,
};
pub use kpi::{AverageMetrics, ProcessMetrics, SimulationKpi};
