//! CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Simulates how a single CPU interleaves a fixed set of processes, each
//! with a CPU burst optionally interrupted by I/O waits, under FCFS, SJF,
//! Priority, and Round-Robin scheduling (SJF and Priority optionally
//! preemptive). Produces a Gantt timeline and per-process metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessSpec`, `IoEpisode`, `ProcessState`,
//!   `Lifecycle`, `Timeline`, `TimelineInterval`
//! - **`dispatching`**: Ordering policies, `Algorithm`, and the heap-backed
//!   `OrderedQueue`
//! - **`scheduler`**: The tick-driven engine (`CpuScheduler`, `run_scheduler`),
//!   `SimulationConfig`, and `SimulationKpi`
//! - **`validation`**: Input integrity checks (duplicate IDs, burst and I/O ranges)
//! - **`generator`**: Seedable random process sets
//!
//! # Example
//!
//! ```
//! use u_procsim::dispatching::Algorithm;
//! use u_procsim::models::ProcessSpec;
//! use u_procsim::scheduler::{run_scheduler, SimulationKpi};
//!
//! let specs = vec![
//!     ProcessSpec::new(1, 0, 10),
//!     ProcessSpec::new(2, 2, 2),
//! ];
//! let result = run_scheduler(&specs, Algorithm::Sjf, true).unwrap();
//! assert_eq!(result.timeline.to_string(), "| P1 (0-2) | P2 (2-4) | P1 (4-12) |");
//!
//! let kpi = SimulationKpi::calculate(&result);
//! assert_eq!(kpi.process(1).unwrap().waiting_time, 2);
//! ```
//!
//! # Logging
//!
//! Emits records through the `log` facade; install any logger to see
//! dispatch, preemption, and I/O events at `debug` level.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::SchedulerError;
