//! Ordering policies and the ordered process queue.
//!
//! The ready queue and the I/O waiting queue are both [`OrderedQueue`]s.
//! The ready queue's policy is chosen per run from the [`Algorithm`];
//! the waiting queue always uses [`OrderingPolicy::IoCompletion`].
//!
//! # Usage
//!
//! ```
//! use u_procsim::dispatching::{Algorithm, OrderedQueue, OrderingPolicy};
//! use u_procsim::models::{ProcessSpec, ProcessState};
//!
//! let arena: Vec<ProcessState> = [
//!     ProcessSpec::new(1, 0, 9),
//!     ProcessSpec::new(2, 1, 3),
//! ]
//! .iter()
//! .map(ProcessState::from_spec)
//! .collect();
//!
//! let mut ready = OrderedQueue::new(Algorithm::Sjf.ready_policy());
//! ready.insert(0, &arena).unwrap();
//! ready.insert(1, &arena).unwrap();
//! assert_eq!(ready.extract_min(&arena), Some(1)); // shorter burst first
//! ```
//!
//! # Tie-breaking
//! Every policy falls back to process id ascending, so equal keys always
//! resolve the same way and runs are reproducible.

mod policy;
mod queue;

pub use policy::{Algorithm, OrderingPolicy};
pub use queue::OrderedQueue;
