//! Error types for simulation runs.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that reject a simulation run before or while it executes.
///
/// A run that stalls is not an error: it returns a partial
/// [`SimulationResult`](crate::scheduler::SimulationResult) carrying a
/// [`StuckDiagnostic`](crate::scheduler::StuckDiagnostic).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// One or more process specs failed validation.
    #[error("invalid process set: {}", join_messages(.0))]
    InvalidSpec(Vec<ValidationError>),
    /// More processes than the configured ceiling.
    #[error("process count {count} exceeds the configured limit of {limit}")]
    CapacityExceeded {
        /// Processes supplied.
        count: usize,
        /// Configured ceiling.
        limit: usize,
    },
    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A bounded queue was full.
    #[error("queue capacity of {capacity} entries exceeded")]
    QueueOverflow {
        /// Queue capacity.
        capacity: usize,
    },
}

impl SchedulerError {
    /// Validation errors, if this is an `InvalidSpec` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SchedulerError::InvalidSpec(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SchedulerError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SchedulerError::InvalidSpec(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
