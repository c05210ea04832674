//! Input validation for process sets.
//!
//! Checks structural integrity of process specs before a run. Detects:
//! - Empty process sets
//! - Duplicate or reserved IDs
//! - Zero CPU bursts
//! - I/O request points outside `(0, burst)` or not strictly increasing
//! - Zero-length I/O waits and too many I/O episodes
//!
//! All problems are collected, not just the first one.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{ProcessSpec, IDLE_PROCESS_ID};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// Two processes share the same ID.
    DuplicateId,
    /// A process uses the ID reserved for idle intervals.
    ReservedId,
    /// A process needs no CPU time.
    ZeroBurst,
    /// An I/O request point is not strictly inside the burst.
    IoRequestOutOfRange,
    /// I/O request points are not strictly increasing.
    IoRequestNotIncreasing,
    /// An I/O episode lasts zero ticks.
    ZeroIoDuration,
    /// More I/O episodes than allowed per process.
    TooManyIoEpisodes,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a process set.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate IDs, and no use of the idle ID `0`
/// 3. Every burst is positive
/// 4. Every I/O request point satisfies `0 < request_at < total_burst`
/// 5. Request points are strictly increasing within a process
/// 6. Every I/O wait lasts at least one tick
/// 7. At most `max_io_episodes` episodes per process
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_specs(specs: &[ProcessSpec], max_io_episodes: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if specs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "Process set is empty",
        ));
    }

    let mut ids = HashSet::new();
    for spec in specs {
        if spec.id == IDLE_PROCESS_ID {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedId,
                format!("Process ID {IDLE_PROCESS_ID} is reserved for idle intervals"),
            ));
        } else if !ids.insert(spec.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.id),
            ));
        }

        if spec.total_burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                format!("Process {} has a zero CPU burst", spec.id),
            ));
        }

        if spec.io_episodes.len() > max_io_episodes {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyIoEpisodes,
                format!(
                    "Process {} has {} I/O episodes (limit {})",
                    spec.id,
                    spec.io_episodes.len(),
                    max_io_episodes
                ),
            ));
        }

        validate_io_episodes(spec, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_io_episodes(spec: &ProcessSpec, errors: &mut Vec<ValidationError>) {
    let mut previous = None;

    for episode in &spec.io_episodes {
        if episode.request_at == 0 || episode.request_at >= spec.total_burst {
            errors.push(ValidationError::new(
                ValidationErrorKind::IoRequestOutOfRange,
                format!(
                    "Process {} requests I/O at tick {} outside (0, {})",
                    spec.id, episode.request_at, spec.total_burst
                ),
            ));
        }

        if let Some(prev) = previous {
            if episode.request_at <= prev {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IoRequestNotIncreasing,
                    format!(
                        "Process {} I/O request at tick {} does not follow tick {}",
                        spec.id, episode.request_at, prev
                    ),
                ));
            }
        }
        previous = Some(episode.request_at);

        if episode.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroIoDuration,
                format!(
                    "Process {} has a zero-length I/O wait at tick {}",
                    spec.id, episode.request_at
                ),
            ));
        }
    }
}
