//! Timeline (Gantt chart) model.
//!
//! Run-length encodes CPU occupancy into labeled intervals. The recorder
//! merges a new interval into the previous one when both carry the same
//! id and touch, unless the boundary was sealed (used for round-robin
//! quantum expiry).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ProcessId, Tick, IDLE_PROCESS_ID};

/// A half-open span `[start, end)` during which one process (or idle)
/// occupied the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInterval {
    /// Process id, or [`IDLE_PROCESS_ID`] for an idle gap.
    pub process_id: ProcessId,
    /// First tick of the span.
    pub start: Tick,
    /// First tick after the span.
    pub end: Tick,
}

impl TimelineInterval {
    /// Creates an interval.
    pub fn new(process_id: ProcessId, start: Tick, end: Tick) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Length in ticks.
    #[inline]
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }

    /// Whether this is an idle gap.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.process_id == IDLE_PROCESS_ID
    }
}

/// Ordered list of CPU occupancy intervals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    intervals: Vec<TimelineInterval>,
    #[serde(skip)]
    sealed: bool,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `[start, end)` for `process_id`.
    ///
    /// Empty spans are ignored. A span continuing the previous interval of
    /// the same id extends it, unless [`seal`](Self::seal) was called since.
    pub fn record(&mut self, process_id: ProcessId, start: Tick, end: Tick) {
        if start >= end {
            return;
        }
        let sealed = std::mem::take(&mut self.sealed);
        if !sealed {
            if let Some(last) = self.intervals.last_mut() {
                if last.process_id == process_id && last.end == start {
                    last.end = end;
                    return;
                }
            }
        }
        self.intervals
            .push(TimelineInterval::new(process_id, start, end));
    }

    /// Prevents the next recorded span from merging into the last one.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// All intervals in chronological order.
    pub fn intervals(&self) -> &[TimelineInterval] {
        &self.intervals
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Intervals belonging to one process.
    pub fn for_process(&self, process_id: ProcessId) -> Vec<&TimelineInterval> {
        self.intervals
            .iter()
            .filter(|i| i.process_id == process_id)
            .collect()
    }

    /// Ticks the CPU spent running `process_id`.
    pub fn time_for_process(&self, process_id: ProcessId) -> Tick {
        self.for_process(process_id)
            .iter()
            .map(|i| i.duration())
            .sum()
    }

    /// Ticks the CPU spent running any process.
    pub fn busy_time(&self) -> Tick {
        self.intervals
            .iter()
            .filter(|i| !i.is_idle())
            .map(|i| i.duration())
            .sum()
    }

    /// Ticks the CPU spent idle.
    pub fn idle_time(&self) -> Tick {
        self.time_for_process(IDLE_PROCESS_ID)
    }

    /// End of the last interval.
    pub fn makespan(&self) -> Tick {
        self.intervals.last().map(|i| i.end).unwrap_or(0)
    }

    /// Busy time over makespan. `None` for an empty timeline.
    pub fn utilization(&self) -> Option<f64> {
        let makespan = self.makespan();
        if makespan == 0 {
            return None;
        }
        Some(self.busy_time() as f64 / makespan as f64)
    }
}

impl PartialEq for Timeline {
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}

impl Eq for Timeline {}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for i in &self.intervals {
            if i.is_idle() {
                write!(f, " IDLE ({}-{}) |", i.start, i.end)?;
            } else {
                write!(f, " P{} ({}-{}) |", i.process_id, i.start, i.end)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.record(1, 0, 3);
        t.record(IDLE_PROCESS_ID, 3, 5);
        t.record(2, 5, 9);
        t.record(1, 9, 10);
        t
    }

    #[test]
    fn test_merge_contiguous_same_id() {
        let mut t = Timeline::new();
        t.record(1, 0, 2);
        t.record(1, 2, 5);
        assert_eq!(t.intervals(), &[TimelineInterval::new(1, 0, 5)]);
    }

    #[test]
    fn test_no_merge_across_other_process() {
        let mut t = Timeline::new();
        t.record(1, 0, 2);
        t.record(2, 2, 4);
        t.record(1, 4, 6);
        assert_eq!(t.len(), 3);
        assert_eq!(t.for_process(1).len(), 2);
    }

    #[test]
    fn test_no_merge_with_gap() {
        let mut t = Timeline::new();
        t.record(1, 0, 2);
        t.record(1, 3, 4);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_seal_splits_once() {
        let mut t = Timeline::new();
        t.record(1, 0, 4);
        t.seal();
        t.record(1, 4, 8);
        t.record(1, 8, 10);
        assert_eq!(
            t.intervals(),
            &[TimelineInterval::new(1, 0, 4), TimelineInterval::new(1, 4, 10)]
        );
    }

    #[test]
    fn test_empty_span_ignored() {
        let mut t = Timeline::new();
        t.record(1, 3, 3);
        assert!(t.is_empty());
        assert_eq!(t.makespan(), 0);
        assert!(t.utilization().is_none());
    }

    #[test]
    fn test_busy_idle_and_makespan() {
        let t = sample_timeline();
        assert_eq!(t.makespan(), 10);
        assert_eq!(t.busy_time(), 8);
        assert_eq!(t.idle_time(), 2);
        assert_eq!(t.time_for_process(1), 4);
        let util = t.utilization().unwrap();
        assert!((util - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_display() {
        let t = sample_timeline();
        assert_eq!(
            t.to_string(),
            "| P1 (0-3) | IDLE (3-5) | P2 (5-9) | P1 (9-10) |"
        );
    }
}
