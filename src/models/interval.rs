use std::collections::HashMap;
use std::fmt;

use crate::SchedulingError;

use super::{TimeStep, ID};

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: TimeStep,
    pub end: TimeStep,
}

impl Interval {
    pub fn new(start: TimeStep, end: TimeStep) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> TimeStep {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Coalesces adjacent ranges of a chronologically ordered list.
///
/// `[a, b)` followed by `[b, c)` becomes `[a, c)`. Merging an already merged
/// list returns it unchanged.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if last.end == interval.start => last.end = interval.end,
            _ => merged.push(*interval),
        }
    }
    merged
}

/// Records, per job, the time ranges during which it held the processor.
#[derive(Debug, Default, Clone)]
pub struct IntervalTracker {
    intervals: HashMap<ID, Vec<Interval>>, // job id -> slices in recording order
    last_end: TimeStep,                    // End of the latest slice, any job
}

impl IntervalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `[start, end)` to the history of `job_id`.
    ///
    /// # Arguments
    /// * `job_id` - The job that held the processor.
    /// * `start` - First time unit of the slice.
    /// * `end` - Time at which the processor was released.
    ///
    /// # Returns
    /// An invariant violation if the slice is empty or starts before the
    /// processor was released by the previous slice.
    pub fn record(&mut self, job_id: ID, start: TimeStep, end: TimeStep) -> Result<(), SchedulingError> {
        if end <= start {
            return Err(SchedulingError::EmptyInterval { job_id, start, end });
        }

        let history = self.intervals.entry(job_id).or_default();
        let job_last_end = history.last().map_or(0, |interval| interval.end);
        let last_end = job_last_end.max(self.last_end);
        if start < last_end {
            return Err(SchedulingError::OverlappingInterval { job_id, start, last_end });
        }

        history.push(Interval::new(start, end));
        self.last_end = end;
        Ok(())
    }

    /// Raw slices of a job, in chronological order.
    pub fn intervals(&self, job_id: ID) -> &[Interval] {
        self.intervals.get(&job_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Maximal contiguous ranges of a job, for reporting.
    pub fn merged_intervals(&self, job_id: ID) -> Vec<Interval> {
        merge_intervals(self.intervals(job_id))
    }

    /// Returns whether the job never ran.
    pub fn is_empty(&self, job_id: ID) -> bool {
        self.intervals(job_id).is_empty()
    }

    /// CPU time the job received.
    pub fn total_time(&self, job_id: ID) -> TimeStep {
        self.intervals(job_id).iter().map(Interval::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adjacent_only() {
        let raw = vec![
            Interval::new(0, 1),
            Interval::new(1, 2),
            Interval::new(4, 5),
            Interval::new(5, 7),
            Interval::new(9, 10),
        ];
        let merged = merge_intervals(&raw);
        assert_eq!(
            merged,
            vec![Interval::new(0, 2), Interval::new(4, 7), Interval::new(9, 10)]
        );
        assert_eq!(merge_intervals(&merged), merged);
        assert!(merge_intervals(&[]).is_empty());
    }

    #[test]
    fn test_record_and_merge() {
        let mut tracker = IntervalTracker::new();
        tracker.record(1, 0, 1).unwrap();
        tracker.record(2, 1, 3).unwrap();
        tracker.record(1, 3, 4).unwrap();
        tracker.record(1, 4, 6).unwrap();

        assert_eq!(tracker.intervals(1).len(), 3);
        assert_eq!(tracker.merged_intervals(1), vec![Interval::new(0, 1), Interval::new(3, 6)]);
        assert_eq!(tracker.total_time(1), 4);
        assert_eq!(tracker.total_time(2), 2);
        assert!(tracker.is_empty(3));
        assert!(tracker.merged_intervals(3).is_empty());
    }

    #[test]
    fn test_record_rejects_empty_slice() {
        let mut tracker = IntervalTracker::new();
        assert_eq!(
            tracker.record(1, 2, 2),
            Err(SchedulingError::EmptyInterval { job_id: 1, start: 2, end: 2 })
        );
    }

    #[test]
    fn test_record_rejects_overlap() {
        let mut tracker = IntervalTracker::new();
        tracker.record(1, 0, 4).unwrap();
        assert_eq!(
            tracker.record(1, 3, 5),
            Err(SchedulingError::OverlappingInterval { job_id: 1, start: 3, last_end: 4 })
        );
        assert_eq!(
            tracker.record(2, 2, 6),
            Err(SchedulingError::OverlappingInterval { job_id: 2, start: 2, last_end: 4 })
        );
        tracker.record(2, 6, 7).unwrap();
        assert_eq!(tracker.intervals(1), &[Interval::new(0, 4)]);
    }

    #[test]
    fn test_interval_helpers() {
        let a = Interval::new(2, 5);
        assert_eq!(a.len(), 3);
        assert!(a.overlaps(&Interval::new(4, 6)));
        assert!(!a.overlaps(&Interval::new(5, 6)));
        assert_eq!(a.to_string(), "2 to 5");
    }
}
