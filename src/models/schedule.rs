use super::{Interval, JobMetrics, Priority, Summary, TimeStep, ID};
use crate::Policy;

/// Everything the caller reads back about one job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub job_id: ID,
    pub arrival_time: TimeStep,
    pub burst_time: TimeStep,
    pub priority: Priority,
    pub intervals: Vec<Interval>, // Merged execution ranges, chronological
    pub metrics: JobMetrics,
}

impl JobReport {
    pub fn completion_time(&self) -> TimeStep {
        self.metrics.completion_time
    }

    pub fn waiting_time(&self) -> TimeStep {
        self.metrics.waiting_time
    }

    pub fn turnaround_time(&self) -> TimeStep {
        self.metrics.turnaround_time
    }
}

/// One bar of the Gantt chart; `job_id` is `None` while the processor idles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub job_id: Option<ID>,
    pub interval: Interval,
}

/// Result of a completed simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    policy: Policy,
    jobs: Vec<JobReport>, // Input order
    timeline: Vec<Slice>,
    summary: Summary,
}

impl Schedule {
    pub fn new(policy: Policy, jobs: Vec<JobReport>, timeline: Vec<Slice>, summary: Summary) -> Self {
        Self {
            policy,
            jobs,
            timeline,
            summary,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn jobs(&self) -> &[JobReport] {
        &self.jobs
    }

    pub fn job(&self, job_id: ID) -> Option<&JobReport> {
        self.jobs.iter().find(|report| report.job_id == job_id)
    }

    /// Gantt chart covering `[0, makespan)` without gaps.
    pub fn timeline(&self) -> &[Slice] {
        &self.timeline
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Job ids in the order they finished.
    pub fn completion_order(&self) -> Vec<ID> {
        let mut order: Vec<(TimeStep, ID)> = self
            .jobs
            .iter()
            .map(|report| (report.completion_time(), report.job_id))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, id)| id).collect()
    }
}

/// Appends a slice to a timeline, extending the last bar when it continues it.
pub(crate) fn push_slice(timeline: &mut Vec<Slice>, job_id: Option<ID>, interval: Interval) {
    match timeline.last_mut() {
        Some(last) if last.job_id == job_id && last.interval.end == interval.start => {
            last.interval.end = interval.end;
        }
        _ => timeline.push(Slice { job_id, interval }),
    }
}
