use crate::{mean, SchedulingError};

use super::{Job, Processor, TimeStep, ID};

/// Timing metrics of one completed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobMetrics {
    pub job_id: ID,
    pub completion_time: TimeStep,
    pub turnaround_time: TimeStep, // completion - arrival
    pub waiting_time: TimeStep,    // turnaround - burst
}

impl JobMetrics {
    /// Derives turnaround and waiting time from the completion time of a job.
    ///
    /// # Returns
    /// `MissingCompletion` if the job never completed, or an invariant
    /// violation if it completed earlier than `arrival + burst`.
    pub fn compute(job: &Job) -> Result<Self, SchedulingError> {
        let completion_time = job
            .completion_time()
            .ok_or(SchedulingError::MissingCompletion { job_id: job.id() })?;

        let turnaround_time = completion_time
            .checked_sub(job.arrival_time())
            .filter(|&turnaround| turnaround >= job.burst_time())
            .ok_or(SchedulingError::EarlyCompletion {
                job_id: job.id(),
                t: completion_time,
            })?;

        Ok(Self {
            job_id: job.id(),
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - job.burst_time(),
        })
    }
}

/// Aggregate figures of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub job_count: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub total_waiting_time: TimeStep,
    pub total_turnaround_time: TimeStep,
    pub makespan: TimeStep,         // Completion time of the last job
    pub busy_time: TimeStep,
    pub context_switches: usize,
}

impl Summary {
    /// Averages the metrics of all jobs and reads the processor figures of the run.
    ///
    /// # Arguments
    /// * `metrics` - One entry per completed job.
    /// * `processor` - The processor that ran them.
    ///
    /// # Returns
    /// `EmptyInput` when there is no job to average over.
    pub fn aggregate(metrics: &[JobMetrics], processor: &Processor) -> Result<Self, SchedulingError> {
        let waiting: Vec<TimeStep> = metrics.iter().map(|m| m.waiting_time).collect();
        let turnaround: Vec<TimeStep> = metrics.iter().map(|m| m.turnaround_time).collect();
        let makespan = metrics.iter().map(|m| m.completion_time).max().unwrap_or(0);

        Ok(Self {
            job_count: metrics.len(),
            average_waiting_time: mean(&waiting).ok_or(SchedulingError::EmptyInput)?,
            average_turnaround_time: mean(&turnaround).ok_or(SchedulingError::EmptyInput)?,
            total_waiting_time: waiting.iter().sum(),
            total_turnaround_time: turnaround.iter().sum(),
            makespan,
            busy_time: processor.busy_time(),
            context_switches: processor.context_switches(),
        })
    }

    pub fn idle_time(&self) -> TimeStep {
        self.makespan.saturating_sub(self.busy_time)
    }

    /// Fraction of the makespan the processor spent running jobs.
    pub fn utilisation(&self) -> f64 {
        if self.makespan == 0 {
            return 0.0;
        }
        self.busy_time as f64 / self.makespan as f64
    }

    /// Completed jobs per time unit.
    pub fn throughput(&self) -> f64 {
        if self.makespan == 0 {
            return 0.0;
        }
        self.job_count as f64 / self.makespan as f64
    }
}
