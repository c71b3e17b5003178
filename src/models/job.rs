use crate::SchedulingError;

use super::{Priority, TimeStep, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    id: ID,                              // Unique identifier, input order starting at 1
    arrival_time: TimeStep,              // Time at which the job becomes eligible to run
    burst_time: TimeStep,                // Total CPU time required
    priority: Priority,                  // Larger value wins
    remaining_time: TimeStep,            // CPU time still owed to the job
    completion_time: Option<TimeStep>,   // Set once, when remaining time reaches 0
}

impl Job {
    pub fn new(id: ID, arrival_time: TimeStep, burst_time: TimeStep, priority: Priority) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            completion_time: None,
        }
    }

    pub fn id(&self) -> ID {
        self.id
    }

    pub fn arrival_time(&self) -> TimeStep {
        self.arrival_time
    }

    pub fn burst_time(&self) -> TimeStep {
        self.burst_time
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn remaining_time(&self) -> TimeStep {
        self.remaining_time
    }

    pub fn completion_time(&self) -> Option<TimeStep> {
        self.completion_time
    }

    pub fn has_arrived(&self, t: TimeStep) -> bool {
        self.arrival_time <= t
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Forgets any previous run of the job.
    pub(crate) fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.completion_time = None;
    }

    /// Consumes `n_steps` units of the remaining time.
    pub(crate) fn schedule(&mut self, n_steps: TimeStep) -> Result<(), SchedulingError> {
        if n_steps > self.remaining_time {
            return Err(SchedulingError::Overconsumption {
                job_id: self.id,
                requested: n_steps,
                remaining: self.remaining_time,
            });
        }
        self.remaining_time -= n_steps;
        Ok(())
    }

    pub(crate) fn complete(&mut self, t: TimeStep) -> Result<(), SchedulingError> {
        if self.completion_time.is_some() {
            return Err(SchedulingError::AlreadyComplete { job_id: self.id });
        }
        if self.remaining_time != 0 {
            return Err(SchedulingError::IncompleteJob {
                job_id: self.id,
                remaining: self.remaining_time,
            });
        }
        self.completion_time = Some(t);
        Ok(())
    }
}
