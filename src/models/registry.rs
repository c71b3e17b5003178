use std::collections::HashMap;

use crate::SchedulingError;

use super::{Job, Priority, TimeStep, ID};

/// Arena owning the jobs of one simulation run.
///
/// Jobs are kept in input order and addressed by id; nothing outside the
/// registry holds a reference to a job across a mutation.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    jobs: Vec<Job>,
    index: HashMap<ID, usize>, // job id -> position in `jobs`
}

impl JobRegistry {
    /// Validates a job set and resets its simulation state.
    ///
    /// # Arguments
    /// * `jobs` - The jobs to simulate, in input order.
    ///
    /// # Returns
    /// The registry, `EmptyInput` for an empty list, or an input error for a
    /// job with a zero burst time, a zero id or an id used twice, and
    /// `TimeOverflow` when the last job could not complete within `TimeStep`.
    pub fn new(mut jobs: Vec<Job>) -> Result<Self, SchedulingError> {
        if jobs.is_empty() {
            return Err(SchedulingError::EmptyInput);
        }

        let mut index = HashMap::with_capacity(jobs.len());
        for (position, job) in jobs.iter_mut().enumerate() {
            if job.id() == 0 {
                return Err(SchedulingError::InvalidId { job_id: job.id() });
            }
            if job.burst_time() == 0 {
                return Err(SchedulingError::InvalidBurst { job_id: job.id() });
            }
            if job.arrival_time().checked_add(job.burst_time()).is_none() {
                return Err(SchedulingError::TimeOverflow { job_id: job.id() });
            }
            if index.insert(job.id(), position).is_some() {
                return Err(SchedulingError::DuplicateId { job_id: job.id() });
            }
            job.reset();
        }
        check_horizon(&jobs)?;

        Ok(Self { jobs, index })
    }

    /// Builds the registry from `(arrival, burst, priority)` triples, numbering jobs from 1.
    pub fn from_params<I>(params: I) -> Result<Self, SchedulingError>
    where
        I: IntoIterator<Item = (TimeStep, TimeStep, Priority)>,
    {
        let jobs = params
            .into_iter()
            .zip(1..)
            .map(|((arrival, burst, priority), id)| Job::new(id, arrival, burst, priority))
            .collect();
        Self::new(jobs)
    }

    pub fn get(&self, job_id: ID) -> Option<&Job> {
        self.index.get(&job_id).map(|&i| &self.jobs[i])
    }

    fn get_mut(&mut self, job_id: ID) -> Result<&mut Job, SchedulingError> {
        match self.index.get(&job_id) {
            Some(&i) => Ok(&mut self.jobs[i]),
            None => Err(SchedulingError::UnknownJob { job_id }),
        }
    }

    /// Jobs in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs that have arrived at `t` and still need the processor, in no particular order.
    pub fn arrived_at(&self, t: TimeStep) -> impl Iterator<Item = &Job> + '_ {
        self.jobs
            .iter()
            .filter(move |job| job.has_arrived(t) && !job.is_complete())
    }

    pub fn all_complete(&self) -> bool {
        self.jobs.iter().all(|job| job.is_complete())
    }

    /// Earliest arrival of an incomplete job strictly after `t`.
    pub fn next_arrival_after(&self, t: TimeStep) -> Option<TimeStep> {
        self.jobs
            .iter()
            .filter(|job| !job.is_complete() && job.arrival_time() > t)
            .map(|job| job.arrival_time())
            .min()
    }

    /// Job ids ordered by `(arrival_time, id)`.
    pub fn arrival_order(&self) -> Vec<ID> {
        let mut order: Vec<(TimeStep, ID)> = self
            .jobs
            .iter()
            .map(|job| (job.arrival_time(), job.id()))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, id)| id).collect()
    }

    /// Sum of all burst times, bounded by `check_horizon` at construction.
    pub fn total_burst(&self) -> TimeStep {
        self.jobs.iter().map(|job| job.burst_time()).sum()
    }

    /// Reduces the remaining time of a job by `amount`.
    pub fn decrement(&mut self, job_id: ID, amount: TimeStep) -> Result<(), SchedulingError> {
        self.get_mut(job_id)?.schedule(amount)
    }

    /// Records the completion time of a job whose remaining time reached 0.
    pub fn mark_complete(&mut self, job_id: ID, t: TimeStep) -> Result<(), SchedulingError> {
        self.get_mut(job_id)?.complete(t)
    }
}

/// Makes sure the clock can reach the latest possible completion,
/// the last arrival followed by every burst.
fn check_horizon(jobs: &[Job]) -> Result<(), SchedulingError> {
    let mut total_burst: TimeStep = 0;
    for job in jobs {
        total_burst = total_burst
            .checked_add(job.burst_time())
            .ok_or(SchedulingError::TimeOverflow { job_id: job.id() })?;
    }

    match jobs.iter().max_by_key(|job| job.arrival_time()) {
        Some(last) if last.arrival_time().checked_add(total_burst).is_none() => {
            Err(SchedulingError::TimeOverflow { job_id: last.id() })
        }
        _ => Ok(()),
    }
}
