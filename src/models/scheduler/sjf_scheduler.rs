use super::scheduler::{Dispatch, Scheduler};
use crate::{JobRegistry, TimeStep};

/// Preemptive shortest job first, a.k.a. shortest remaining time first.
///
/// Every time unit the arrived job with the least remaining time runs, the
/// lowest id winning ties.
pub struct ShortestRemainingTime;

impl Scheduler for ShortestRemainingTime {
    fn schedule(&mut self, time: TimeStep, registry: &JobRegistry) -> Option<Dispatch> {
        registry
            .arrived_at(time)
            .min_by_key(|job| (job.remaining_time(), job.id()))
            .map(|job| Dispatch {
                job_id: job.id(),
                slice: 1,
            })
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}
