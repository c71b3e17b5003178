use std::cmp::Reverse;

use super::scheduler::{Dispatch, Scheduler};
use crate::{JobRegistry, TimeStep};

/// Preemptive priority scheduling, the largest priority value runs first.
pub struct PriorityPreemptive;

impl Scheduler for PriorityPreemptive {
    fn schedule(&mut self, time: TimeStep, registry: &JobRegistry) -> Option<Dispatch> {
        registry
            .arrived_at(time)
            .min_by_key(|job| (Reverse(job.priority()), job.id()))
            .map(|job| Dispatch {
                job_id: job.id(),
                slice: 1,
            })
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}
