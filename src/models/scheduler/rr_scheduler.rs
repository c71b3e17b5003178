use std::collections::VecDeque;

use log::trace;

use super::scheduler::{Dispatch, Scheduler};
use crate::{JobRegistry, TimeStep, ID};

/// Round Robin over a FIFO ready queue.
///
/// Jobs enter the queue in `(arrival_time, id)` order once arrived. A
/// dispatched job holds the processor for at most `quantum` units; on the next
/// call every job that arrived during or at the end of its slice is admitted
/// before it goes back to the tail of the queue.
pub struct RoundRobin {
    quantum: TimeStep,
    pending: VecDeque<ID>, // Not yet admitted, arrival order
    ready: VecDeque<ID>,   // Ready queue
    running: Option<ID>,   // Job of the previous dispatch, requeued lazily
}

impl RoundRobin {
    pub fn new(quantum: TimeStep, registry: &JobRegistry) -> Self {
        Self {
            quantum,
            pending: registry.arrival_order().into(),
            ready: VecDeque::new(),
            running: None,
        }
    }

    fn admit(&mut self, time: TimeStep, registry: &JobRegistry) {
        while let Some(&job_id) = self.pending.front() {
            if !registry.get(job_id).is_some_and(|job| job.has_arrived(time)) {
                break;
            }
            trace!("t={} admitting job {}", time, job_id);
            self.pending.pop_front();
            self.ready.push_back(job_id);
        }
    }
}

impl Scheduler for RoundRobin {
    fn schedule(&mut self, time: TimeStep, registry: &JobRegistry) -> Option<Dispatch> {
        self.admit(time, registry);

        if let Some(job_id) = self.running.take() {
            if registry.get(job_id).is_some_and(|job| !job.is_complete()) {
                self.ready.push_back(job_id);
            }
        }

        while let Some(job_id) = self.ready.pop_front() {
            let Some(job) = registry.get(job_id) else {
                continue;
            };
            if job.is_complete() {
                continue;
            }
            self.running = Some(job_id);
            return Some(Dispatch {
                job_id,
                slice: self.quantum.min(job.remaining_time()),
            });
        }
        None
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}
