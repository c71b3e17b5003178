use super::scheduler::{Dispatch, Scheduler};
use crate::{JobRegistry, TimeStep, ID};

/// Non-preemptive, runs jobs to completion by `(arrival_time, id)`.
pub struct FirstComeFirstServed {
    order: Vec<ID>, // Arrival order, fixed at creation
    cursor: usize,  // First job of `order` not known to be complete
}

impl FirstComeFirstServed {
    pub fn new(registry: &JobRegistry) -> Self {
        Self {
            order: registry.arrival_order(),
            cursor: 0,
        }
    }
}

impl Scheduler for FirstComeFirstServed {
    fn schedule(&mut self, time: TimeStep, registry: &JobRegistry) -> Option<Dispatch> {
        while let Some(&job_id) = self.order.get(self.cursor) {
            let job = registry.get(job_id)?;
            if !job.is_complete() {
                // Jobs behind this one arrive no earlier, so nothing can run before it.
                if !job.has_arrived(time) {
                    return None;
                }
                return Some(Dispatch {
                    job_id,
                    slice: job.remaining_time(),
                });
            }
            self.cursor += 1;
        }
        None
    }

    fn is_preemptive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_to_completion_in_arrival_order() {
        let mut registry = JobRegistry::from_params(vec![(3, 2, 0), (0, 4, 0), (0, 1, 9)]).unwrap();
        let mut scheduler = FirstComeFirstServed::new(&registry);

        assert_eq!(scheduler.schedule(0, &registry), Some(Dispatch { job_id: 2, slice: 4 }));
        registry.decrement(2, 4).unwrap();
        registry.mark_complete(2, 4).unwrap();

        assert_eq!(scheduler.schedule(4, &registry), Some(Dispatch { job_id: 3, slice: 1 }));
        registry.decrement(3, 1).unwrap();
        registry.mark_complete(3, 5).unwrap();

        assert_eq!(scheduler.schedule(5, &registry), Some(Dispatch { job_id: 1, slice: 2 }));
    }

    #[test]
    fn test_idles_until_first_arrival() {
        let registry = JobRegistry::from_params(vec![(2, 2, 0), (5, 1, 0)]).unwrap();
        let mut scheduler = FirstComeFirstServed::new(&registry);

        assert_eq!(scheduler.schedule(0, &registry), None);
        assert_eq!(scheduler.schedule(2, &registry), Some(Dispatch { job_id: 1, slice: 2 }));
        assert!(!scheduler.is_preemptive());
    }
}
