use crate::{JobRegistry, TimeStep, ID};

/// A job elected to hold the processor for `slice` time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub job_id: ID,
    pub slice: TimeStep,
}

/// Job selection strategy driven by the simulation loop.
///
/// The driver calls `schedule` once per step with the current time and a
/// read-only view of the jobs. The strategy answers with the job to run, or
/// `None` to leave the processor idle until the next arrival. It never
/// mutates the registry, only its own bookkeeping (a ready queue, a cursor).
pub trait Scheduler: Send {
    fn schedule(&mut self, time: TimeStep, registry: &JobRegistry) -> Option<Dispatch>;

    /// Returns whether a running job can lose the processor before finishing.
    fn is_preemptive(&self) -> bool;
}
