use crate::scheduler::{FirstComeFirstServed, PriorityPreemptive, RoundRobin, Scheduler, ShortestRemainingTime};
use crate::{JobRegistry, SchedulingError, TimeStep};

/// The scheduling discipline of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin(TimeStep), // time quantum
}

impl Policy {
    /// Builds a Round Robin policy from a user supplied quantum.
    ///
    /// # Arguments
    /// * `quantum` - The time slice granted per dispatch, must be positive.
    ///
    /// # Returns
    /// The policy, or `InvalidQuantum` when `quantum <= 0` or does not fit a `TimeStep`.
    pub fn round_robin(quantum: i64) -> Result<Self, SchedulingError> {
        match TimeStep::try_from(quantum) {
            Ok(slice) if slice > 0 => Ok(Policy::RoundRobin(slice)),
            _ => Err(SchedulingError::InvalidQuantum { quantum }),
        }
    }

    pub fn validate(&self) -> Result<(), SchedulingError> {
        match self {
            Policy::RoundRobin(0) => Err(SchedulingError::InvalidQuantum { quantum: 0 }),
            _ => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First Come First Served",
            Policy::Sjf => "Shortest Job First (preemptive)",
            Policy::Priority => "Priority (preemptive)",
            Policy::RoundRobin(_) => "Round Robin",
        }
    }

    /// Creates the job selection strategy for this policy over a validated registry.
    pub fn scheduler(&self, registry: &JobRegistry) -> Box<dyn Scheduler> {
        match *self {
            Policy::Fcfs => Box::new(FirstComeFirstServed::new(registry)),
            Policy::Sjf => Box::new(ShortestRemainingTime),
            Policy::Priority => Box::new(PriorityPreemptive),
            Policy::RoundRobin(quantum) => Box::new(RoundRobin::new(quantum, registry)),
        }
    }
}
