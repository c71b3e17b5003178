use std::error::Error;
use std::fmt;

use crate::models::{TimeStep, ID};

/// Broad category of a `SchedulingError`, doubling as the process exit code of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput = 1,
    InvalidInput = 2,
    InvalidConfig = 3,
    InvariantViolation = 4,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// No job was supplied.
    EmptyInput,
    /// A job needs at least one unit of CPU time.
    InvalidBurst { job_id: ID },
    /// Arrival times are non-negative.
    InvalidArrival { job_id: ID },
    /// The job set cannot complete within the range of the clock.
    TimeOverflow { job_id: ID },
    /// Job ids are positive.
    InvalidId { job_id: ID },
    DuplicateId { job_id: ID },
    /// Round Robin quantum must be a positive integer.
    InvalidQuantum { quantum: i64 },

    // Internal consistency failures, a run hitting one of these is aborted.
    Overconsumption { job_id: ID, requested: TimeStep, remaining: TimeStep },
    UnknownJob { job_id: ID },
    AlreadyComplete { job_id: ID },
    IncompleteJob { job_id: ID, remaining: TimeStep },
    EmptyInterval { job_id: ID, start: TimeStep, end: TimeStep },
    OverlappingInterval { job_id: ID, start: TimeStep, last_end: TimeStep },
    NotArrived { job_id: ID, t: TimeStep },
    MissingCompletion { job_id: ID },
    EarlyCompletion { job_id: ID, t: TimeStep },
    ClockOverflow { t: TimeStep },
    /// The policy left the processor idle although arrived jobs were pending.
    Stalled { t: TimeStep },
}

impl SchedulingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulingError::EmptyInput => ErrorKind::EmptyInput,
            SchedulingError::InvalidBurst { .. }
            | SchedulingError::InvalidArrival { .. }
            | SchedulingError::TimeOverflow { .. }
            | SchedulingError::InvalidId { .. }
            | SchedulingError::DuplicateId { .. } => ErrorKind::InvalidInput,
            SchedulingError::InvalidQuantum { .. } => ErrorKind::InvalidConfig,
            _ => ErrorKind::InvariantViolation,
        }
    }

    /// Returns whether the error reports a defect of the simulator rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        self.kind() == ErrorKind::InvariantViolation
    }
}

impl fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingError::EmptyInput => write!(f, "no job to schedule"),
            SchedulingError::InvalidBurst { job_id } => {
                write!(f, "job {} has a non-positive burst time", job_id)
            }
            SchedulingError::InvalidArrival { job_id } => {
                write!(f, "job {} has a negative arrival time", job_id)
            }
            SchedulingError::TimeOverflow { job_id } => {
                write!(f, "job {} cannot complete before the clock overflows", job_id)
            }
            SchedulingError::InvalidId { job_id } => write!(f, "invalid job id {}", job_id),
            SchedulingError::DuplicateId { job_id } => write!(f, "duplicate job id {}", job_id),
            SchedulingError::InvalidQuantum { quantum } => {
                write!(f, "time quantum must be a positive integer, got {}", quantum)
            }
            SchedulingError::Overconsumption { job_id, requested, remaining } => write!(
                f,
                "job {} asked to run {} units with only {} remaining",
                job_id, requested, remaining
            ),
            SchedulingError::UnknownJob { job_id } => write!(f, "unknown job {}", job_id),
            SchedulingError::AlreadyComplete { job_id } => {
                write!(f, "job {} is already complete", job_id)
            }
            SchedulingError::IncompleteJob { job_id, remaining } => write!(
                f,
                "job {} cannot complete with {} units remaining",
                job_id, remaining
            ),
            SchedulingError::EmptyInterval { job_id, start, end } => {
                write!(f, "empty interval [{}, {}) for job {}", start, end, job_id)
            }
            SchedulingError::OverlappingInterval { job_id, start, last_end } => write!(
                f,
                "interval of job {} starts at {} before the processor was released at {}",
                job_id, start, last_end
            ),
            SchedulingError::NotArrived { job_id, t } => {
                write!(f, "job {} dispatched at time {} before its arrival", job_id, t)
            }
            SchedulingError::MissingCompletion { job_id } => {
                write!(f, "job {} has no completion time", job_id)
            }
            SchedulingError::EarlyCompletion { job_id, t } => {
                write!(f, "job {} completed at time {}, before arrival plus burst", job_id, t)
            }
            SchedulingError::ClockOverflow { t } => {
                write!(f, "clock overflow at time {}", t)
            }
            SchedulingError::Stalled { t } => {
                write!(f, "processor idle at time {} with arrived jobs pending", t)
            }
        }
    }
}

impl Error for SchedulingError {}
