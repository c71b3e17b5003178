use crate::SchedulingError;

use super::{Interval, TimeStep, ID};

/// The single processor of a run, owner of the simulation clock.
#[derive(Debug, Default)]
pub struct Processor {
    current_time: TimeStep,     // Virtual clock, only moves forward
    busy_time: TimeStep,        // Time spent running jobs
    last_job: Option<ID>,       // Job of the previous dispatch
    context_switches: usize,    // Dispatches of a job other than the previous one
}

impl Processor {
    /// Creates a processor whose clock starts at 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> TimeStep {
        self.current_time
    }

    pub fn busy_time(&self) -> TimeStep {
        self.busy_time
    }

    pub fn idle_time(&self) -> TimeStep {
        self.current_time - self.busy_time
    }

    pub fn context_switches(&self) -> usize {
        self.context_switches
    }

    /// Runs `job_id` for `n_steps` units starting now.
    ///
    /// # Returns
    /// The interval the job held the processor, or `ClockOverflow` if the
    /// clock cannot advance by `n_steps`.
    pub fn run(&mut self, job_id: ID, n_steps: TimeStep) -> Result<Interval, SchedulingError> {
        let start = self.current_time;
        let end = start
            .checked_add(n_steps)
            .ok_or(SchedulingError::ClockOverflow { t: start })?;

        if self.last_job.is_some_and(|last| last != job_id) {
            self.context_switches += 1;
        }
        self.last_job = Some(job_id);

        self.current_time = end;
        self.busy_time += n_steps; // busy_time <= current_time
        Ok(Interval::new(start, end))
    }

    /// Leaves the processor idle until `t`.
    ///
    /// # Returns
    /// The idle interval, or `Stalled` if `t` is not in the future.
    pub fn idle_until(&mut self, t: TimeStep) -> Result<Interval, SchedulingError> {
        if t <= self.current_time {
            return Err(SchedulingError::Stalled { t: self.current_time });
        }
        let start = self.current_time;
        self.current_time = t;
        Ok(Interval::new(start, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_advances_clock() {
        let mut processor = Processor::new();
        assert_eq!(processor.run(1, 3), Ok(Interval::new(0, 3)));
        assert_eq!(processor.run(1, 1), Ok(Interval::new(3, 4)));
        assert_eq!(processor.run(2, 2), Ok(Interval::new(4, 6)));
        assert_eq!(processor.now(), 6);
        assert_eq!(processor.busy_time(), 6);
        assert_eq!(processor.context_switches(), 1);
    }

    #[test]
    fn test_idle_until() {
        let mut processor = Processor::new();
        assert_eq!(processor.idle_until(2), Ok(Interval::new(0, 2)));
        processor.run(1, 1).unwrap();
        assert_eq!(processor.idle_until(3), Err(SchedulingError::Stalled { t: 3 }));
        assert_eq!(processor.idle_time(), 2);
        assert_eq!(processor.busy_time(), 1);
    }

    #[test]
    fn test_run_past_the_end_of_the_clock() {
        let mut processor = Processor::new();
        processor.idle_until(TimeStep::MAX - 1).unwrap();
        assert_eq!(processor.run(1, 2), Err(SchedulingError::ClockOverflow { t: TimeStep::MAX - 1 }));
        assert_eq!(processor.now(), TimeStep::MAX - 1);
        assert_eq!(processor.context_switches(), 0);
        assert_eq!(processor.run(1, 1), Ok(Interval::new(TimeStep::MAX - 1, TimeStep::MAX)));
    }
}
