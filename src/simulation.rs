use log::{debug, info, trace};

use crate::models::schedule::push_slice;
use crate::scheduler::Scheduler;
use crate::{
    Interval, IntervalTracker, Job, JobMetrics, JobRegistry, JobReport, Policy, Processor,
    Schedule, SchedulingError, Slice, Summary, TimeStep, ID,
};

/// Outcome of one driver iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Dispatched { job_id: ID, interval: Interval, completed: bool },
    Idle { interval: Interval },
    Finished,
}

/// One run of a policy over a job set.
///
/// The simulation exclusively owns the jobs, the interval history and the
/// processor clock; independent simulations share nothing.
pub struct Simulation {
    policy: Policy,
    registry: JobRegistry,
    tracker: IntervalTracker,
    processor: Processor,
    scheduler: Box<dyn Scheduler>,
    timeline: Vec<Slice>,
}

impl Simulation {
    /// Validates the input and prepares a run with the clock at 0.
    ///
    /// # Arguments
    /// * `jobs` - The job set, in input order.
    /// * `policy` - The scheduling discipline.
    ///
    /// # Returns
    /// The simulation, or the first input or configuration error found.
    pub fn new(jobs: Vec<Job>, policy: Policy) -> Result<Self, SchedulingError> {
        let registry = JobRegistry::new(jobs)?;
        policy.validate()?;

        Ok(Self {
            policy,
            scheduler: policy.scheduler(&registry),
            registry,
            tracker: IntervalTracker::new(),
            processor: Processor::new(),
            timeline: Vec::new(),
        })
    }

    pub fn now(&self) -> TimeStep {
        self.processor.now()
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn tracker(&self) -> &IntervalTracker {
        &self.tracker
    }

    pub fn is_finished(&self) -> bool {
        self.registry.all_complete()
    }

    /// Asks the policy for the next job and runs it, or idles until the next arrival.
    pub fn step(&mut self) -> Result<Step, SchedulingError> {
        if self.is_finished() {
            return Ok(Step::Finished);
        }

        let now = self.processor.now();
        match self.scheduler.schedule(now, &self.registry) {
            Some(dispatch) => {
                let job = self
                    .registry
                    .get(dispatch.job_id)
                    .ok_or(SchedulingError::UnknownJob { job_id: dispatch.job_id })?;
                if !job.has_arrived(now) {
                    return Err(SchedulingError::NotArrived { job_id: dispatch.job_id, t: now });
                }
                if dispatch.slice > job.remaining_time() {
                    return Err(SchedulingError::Overconsumption {
                        job_id: dispatch.job_id,
                        requested: dispatch.slice,
                        remaining: job.remaining_time(),
                    });
                }
                let end = now
                    .checked_add(dispatch.slice)
                    .ok_or(SchedulingError::ClockOverflow { t: now })?;

                // Nothing has moved until the tracker accepts the slice.
                self.tracker.record(dispatch.job_id, now, end)?;
                self.registry.decrement(dispatch.job_id, dispatch.slice)?;
                let interval = self.processor.run(dispatch.job_id, dispatch.slice)?;
                push_slice(&mut self.timeline, Some(dispatch.job_id), interval);
                debug!("t={} job {} runs until {}", now, dispatch.job_id, interval.end);

                let completed = self
                    .registry
                    .get(dispatch.job_id)
                    .is_some_and(|job| job.is_complete());
                if completed {
                    self.registry.mark_complete(dispatch.job_id, interval.end)?;
                    debug!("t={} job {} complete", interval.end, dispatch.job_id);
                }

                Ok(Step::Dispatched {
                    job_id: dispatch.job_id,
                    interval,
                    completed,
                })
            }
            None => {
                if self.registry.arrived_at(now).next().is_some() {
                    return Err(SchedulingError::Stalled { t: now });
                }
                let next_arrival = self
                    .registry
                    .next_arrival_after(now)
                    .ok_or(SchedulingError::Stalled { t: now })?;
                let interval = self.processor.idle_until(next_arrival)?;
                push_slice(&mut self.timeline, None, interval);
                trace!("t={} idle until {}", now, next_arrival);

                Ok(Step::Idle { interval })
            }
        }
    }

    /// Steps until every job is complete and builds the schedule.
    pub fn run(mut self) -> Result<Schedule, SchedulingError> {
        info!(
            "{}: simulating {} jobs, {} units of work, {}",
            self.policy.name(),
            self.registry.len(),
            self.registry.total_burst(),
            if self.scheduler.is_preemptive() { "preemptive" } else { "non-preemptive" }
        );

        while self.step()? != Step::Finished {}

        self.finish()
    }

    fn finish(self) -> Result<Schedule, SchedulingError> {
        let mut reports = Vec::with_capacity(self.registry.len());
        for job in self.registry.iter() {
            reports.push(JobReport {
                job_id: job.id(),
                arrival_time: job.arrival_time(),
                burst_time: job.burst_time(),
                priority: job.priority(),
                intervals: self.tracker.merged_intervals(job.id()),
                metrics: JobMetrics::compute(job)?,
            });
        }

        let metrics: Vec<JobMetrics> = reports.iter().map(|report| report.metrics).collect();
        let summary = Summary::aggregate(&metrics, &self.processor)?;
        info!(
            "{}: average waiting time {:.2}, average turnaround time {:.2}",
            self.policy.name(),
            summary.average_waiting_time,
            summary.average_turnaround_time
        );

        Ok(Schedule::new(self.policy, reports, self.timeline, summary))
    }
}

/// Runs `policy` over `jobs` and returns the computed schedule.
pub fn simulation(jobs: Vec<Job>, policy: Policy) -> Result<Schedule, SchedulingError> {
    Simulation::new(jobs, policy)?.run()
}

/// Runs the four disciplines over independent copies of `jobs`, Round Robin with `quantum`.
pub fn compare(jobs: &[Job], quantum: i64) -> Result<Vec<Schedule>, SchedulingError> {
    let policies = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::round_robin(quantum)?,
    ];

    policies
        .iter()
        .map(|&policy| simulation(jobs.to_vec(), policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(params: &[(TimeStep, TimeStep, i32)]) -> Vec<Job> {
        params
            .iter()
            .zip(1..)
            .map(|(&(arrival, burst, priority), id)| Job::new(id, arrival, burst, priority))
            .collect()
    }

    fn intervals(schedule: &Schedule, job_id: ID) -> Vec<(TimeStep, TimeStep)> {
        schedule
            .job(job_id)
            .unwrap()
            .intervals
            .iter()
            .map(|interval| (interval.start, interval.end))
            .collect()
    }

    #[test]
    fn test_fcfs_completion_times() {
        let schedule = simulation(jobs(&[(0, 5, 0), (1, 3, 0), (2, 1, 0)]), Policy::Fcfs).unwrap();

        let completions: Vec<TimeStep> = schedule.jobs().iter().map(|r| r.completion_time()).collect();
        assert_eq!(completions, vec![5, 8, 9]);
        assert_eq!(intervals(&schedule, 2), vec![(5, 8)]);
        assert_eq!(schedule.summary().total_waiting_time, 4 + 6);
    }

    #[test]
    fn test_sjf_textbook_trace() {
        let schedule = simulation(jobs(&[(0, 8, 0), (1, 4, 0), (2, 9, 0), (3, 5, 0)]), Policy::Sjf).unwrap();

        assert_eq!(intervals(&schedule, 1), vec![(0, 1), (10, 17)]);
        assert_eq!(intervals(&schedule, 2), vec![(1, 5)]);
        assert_eq!(intervals(&schedule, 3), vec![(17, 26)]);
        assert_eq!(intervals(&schedule, 4), vec![(5, 10)]);
        assert_eq!(schedule.summary().average_waiting_time, 6.5);
        assert_eq!(schedule.summary().average_turnaround_time, 13.0);
    }

    #[test]
    fn test_priority_preemption() {
        let schedule = simulation(jobs(&[(0, 4, 1), (1, 2, 5), (2, 1, 3)]), Policy::Priority).unwrap();

        assert_eq!(intervals(&schedule, 1), vec![(0, 1), (4, 7)]);
        assert_eq!(intervals(&schedule, 2), vec![(1, 3)]);
        assert_eq!(intervals(&schedule, 3), vec![(3, 4)]);
        assert_eq!(schedule.completion_order(), vec![2, 3, 1]);
    }

    #[test]
    fn test_round_robin_quantum_2() {
        let schedule = simulation(jobs(&[(0, 5, 0), (1, 3, 0), (2, 1, 0)]), Policy::RoundRobin(2)).unwrap();

        assert_eq!(intervals(&schedule, 1), vec![(0, 2), (5, 7), (8, 9)]);
        assert_eq!(intervals(&schedule, 2), vec![(2, 4), (7, 8)]);
        assert_eq!(intervals(&schedule, 3), vec![(4, 5)]);
        assert_eq!(schedule.completion_order(), vec![3, 2, 1]);
        assert_eq!(schedule.summary().context_switches, 5);
    }

    #[test]
    fn test_idle_gap_is_part_of_timeline() {
        let schedule = simulation(jobs(&[(2, 2, 0), (6, 1, 0)]), Policy::Sjf).unwrap();

        let timeline: Vec<(Option<ID>, TimeStep, TimeStep)> = schedule
            .timeline()
            .iter()
            .map(|slice| (slice.job_id, slice.interval.start, slice.interval.end))
            .collect();
        assert_eq!(
            timeline,
            vec![(None, 0, 2), (Some(1), 2, 4), (None, 4, 6), (Some(2), 6, 7)]
        );
        assert_eq!(schedule.summary().idle_time(), 4);
        assert_eq!(schedule.summary().makespan, 7);
    }

    #[test]
    fn test_step_reports_progress() {
        let mut sim = Simulation::new(jobs(&[(1, 2, 0)]), Policy::Fcfs).unwrap();

        assert_eq!(sim.step(), Ok(Step::Idle { interval: Interval::new(0, 1) }));
        assert_eq!(
            sim.step(),
            Ok(Step::Dispatched { job_id: 1, interval: Interval::new(1, 3), completed: true })
        );
        assert_eq!(sim.step(), Ok(Step::Finished));
        assert_eq!(sim.now(), 3);
        assert!(sim.is_finished());
    }

    #[test]
    fn test_input_errors_before_any_step() {
        assert_eq!(Simulation::new(vec![], Policy::Fcfs).err(), Some(SchedulingError::EmptyInput));
        assert_eq!(
            Simulation::new(jobs(&[(0, 1, 0)]), Policy::RoundRobin(0)).err(),
            Some(SchedulingError::InvalidQuantum { quantum: 0 })
        );
        assert_eq!(
            Simulation::new(jobs(&[(0, 0, 0)]), Policy::Sjf).err(),
            Some(SchedulingError::InvalidBurst { job_id: 1 })
        );
    }

    struct Lazy;

    impl Scheduler for Lazy {
        fn schedule(&mut self, _: TimeStep, _: &JobRegistry) -> Option<crate::scheduler::Dispatch> {
            None
        }

        fn is_preemptive(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_stalled_policy_is_reported() {
        let mut sim = Simulation::new(jobs(&[(0, 1, 0)]), Policy::Fcfs).unwrap();
        sim.scheduler = Box::new(Lazy);
        assert_eq!(sim.step(), Err(SchedulingError::Stalled { t: 0 }));
    }

    /// Hands out one unit more than the first job has left, or an empty slice.
    struct Faulty {
        extra: bool,
    }

    impl Scheduler for Faulty {
        fn schedule(&mut self, _: TimeStep, registry: &JobRegistry) -> Option<crate::scheduler::Dispatch> {
            let job = registry.get(1)?;
            let slice = if self.extra { job.remaining_time() + 1 } else { 0 };
            Some(crate::scheduler::Dispatch { job_id: 1, slice })
        }

        fn is_preemptive(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_rejected_dispatch_leaves_state_untouched() {
        for extra in [true, false] {
            let mut sim = Simulation::new(jobs(&[(0, 3, 0)]), Policy::Sjf).unwrap();
            sim.scheduler = Box::new(Faulty { extra });

            let err = sim.step().unwrap_err();
            assert!(err.is_invariant_violation());
            assert_eq!(sim.now(), 0);
            assert_eq!(sim.registry().get(1).unwrap().remaining_time(), 3);
            assert!(sim.tracker().is_empty(1));
            assert!(sim.timeline.is_empty());

            // Stepping on with a sound policy picks up from the same state.
            sim.scheduler = Policy::Sjf.scheduler(sim.registry());
            let schedule = sim.run().unwrap();
            assert_eq!(intervals(&schedule, 1), vec![(0, 3)]);
        }
    }

    #[test]
    fn test_arrival_at_the_end_of_the_clock() {
        assert_eq!(
            simulation(vec![Job::new(1, TimeStep::MAX, 1, 0)], Policy::Sjf).unwrap_err(),
            SchedulingError::TimeOverflow { job_id: 1 }
        );

        let schedule = simulation(vec![Job::new(1, TimeStep::MAX - 1, 1, 0)], Policy::Sjf).unwrap();
        assert_eq!(schedule.job(1).unwrap().completion_time(), TimeStep::MAX);
    }

    #[test]
    fn test_compare_runs_every_policy() {
        let schedules = compare(&jobs(&[(0, 5, 1), (1, 3, 2), (2, 1, 3)]), 2).unwrap();
        let policies: Vec<Policy> = schedules.iter().map(|s| s.policy()).collect();
        assert_eq!(
            policies,
            vec![Policy::Fcfs, Policy::Sjf, Policy::Priority, Policy::RoundRobin(2)]
        );
        assert!(compare(&jobs(&[(0, 1, 0)]), -1).is_err());
    }
}
