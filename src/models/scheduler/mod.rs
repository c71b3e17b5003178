pub mod scheduler;
pub mod fcfs_scheduler;
pub mod sjf_scheduler;
pub mod priority_scheduler;
pub mod rr_scheduler;

pub use scheduler::{Dispatch, Scheduler};
pub use fcfs_scheduler::FirstComeFirstServed;
pub use sjf_scheduler::ShortestRemainingTime;
pub use priority_scheduler::PriorityPreemptive;
pub use rr_scheduler::RoundRobin;
