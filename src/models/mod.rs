mod job;
pub mod processor;
pub mod interval;
pub mod metrics;
pub mod registry;
pub mod schedule;
pub mod scheduler;

pub use processor::Processor;
pub use interval::{merge_intervals, Interval, IntervalTracker};
pub use job::Job;
pub use metrics::{JobMetrics, Summary};
pub use registry::JobRegistry;
pub use schedule::{JobReport, Schedule, Slice};

pub type TimeStep = usize;

pub type ID = u32;

pub type Priority = i32;
