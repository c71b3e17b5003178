//! Single-processor CPU scheduling simulator.
//!
//! A fixed job set is run under one of four disciplines (first come first
//! served, preemptive shortest job first, preemptive priority, round robin)
//! by a single driver loop that advances a virtual clock, asks the policy
//! which job holds the processor next and records every execution slice.
//! The result is a [`Schedule`] with per-job execution intervals, waiting
//! and turnaround times and their averages.

pub mod models;
pub mod simulation;
pub mod utils;

pub use models::*;
pub use simulation::{compare, simulation, Simulation, Step};
pub use utils::*;
