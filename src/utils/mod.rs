pub mod constants;
pub mod errors;
pub mod stats;

pub use constants::Policy;
pub use errors::{ErrorKind, SchedulingError};
pub use stats::mean;
