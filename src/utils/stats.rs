use crate::models::TimeStep;

/// Arithmetic mean of a list of time values, `None` when the list is empty.
pub fn mean(values: &[TimeStep]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: TimeStep = values.iter().sum();
    Some(sum as f64 / values.len() as f64)
}
