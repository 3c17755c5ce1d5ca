use thiserror::Error;

/// A user-submitted value was rejected before anything was written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("Completed workouts cannot be edited")]
    WorkoutCompleted,

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Returns `Required` when the value is empty after trimming.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Returns `Negative` for values below zero. NaN is rejected as well.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}
