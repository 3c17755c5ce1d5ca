use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{require_non_negative, ValidationError};

/// One set of an exercise within a workout.
///
/// `set_number` is owned by the enclosing [`WorkoutExercise`](super::WorkoutExercise),
/// which keeps the numbers contiguous from 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    #[serde(default)]
    pub set_number: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutSet {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self {
            set_number: 0,
            reps,
            weight,
            completed: false,
            duration: None,
            distance: None,
            notes: None,
        }
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Weight times reps; zero for sets that were not completed.
    pub fn volume(&self) -> f64 {
        if self.completed {
            self.weight * f64::from(self.reps)
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("weight", self.weight)?;
        if let Some(distance) = self.distance {
            require_non_negative("distance", distance)?;
        }
        Ok(())
    }
}

impl fmt::Display for WorkoutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(
            f,
            "[{}] Set {}: {} reps @ {}",
            mark, self.set_number, self.reps, self.weight
        )?;
        if let Some(duration) = self.duration {
            write!(f, ", {}s", duration)?;
        }
        if let Some(distance) = self.distance {
            write!(f, ", {} distance", distance)?;
        }
        Ok(())
    }
}
