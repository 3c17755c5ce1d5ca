use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Balance,
    Sports,
    #[default]
    Other,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 6] = [
        ExerciseCategory::Strength,
        ExerciseCategory::Cardio,
        ExerciseCategory::Flexibility,
        ExerciseCategory::Balance,
        ExerciseCategory::Sports,
        ExerciseCategory::Other,
    ];
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseCategory::Strength => write!(f, "strength"),
            ExerciseCategory::Cardio => write!(f, "cardio"),
            ExerciseCategory::Flexibility => write!(f, "flexibility"),
            ExerciseCategory::Balance => write!(f, "balance"),
            ExerciseCategory::Sports => write!(f, "sports"),
            ExerciseCategory::Other => write!(f, "other"),
        }
    }
}

impl FromStr for ExerciseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" => Ok(ExerciseCategory::Strength),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "flexibility" => Ok(ExerciseCategory::Flexibility),
            "balance" => Ok(ExerciseCategory::Balance),
            "sports" => Ok(ExerciseCategory::Sports),
            "other" => Ok(ExerciseCategory::Other),
            _ => Err(format!(
                "Invalid category '{}'. Valid options: strength, cardio, flexibility, balance, sports, other",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!(
                "Invalid difficulty '{}'. Valid options: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

/// Lifecycle of a workout. Moves one way only: planned, then completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    #[default]
    Planned,
    Completed,
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutStatus::Planned => write!(f, "planned"),
            WorkoutStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for WorkoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(WorkoutStatus::Planned),
            "completed" => Ok(WorkoutStatus::Completed),
            _ => Err(format!(
                "Invalid status '{}'. Valid options: planned, completed",
                s
            )),
        }
    }
}
