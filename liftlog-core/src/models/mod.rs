mod category;
mod exercise;
mod set;
mod validation;
mod workout;

pub use category::{Difficulty, ExerciseCategory, WorkoutStatus};
pub use exercise::{Exercise, ExercisePatch, NewExercise};
pub use set::WorkoutSet;
pub use validation::ValidationError;
pub use workout::{NewWorkout, Workout, WorkoutExercise, WorkoutPatch};
