//! LiftLog Core Library
//!
//! Workout and exercise models, the on-device store, and the resource hooks
//! that fall back to it when the remote API is unavailable.

pub mod api;
pub mod connectivity;
pub mod models;
pub mod resource;
pub mod stats;
pub mod store;

pub use api::{ApiClient, ApiError, HealthStatus};
pub use connectivity::{check_server, Connectivity, ConnectivityState};
pub use models::{
    Difficulty, Exercise, ExerciseCategory, ExercisePatch, NewExercise, NewWorkout,
    ValidationError, Workout, WorkoutExercise, WorkoutPatch, WorkoutSet, WorkoutStatus,
};
pub use resource::{ExerciseHook, RemoveOutcome, Resource, ResourceHook, WorkoutHook};
pub use stats::{most_recent, weekly_frequency, WorkoutStats};
pub use store::{generate_id, is_local_id, LocalStore, StorageKey, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
