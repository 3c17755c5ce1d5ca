use chrono::{DateTime, Utc};

use super::{Resource, ResourceHook};
use crate::models::{
    Exercise, NewWorkout, ValidationError, Workout, WorkoutExercise, WorkoutPatch, WorkoutSet,
    WorkoutStatus,
};
use crate::stats::{most_recent, WorkoutStats};
use crate::store::StorageKey;

impl Resource for Workout {
    type Draft = NewWorkout;
    type Patch = WorkoutPatch;

    const KEY: StorageKey = StorageKey::Workouts;
    const PATH: &'static str = "workouts";
    const KIND: &'static str = "Workout";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_draft(draft: &NewWorkout) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn check_patch(&self, patch: &WorkoutPatch) -> Result<(), ValidationError> {
        Workout::check_patch(self, patch)
    }

    fn from_draft(draft: &NewWorkout, id: String, now: DateTime<Utc>) -> Self {
        Workout::from_draft(draft, id, now)
    }

    fn apply_patch(&mut self, patch: &WorkoutPatch, now: DateTime<Utc>) {
        Workout::apply_patch(self, patch, now)
    }
}

pub type WorkoutHook = ResourceHook<Workout>;

impl ResourceHook<Workout> {
    pub fn by_status(&self, status: WorkoutStatus) -> Vec<Workout> {
        self.with_items(|items| items.iter().filter(|w| w.status == status).cloned().collect())
    }

    /// The `n` most recently created workouts, newest first.
    pub fn recent(&self, n: usize) -> Vec<Workout> {
        self.with_items(|items| most_recent(items, n))
    }

    pub fn stats(&self) -> WorkoutStats {
        self.with_items(WorkoutStats::from_workouts)
    }

    /// Marks a workout completed. Completing an already completed workout is a no-op.
    pub async fn complete(&self, id: &str) -> Result<Workout, ValidationError> {
        let current = self.current(id).ok_or_else(|| Self::not_found(id))?;
        if current.status == WorkoutStatus::Completed {
            return Ok(current);
        }

        self.update(id, WorkoutPatch::status(WorkoutStatus::Completed))
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Appends an exercise with no sets, snapshotting its name and category.
    pub async fn add_exercise(
        &self,
        id: &str,
        exercise: &Exercise,
    ) -> Result<Workout, ValidationError> {
        self.edit_exercises(id, |exercises| {
            exercises.push(WorkoutExercise::from_exercise(exercise));
            Ok(())
        })
        .await
    }

    pub async fn add_set(
        &self,
        id: &str,
        workout_exercise_id: &str,
        set: WorkoutSet,
    ) -> Result<Workout, ValidationError> {
        set.validate()?;
        self.edit_exercises(id, |exercises| {
            entry(exercises, workout_exercise_id)?.add_set(set);
            Ok(())
        })
        .await
    }

    /// Removes a set and renumbers the remaining ones from 1.
    pub async fn remove_set(
        &self,
        id: &str,
        workout_exercise_id: &str,
        set_number: u32,
    ) -> Result<Workout, ValidationError> {
        self.edit_exercises(id, |exercises| {
            if entry(exercises, workout_exercise_id)?.remove_set(set_number) {
                Ok(())
            } else {
                Err(ValidationError::NotFound {
                    kind: "Set",
                    id: set_number.to_string(),
                })
            }
        })
        .await
    }

    async fn edit_exercises(
        &self,
        id: &str,
        edit: impl FnOnce(&mut Vec<WorkoutExercise>) -> Result<(), ValidationError>,
    ) -> Result<Workout, ValidationError> {
        let current = self.current(id).ok_or_else(|| Self::not_found(id))?;
        if !current.is_editable() {
            return Err(ValidationError::WorkoutCompleted);
        }

        let mut exercises = current.exercises;
        edit(&mut exercises)?;

        self.update(id, WorkoutPatch::exercises(exercises))
            .await?
            .ok_or_else(|| Self::not_found(id))
    }
}

fn entry<'a>(
    exercises: &'a mut [WorkoutExercise],
    workout_exercise_id: &str,
) -> Result<&'a mut WorkoutExercise, ValidationError> {
    exercises
        .iter_mut()
        .find(|e| e.id == workout_exercise_id)
        .ok_or_else(|| ValidationError::NotFound {
            kind: "Workout exercise",
            id: workout_exercise_id.to_string(),
        })
}
