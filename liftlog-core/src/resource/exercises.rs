use chrono::{DateTime, Utc};

use super::{Resource, ResourceHook};
use crate::models::{Exercise, ExerciseCategory, ExercisePatch, NewExercise, ValidationError};
use crate::store::StorageKey;

impl Resource for Exercise {
    type Draft = NewExercise;
    type Patch = ExercisePatch;

    const KEY: StorageKey = StorageKey::Exercises;
    const PATH: &'static str = "exercises";
    const KIND: &'static str = "Exercise";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_draft(draft: &NewExercise) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn check_patch(&self, patch: &ExercisePatch) -> Result<(), ValidationError> {
        patch.validate()
    }

    fn from_draft(draft: &NewExercise, id: String, now: DateTime<Utc>) -> Self {
        Exercise::from_draft(draft, id, now)
    }

    fn apply_patch(&mut self, patch: &ExercisePatch, now: DateTime<Utc>) {
        Exercise::apply_patch(self, patch, now)
    }
}

pub type ExerciseHook = ResourceHook<Exercise>;

impl ResourceHook<Exercise> {
    pub fn by_category(&self, category: ExerciseCategory) -> Vec<Exercise> {
        self.with_items(|items| {
            items
                .iter()
                .filter(|e| e.category == category)
                .cloned()
                .collect()
        })
    }

    /// Case-insensitive match on name or any muscle group.
    pub fn search(&self, query: &str) -> Vec<Exercise> {
        let query = query.trim().to_lowercase();
        self.with_items(|items| {
            items
                .iter()
                .filter(|e| {
                    query.is_empty()
                        || e.name.to_lowercase().contains(&query)
                        || e.muscle_groups
                            .iter()
                            .any(|m| m.to_lowercase().contains(&query))
                })
                .cloned()
                .collect()
        })
    }
}
