use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::category::{ExerciseCategory, WorkoutStatus};
use super::exercise::Exercise;
use super::set::WorkoutSet;
use super::validation::{require_text, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: WorkoutStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    pub fn from_draft(draft: &NewWorkout, id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut exercises = draft.exercises.clone();
        exercises.iter_mut().for_each(WorkoutExercise::renumber_sets);
        Self {
            id: id.into(),
            name: draft.name.trim().to_string(),
            date: draft.date,
            status: draft.status,
            notes: draft.notes.clone(),
            duration: draft.duration,
            calories: draft.calories,
            exercises,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_patch(&mut self, patch: &WorkoutPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(duration) = patch.duration {
            self.duration = Some(duration);
        }
        if let Some(calories) = patch.calories {
            self.calories = Some(calories);
        }
        if let Some(exercises) = &patch.exercises {
            self.exercises = exercises.clone();
            self.exercises
                .iter_mut()
                .for_each(WorkoutExercise::renumber_sets);
        }
        self.updated_at = now;
    }

    /// Only planned workouts may change.
    pub fn is_editable(&self) -> bool {
        self.status == WorkoutStatus::Planned
    }

    /// Checks a patch against the lifecycle rules before it is sent anywhere.
    pub fn check_patch(&self, patch: &WorkoutPatch) -> Result<(), ValidationError> {
        if !self.is_editable() {
            return Err(ValidationError::WorkoutCompleted);
        }
        patch.validate()
    }

    pub fn exercise(&self, workout_exercise_id: &str) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.id == workout_exercise_id)
    }

    pub fn exercise_mut(&mut self, workout_exercise_id: &str) -> Option<&mut WorkoutExercise> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == workout_exercise_id)
    }

    /// Sum of weight times reps over completed sets.
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.status)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Date: {}", self.date)?;

        if let Some(duration) = self.duration {
            writeln!(f, "Duration: {} min", duration)?;
        }
        if let Some(calories) = self.calories {
            writeln!(f, "Calories: {} kcal", calories)?;
        }

        for exercise in &self.exercises {
            writeln!(f, "\n{} [{}] ({})", exercise.exercise_name, exercise.category, exercise.id)?;
            for set in &exercise.sets {
                writeln!(f, "  {}", set)?;
            }
        }

        if let Some(notes) = &self.notes {
            writeln!(f, "\nNotes: {}", notes)?;
        }

        Ok(())
    }
}

/// An exercise placed in a workout, with a snapshot of its name and category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,
    pub exercise_id: String,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub category: ExerciseCategory,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutExercise {
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise_id: exercise.id.clone(),
            exercise_name: exercise.name.clone(),
            category: exercise.category,
            sets: Vec::new(),
        }
    }

    /// Appends a set numbered after the last one and returns its number.
    pub fn add_set(&mut self, mut set: WorkoutSet) -> u32 {
        let number = self.sets.len() as u32 + 1;
        set.set_number = number;
        self.sets.push(set);
        number
    }

    /// Removes a set by number and renumbers the rest. Returns false if absent.
    pub fn remove_set(&mut self, set_number: u32) -> bool {
        let before = self.sets.len();
        self.sets.retain(|s| s.set_number != set_number);
        if self.sets.len() == before {
            return false;
        }
        self.renumber_sets();
        true
    }

    pub fn renumber_sets(&mut self) {
        for (index, set) in self.sets.iter_mut().enumerate() {
            set.set_number = index as u32 + 1;
        }
    }

    pub fn volume(&self) -> f64 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: WorkoutStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

impl NewWorkout {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            status: WorkoutStatus::Planned,
            notes: None,
            duration: None,
            calories: None,
            exercises: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: WorkoutStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_exercises(mut self, exercises: Vec<WorkoutExercise>) -> Self {
        self.exercises = exercises;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        validate_exercises(&self.exercises)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkoutStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<WorkoutExercise>>,
}

impl WorkoutPatch {
    pub fn status(status: WorkoutStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn exercises(exercises: Vec<WorkoutExercise>) -> Self {
        Self {
            exercises: Some(exercises),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(exercises) = &self.exercises {
            validate_exercises(exercises)?;
        }
        Ok(())
    }
}

fn validate_exercises(exercises: &[WorkoutExercise]) -> Result<(), ValidationError> {
    for exercise in exercises {
        for set in &exercise.sets {
            set.validate()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExercise;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn bench_press() -> Exercise {
        let draft = NewExercise::new("Bench Press", ExerciseCategory::Strength)
            .with_muscle_groups(vec!["chest".into()]);
        Exercise::from_draft(&draft, "ex-1", Utc::now())
    }

    #[test]
    fn test_from_draft_defaults_to_planned() {
        let workout = Workout::from_draft(&NewWorkout::new("Push day", date()), "w-1", Utc::now());
        assert_eq!(workout.status, WorkoutStatus::Planned);
        assert!(workout.is_editable());
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_set_numbers_stay_contiguous() {
        let mut entry = WorkoutExercise::from_exercise(&bench_press());
        assert_eq!(entry.add_set(WorkoutSet::new(10, 60.0)), 1);
        assert_eq!(entry.add_set(WorkoutSet::new(8, 70.0)), 2);
        assert_eq!(entry.add_set(WorkoutSet::new(6, 80.0)), 3);

        assert!(entry.remove_set(2));
        let numbers: Vec<u32> = entry.sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(entry.sets[1].weight, 80.0);

        assert!(!entry.remove_set(9));
        assert_eq!(entry.add_set(WorkoutSet::new(5, 90.0)), 3);
    }

    #[test]
    fn test_from_exercise_snapshots_name_and_category() {
        let exercise = bench_press();
        let entry = WorkoutExercise::from_exercise(&exercise);
        assert_eq!(entry.exercise_id, "ex-1");
        assert_eq!(entry.exercise_name, "Bench Press");
        assert_eq!(entry.category, ExerciseCategory::Strength);
        assert_ne!(entry.id, exercise.id);
    }

    #[test]
    fn test_volume_sums_completed_sets() {
        let mut entry = WorkoutExercise::from_exercise(&bench_press());
        entry.add_set(WorkoutSet::new(10, 50.0).completed());
        entry.add_set(WorkoutSet::new(10, 50.0));
        entry.add_set(WorkoutSet::new(5, 100.0).completed());

        let workout = Workout::from_draft(
            &NewWorkout::new("Push day", date()).with_exercises(vec![entry]),
            "w-1",
            Utc::now(),
        );
        assert_eq!(workout.volume(), 1000.0);
    }

    #[test]
    fn test_completed_workout_rejects_patches() {
        let mut workout =
            Workout::from_draft(&NewWorkout::new("Leg day", date()), "w-1", Utc::now());
        assert!(workout.check_patch(&WorkoutPatch::status(WorkoutStatus::Completed)).is_ok());

        workout.apply_patch(&WorkoutPatch::status(WorkoutStatus::Completed), Utc::now());
        assert!(!workout.is_editable());
        assert_eq!(
            workout.check_patch(&WorkoutPatch::status(WorkoutStatus::Planned)),
            Err(ValidationError::WorkoutCompleted)
        );
    }

    #[test]
    fn test_patch_validates_sets() {
        let mut entry = WorkoutExercise::from_exercise(&bench_press());
        entry.add_set(WorkoutSet::new(5, -10.0));
        let patch = WorkoutPatch::exercises(vec![entry]);
        assert_eq!(patch.validate(), Err(ValidationError::Negative("weight")));
    }

    #[test]
    fn test_supplied_set_numbers_are_renumbered() {
        let mut entry = WorkoutExercise::from_exercise(&bench_press());
        entry.sets.push(WorkoutSet::new(10, 60.0));
        entry.sets.push(WorkoutSet::new(8, 70.0));
        let draft = NewWorkout::new("Push day", date()).with_exercises(vec![entry]);

        let mut workout = Workout::from_draft(&draft, "w-1", Utc::now());
        let numbers: Vec<u32> = workout.exercises[0].sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2]);

        let mut edited = workout.exercises.clone();
        edited[0].sets.iter_mut().for_each(|s| s.set_number = 7);
        workout.apply_patch(&WorkoutPatch::exercises(edited), Utc::now());
        let numbers: Vec<u32> = workout.exercises[0].sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_patch_name_is_trimmed() {
        let mut workout =
            Workout::from_draft(&NewWorkout::new("Leg day", date()), "w-1", Utc::now());
        let patch = WorkoutPatch {
            name: Some("  Pull day ".into()),
            ..Default::default()
        };
        workout.apply_patch(&patch, Utc::now());
        assert_eq!(workout.name, "Pull day");
    }

    #[test]
    fn test_new_workout_requires_name() {
        assert_eq!(
            NewWorkout::new("", date()).validate(),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn test_missing_status_defaults_to_planned() {
        let json = r#"{"id":"w-1","name":"Run","date":"2025-03-14"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.status, WorkoutStatus::Planned);
        assert!(workout.duration.is_none());
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_workout_display() {
        let mut entry = WorkoutExercise::from_exercise(&bench_press());
        entry.add_set(WorkoutSet::new(10, 60.0).completed());
        let workout = Workout::from_draft(
            &NewWorkout::new("Push day", date())
                .with_duration(45)
                .with_exercises(vec![entry]),
            "w-1",
            Utc::now(),
        );

        let output = format!("{}", workout);
        assert!(output.contains("Push day (planned)"));
        assert!(output.contains("2025-03-14"));
        assert!(output.contains("Duration: 45 min"));
        assert!(output.contains("Bench Press [strength]"));
        assert!(output.contains("[x] Set 1: 10 reps @ 60"));
    }
}
