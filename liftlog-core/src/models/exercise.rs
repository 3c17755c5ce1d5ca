use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Difficulty, ExerciseCategory};
use super::validation::{require_text, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ExerciseCategory,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    /// Builds a stored exercise from a draft with the given id and timestamp.
    pub fn from_draft(draft: &NewExercise, id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name.trim().to_string(),
            category: draft.category,
            muscle_groups: draft.muscle_groups.clone(),
            equipment: draft.equipment.clone(),
            difficulty: draft.difficulty,
            instructions: draft.instructions.clone(),
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow merge: fields present in the patch replace the current ones.
    pub fn apply_patch(&mut self, patch: &ExercisePatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(muscle_groups) = &patch.muscle_groups {
            self.muscle_groups = muscle_groups.clone();
        }
        if let Some(equipment) = &patch.equipment {
            self.equipment = Some(equipment.clone());
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(instructions) = &patch.instructions {
            self.instructions = Some(instructions.clone());
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        self.updated_at = now;
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Difficulty: {}", self.difficulty)?;

        if !self.muscle_groups.is_empty() {
            writeln!(f, "Muscle groups: {}", self.muscle_groups.join(", "))?;
        }
        if let Some(equipment) = &self.equipment {
            writeln!(f, "Equipment: {}", equipment)?;
        }
        if let Some(instructions) = &self.instructions {
            writeln!(f, "\nInstructions:\n{}", instructions)?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "\nNotes: {}", notes)?;
        }

        Ok(())
    }
}

/// Input payload for a new exercise, before an id and timestamps exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    pub name: String,
    pub category: ExerciseCategory,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewExercise {
    pub fn new(name: impl Into<String>, category: ExerciseCategory) -> Self {
        Self {
            name: name.into(),
            category,
            muscle_groups: Vec::new(),
            equipment: None,
            difficulty: Difficulty::default(),
            instructions: None,
            notes: None,
        }
    }

    pub fn with_muscle_groups(mut self, muscle_groups: Vec<String>) -> Self {
        self.muscle_groups = muscle_groups;
        self
    }

    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Form-path rules: a name and at least one muscle group.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.muscle_groups.iter().all(|m| m.trim().is_empty()) {
            return Err(ValidationError::Required("muscle groups"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExerciseCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExercisePatch {
    /// A patch may not blank out the name or empty the muscle groups.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(muscle_groups) = &self.muscle_groups {
            if muscle_groups.iter().all(|m| m.trim().is_empty()) {
                return Err(ValidationError::Required("muscle groups"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_ups() -> NewExercise {
        NewExercise::new("Push-ups", ExerciseCategory::Strength)
            .with_muscle_groups(vec!["chest".into(), "triceps".into()])
    }

    #[test]
    fn test_from_draft_assigns_id_and_timestamps() {
        let now = Utc::now();
        let exercise = Exercise::from_draft(&push_ups().with_equipment("none"), "ex-1", now);

        assert_eq!(exercise.id, "ex-1");
        assert_eq!(exercise.name, "Push-ups");
        assert_eq!(exercise.muscle_groups, vec!["chest", "triceps"]);
        assert_eq!(exercise.equipment.as_deref(), Some("none"));
        assert_eq!(exercise.created_at, now);
        assert_eq!(exercise.updated_at, now);
    }

    #[test]
    fn test_validate_requires_name_and_muscles() {
        assert!(push_ups().validate().is_ok());

        let unnamed = NewExercise::new("  ", ExerciseCategory::Cardio)
            .with_muscle_groups(vec!["legs".into()]);
        assert_eq!(unnamed.validate(), Err(ValidationError::Required("name")));

        let no_muscles = NewExercise::new("Rowing", ExerciseCategory::Cardio);
        assert_eq!(
            no_muscles.validate(),
            Err(ValidationError::Required("muscle groups"))
        );
    }

    #[test]
    fn test_apply_patch_is_shallow() {
        let created = Utc::now();
        let mut exercise = Exercise::from_draft(&push_ups(), "ex-1", created);
        let later = created + chrono::Duration::seconds(5);

        let patch = ExercisePatch {
            notes: Some("Keep elbows tucked".into()),
            difficulty: Some(Difficulty::Intermediate),
            ..Default::default()
        };
        exercise.apply_patch(&patch, later);

        assert_eq!(exercise.name, "Push-ups");
        assert_eq!(exercise.notes.as_deref(), Some("Keep elbows tucked"));
        assert_eq!(exercise.difficulty, Difficulty::Intermediate);
        assert_eq!(exercise.created_at, created);
        assert_eq!(exercise.updated_at, later);
    }

    #[test]
    fn test_apply_patch_trims_name() {
        let mut exercise = Exercise::from_draft(&push_ups(), "ex-1", Utc::now());
        let patch = ExercisePatch {
            name: Some(" Squats ".into()),
            ..Default::default()
        };
        exercise.apply_patch(&patch, Utc::now());
        assert_eq!(exercise.name, "Squats");
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ExercisePatch {
            name: Some("Diamond push-ups".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Diamond push-ups" }));
        assert!(ExercisePatch::default().is_empty());
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let json = r#"{"id":"1","name":"Push-ups","category":"strength"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.category, ExerciseCategory::Strength);
        assert!(exercise.muscle_groups.is_empty());
        assert_eq!(exercise.difficulty, Difficulty::Beginner);
        assert!(exercise.equipment.is_none());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let exercise = Exercise::from_draft(&push_ups(), "ex-1", Utc::now());
        let json = serde_json::to_value(&exercise).unwrap();
        assert!(json.get("muscleGroups").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("muscle_groups").is_none());
    }

    #[test]
    fn test_exercise_display() {
        let exercise = Exercise::from_draft(&push_ups(), "ex-1", Utc::now());
        let output = format!("{}", exercise);
        assert!(output.contains("Push-ups"));
        assert!(output.contains("Category: strength"));
        assert!(output.contains("chest, triceps"));
    }
}
