//! Registered storage keys for the local store.

/// Logical collections kept in the local store. Each maps to one distinct key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Exercises,
    Workouts,
    WorkoutSessions,
    ActiveSession,
    Templates,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Exercises,
        StorageKey::Workouts,
        StorageKey::WorkoutSessions,
        StorageKey::ActiveSession,
        StorageKey::Templates,
    ];

    /// Returns the key string used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Exercises => "liftlog_exercises",
            StorageKey::Workouts => "liftlog_workouts",
            StorageKey::WorkoutSessions => "liftlog_workout_sessions",
            StorageKey::ActiveSession => "liftlog_active_session",
            StorageKey::Templates => "liftlog_templates",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
