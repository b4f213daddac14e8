use super::{BoundedHistory, PreferenceUpdate, WorkoutPlan, WorkoutPreferences, WorkoutType};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WORKOUT_HISTORY_LIMIT: usize = 10;

pub type WorkoutHistory = BoundedHistory<WorkoutPlan, WORKOUT_HISTORY_LIMIT>;

/// Conversational state that survives restarts. Every field defaults so older
/// persisted blobs keep loading as fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentContext {
    pub workout_history: WorkoutHistory,
    pub preferences: WorkoutPreferences,
    pub last_workout_type: WorkoutType,
    pub conversation_summary: String,
    pub last_interaction: DateTime<Utc>,
    pub total_workouts_created: u64,
    pub favorite_exercises: BTreeSet<String>,
    pub avoided_exercises: BTreeSet<String>,
    pub last_workout_plan: Option<WorkoutPlan>,
}

impl Default for PersistentContext {
    fn default() -> Self {
        Self {
            workout_history: WorkoutHistory::new(),
            preferences: WorkoutPreferences::default(),
            last_workout_type: WorkoutType::default(),
            conversation_summary: String::new(),
            last_interaction: Utc::now(),
            total_workouts_created: 0,
            favorite_exercises: BTreeSet::new(),
            avoided_exercises: BTreeSet::new(),
            last_workout_plan: None,
        }
    }
}

impl PersistentContext {
    /// Folds a newly created workout into the durable record.
    pub fn record_workout(&mut self, workout: WorkoutPlan, now: DateTime<Utc>) {
        let derived = workout
            .target_muscle_groups
            .iter()
            .filter_map(|group| WorkoutType::for_muscle_group(group));
        self.preferences
            .preferred_workout_types
            .extend(derived.chain(workout.workout_type));
        self.favorite_exercises
            .extend(workout.exercises.iter().map(|e| e.name.clone()));

        if let Some(evicted) = self.workout_history.push(workout) {
            debug!("workout history full, evicted '{}'", evicted.title);
        }
        self.total_workouts_created += 1;
        self.last_interaction = now;
    }

    pub fn update_preferences(&mut self, update: &PreferenceUpdate, now: DateTime<Utc>) {
        self.preferences.apply(update);
        self.last_interaction = now;
    }

    /// The plan a returning user most likely means by "my last workout".
    pub fn latest_plan(&self) -> Option<&WorkoutPlan> {
        self.last_workout_plan
            .as_ref()
            .or_else(|| self.workout_history.latest())
    }

    /// True when there is anything worth greeting a returning user with.
    pub fn has_history(&self) -> bool {
        !self.workout_history.is_empty() || !self.preferences.preferred_workout_types.is_empty()
    }
}
