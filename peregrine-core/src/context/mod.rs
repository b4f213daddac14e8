//! Conversational context: the durable record that survives restarts, the
//! per-process session state, and the merged view handlers read from.

mod history;
mod merge;
mod persistent;
mod session;

pub use history::BoundedHistory;
pub use merge::{CombinedContext, combine};
pub use persistent::{PersistentContext, WORKOUT_HISTORY_LIMIT, WorkoutHistory};
pub use session::{CONVERSATION_MEMORY_LIMIT, ConversationMemory, SessionContext};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    #[default]
    Strength,
    Cardio,
    Yoga,
    Hiit,
    Pilates,
    Running,
    Cycling,
    Swimming,
    Boxing,
    Dance,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 10] = [
        WorkoutType::Strength,
        WorkoutType::Cardio,
        WorkoutType::Yoga,
        WorkoutType::Hiit,
        WorkoutType::Pilates,
        WorkoutType::Running,
        WorkoutType::Cycling,
        WorkoutType::Swimming,
        WorkoutType::Boxing,
        WorkoutType::Dance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "Strength Training",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Pilates => "Pilates",
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::Swimming => "Swimming",
            WorkoutType::Boxing => "Boxing",
            WorkoutType::Dance => "Dance",
        }
    }

    /// Lowercase words that name this type in a chat message.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            WorkoutType::Strength => &["strength", "lifting", "weights"],
            WorkoutType::Cardio => &["cardio"],
            WorkoutType::Yoga => &["yoga"],
            WorkoutType::Hiit => &["hiit", "interval"],
            WorkoutType::Pilates => &["pilates"],
            WorkoutType::Running => &["running", "jogging"],
            WorkoutType::Cycling => &["cycling", "bike"],
            WorkoutType::Swimming => &["swimming", "swim"],
            WorkoutType::Boxing => &["boxing"],
            WorkoutType::Dance => &["dance", "dancing"],
        }
    }

    /// First type whose keywords appear in already-lowercased text.
    pub fn detect(lowercased: &str) -> Option<WorkoutType> {
        Self::ALL
            .into_iter()
            .find(|t| crate::extract::contains_any(lowercased, t.keywords()))
    }

    /// Workout type a target muscle group counts towards, if any.
    pub fn for_muscle_group(muscle_group: &str) -> Option<WorkoutType> {
        match muscle_group.to_lowercase().as_str() {
            "legs" | "glutes" | "arms" | "chest" | "back" | "core" => Some(WorkoutType::Strength),
            "cardio" => Some(WorkoutType::Cardio),
            _ => None,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn label(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutDuration {
    Short,
    #[default]
    Medium,
    Long,
    Extended,
}

impl WorkoutDuration {
    pub fn minutes(&self) -> u32 {
        match self {
            WorkoutDuration::Short => 25,
            WorkoutDuration::Medium => 37,
            WorkoutDuration::Long => 52,
            WorkoutDuration::Extended => 75,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutTime {
    Morning,
    Afternoon,
    #[default]
    Evening,
    Flexible,
}

impl WorkoutTime {
    /// Hour of day used when scheduling a session at this time.
    pub fn hour(&self) -> u32 {
        match self {
            WorkoutTime::Morning => 7,
            WorkoutTime::Afternoon => 13,
            WorkoutTime::Evening | WorkoutTime::Flexible => 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    None,
    Dumbbells,
    ResistanceBands,
    YogaMat,
    PullUpBar,
    Treadmill,
    StationaryBike,
    FullGym,
}

impl Equipment {
    pub fn label(&self) -> &'static str {
        match self {
            Equipment::None => "No Equipment",
            Equipment::Dumbbells => "Dumbbells",
            Equipment::ResistanceBands => "Resistance Bands",
            Equipment::YogaMat => "Yoga Mat",
            Equipment::PullUpBar => "Pull-up Bar",
            Equipment::Treadmill => "Treadmill",
            Equipment::StationaryBike => "Stationary Bike",
            Equipment::FullGym => "Full Gym Access",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    Strength,
    GeneralFitness,
    StressRelief,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub muscle_group: String,
}

impl Exercise {
    pub fn reps(name: &str, sets: u32, reps: u32, muscle_group: &str) -> Self {
        Self {
            name: name.to_string(),
            sets,
            reps: Some(reps),
            duration_seconds: None,
            muscle_group: muscle_group.to_string(),
        }
    }

    pub fn timed(name: &str, sets: u32, seconds: u32, muscle_group: &str) -> Self {
        Self {
            name: name.to_string(),
            sets,
            reps: None,
            duration_seconds: Some(seconds),
            muscle_group: muscle_group.to_string(),
        }
    }

    pub fn formatted_sets(&self) -> String {
        match (self.duration_seconds, self.reps) {
            (Some(seconds), _) => format!("{} sets of {} seconds", self.sets, seconds),
            (None, Some(reps)) => format!("{} sets of {} reps", self.sets, reps),
            (None, None) => format!("{} sets", self.sets),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutPlan {
    pub title: String,
    pub target_muscle_groups: BTreeSet<String>,
    pub equipment: BTreeSet<String>,
    pub exercises: Vec<Exercise>,
    /// Type the plan was built for; plans from older blobs have none.
    pub workout_type: Option<WorkoutType>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutPreferences {
    pub preferred_workout_types: BTreeSet<WorkoutType>,
    pub available_equipment: BTreeSet<Equipment>,
    pub goals: BTreeSet<FitnessGoal>,
    pub workout_duration: WorkoutDuration,
    pub days_per_week: u8,
    pub preferred_time: WorkoutTime,
    pub fitness_level: FitnessLevel,
}

impl Default for WorkoutPreferences {
    fn default() -> Self {
        Self {
            preferred_workout_types: BTreeSet::new(),
            available_equipment: BTreeSet::new(),
            goals: BTreeSet::new(),
            workout_duration: WorkoutDuration::default(),
            days_per_week: 3,
            preferred_time: WorkoutTime::default(),
            fitness_level: FitnessLevel::default(),
        }
    }
}

impl WorkoutPreferences {
    /// Unions the set fields and overrides every scalar the update carries.
    pub fn apply(&mut self, update: &PreferenceUpdate) {
        self.preferred_workout_types
            .extend(update.preferred_workout_types.iter().copied());
        self.available_equipment
            .extend(update.available_equipment.iter().copied());
        self.goals.extend(update.goals.iter().copied());
        if let Some(duration) = update.workout_duration {
            self.workout_duration = duration;
        }
        if let Some(days) = update.days_per_week {
            self.days_per_week = days;
        }
        if let Some(time) = update.preferred_time {
            self.preferred_time = time;
        }
        if let Some(level) = update.fitness_level {
            self.fitness_level = level;
        }
    }
}

/// A partial set of preferences. Absent scalars mean "not stated", which keeps
/// an explicit choice of a default value distinguishable from no choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceUpdate {
    pub preferred_workout_types: BTreeSet<WorkoutType>,
    pub available_equipment: BTreeSet<Equipment>,
    pub goals: BTreeSet<FitnessGoal>,
    pub workout_duration: Option<WorkoutDuration>,
    pub days_per_week: Option<u8>,
    pub preferred_time: Option<WorkoutTime>,
    pub fitness_level: Option<FitnessLevel>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        *self == PreferenceUpdate::default()
    }

    /// Folds a later update into this one; the later update wins on scalars.
    pub fn absorb(&mut self, later: &PreferenceUpdate) {
        self.preferred_workout_types
            .extend(later.preferred_workout_types.iter().copied());
        self.available_equipment
            .extend(later.available_equipment.iter().copied());
        self.goals.extend(later.goals.iter().copied());
        self.workout_duration = later.workout_duration.or(self.workout_duration);
        self.days_per_week = later.days_per_week.or(self.days_per_week);
        self.preferred_time = later.preferred_time.or(self.preferred_time);
        self.fitness_level = later.fitness_level.or(self.fitness_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muscle_groups_map_to_types() {
        for group in ["legs", "Glutes", "arms", "chest", "back", "core"] {
            assert_eq!(WorkoutType::for_muscle_group(group), Some(WorkoutType::Strength));
        }
        assert_eq!(WorkoutType::for_muscle_group("cardio"), Some(WorkoutType::Cardio));
        assert_eq!(WorkoutType::for_muscle_group("shoulders"), None);
    }

    #[test]
    fn detects_requested_type() {
        assert_eq!(WorkoutType::detect("a quick hiit workout"), Some(WorkoutType::Hiit));
        assert_eq!(WorkoutType::detect("give me a workout"), None);
    }

    #[test]
    fn preference_update_applies_present_fields_only() {
        let mut prefs = WorkoutPreferences {
            workout_duration: WorkoutDuration::Long,
            ..Default::default()
        };
        let update = PreferenceUpdate {
            preferred_workout_types: BTreeSet::from([WorkoutType::Yoga]),
            fitness_level: Some(FitnessLevel::Beginner),
            ..Default::default()
        };
        prefs.apply(&update);
        assert_eq!(prefs.workout_duration, WorkoutDuration::Long);
        assert_eq!(prefs.fitness_level, FitnessLevel::Beginner);
        assert!(prefs.preferred_workout_types.contains(&WorkoutType::Yoga));

        prefs.apply(&update);
        assert_eq!(prefs.preferred_workout_types.len(), 1);
    }
}
