use super::{PersistentContext, SessionContext, WorkoutPlan, WorkoutPreferences, WorkoutType};
use serde::Serialize;

/// Read-only merge of persistent and session context. Never cached; build a
/// fresh one with [`combine`] whenever it is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedContext {
    pub last_workout_plan: Option<WorkoutPlan>,
    pub current_workout_type: WorkoutType,
    pub current_preferences: WorkoutPreferences,
    pub conversation_memory: Vec<String>,
    pub updating_workout: bool,
}

pub fn combine(persistent: &PersistentContext, session: &SessionContext) -> CombinedContext {
    let mut preferences = persistent.preferences.clone();
    preferences.apply(&session.current_preferences);

    CombinedContext {
        last_workout_plan: session
            .last_workout_plan
            .as_ref()
            .or_else(|| persistent.latest_plan())
            .cloned(),
        current_workout_type: session
            .current_workout_type
            .unwrap_or(persistent.last_workout_type),
        current_preferences: preferences,
        conversation_memory: session.conversation_memory.to_vec(),
        updating_workout: session.updating_workout,
    }
}
