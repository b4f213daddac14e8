use super::{BoundedHistory, PreferenceUpdate, WorkoutPlan, WorkoutType};

pub const CONVERSATION_MEMORY_LIMIT: usize = 20;

pub type ConversationMemory = BoundedHistory<String, CONVERSATION_MEMORY_LIMIT>;

/// State scoped to one process lifetime. Optional fields are `None` until
/// something in this session sets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub last_workout_plan: Option<WorkoutPlan>,
    pub current_workout_type: Option<WorkoutType>,
    pub current_preferences: PreferenceUpdate,
    pub conversation_memory: ConversationMemory,
    pub updating_workout: bool,
}

impl SessionContext {
    pub fn remember(&mut self, interaction: impl Into<String>) {
        self.conversation_memory.push(interaction.into());
    }

    pub fn note_preferences(&mut self, update: &PreferenceUpdate) {
        self.current_preferences.absorb(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::WorkoutDuration;

    #[test]
    fn memory_is_capped_at_twenty() {
        let mut session = SessionContext::default();
        for i in 0..25 {
            session.remember(format!("interaction {}", i));
        }
        assert_eq!(session.conversation_memory.len(), CONVERSATION_MEMORY_LIMIT);
        assert_eq!(
            session.conversation_memory.iter().next().map(String::as_str),
            Some("interaction 5")
        );
    }

    #[test]
    fn later_preferences_win() {
        let mut session = SessionContext::default();
        session.note_preferences(&PreferenceUpdate {
            workout_duration: Some(WorkoutDuration::Short),
            days_per_week: Some(2),
            ..Default::default()
        });
        session.note_preferences(&PreferenceUpdate {
            workout_duration: Some(WorkoutDuration::Medium),
            ..Default::default()
        });
        assert_eq!(
            session.current_preferences.workout_duration,
            Some(WorkoutDuration::Medium)
        );
        assert_eq!(session.current_preferences.days_per_week, Some(2));
    }
}
