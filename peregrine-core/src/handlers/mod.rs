mod emotional;
mod plan;
mod profile;
pub mod templates;
mod workout;

use crate::collaborators::Collaborators;
use crate::context::{CombinedContext, PersistentContext, SessionContext, combine};
use crate::intent::Intent;
use anyhow::Result;
use chrono::{DateTime, Local};

pub use emotional::emotional_support;
pub use profile::profile_update;
pub use workout::{MODIFY_KEYWORDS, workout_request};

/// Everything a handler may look at or change while answering one message.
pub struct Turn<'a> {
    pub message: &'a str,
    pub lowered: String,
    /// Snapshot taken before the handler runs.
    pub context: CombinedContext,
    pub persistent: &'a mut PersistentContext,
    pub session: &'a mut SessionContext,
    pub collaborators: &'a Collaborators,
    pub now: DateTime<Local>,
    persistent_changed: bool,
}

impl<'a> Turn<'a> {
    pub fn new(
        message: &'a str,
        persistent: &'a mut PersistentContext,
        session: &'a mut SessionContext,
        collaborators: &'a Collaborators,
        now: DateTime<Local>,
    ) -> Self {
        let context = combine(persistent, session);
        Self {
            message,
            lowered: message.to_lowercase(),
            context,
            persistent,
            session,
            collaborators,
            now,
            persistent_changed: false,
        }
    }

    /// Flags the persistent context for saving once the turn completes.
    pub fn mark_persistent_changed(&mut self) {
        self.persistent_changed = true;
    }

    pub fn persistent_changed(&self) -> bool {
        self.persistent_changed
    }
}

pub type Handler = fn(&mut Turn<'_>) -> Result<String>;

pub fn handler_for(intent: Intent) -> Handler {
    match intent {
        Intent::WorkoutRequest => workout_request,
        Intent::ProfileUpdate => profile_update,
        Intent::NutritionAdvice => nutrition_advice,
        Intent::EmotionalSupport => emotional_support,
        Intent::DefaultHelp => default_help,
    }
}

pub fn nutrition_advice(_turn: &mut Turn<'_>) -> Result<String> {
    Ok(templates::NUTRITION_TIPS.to_string())
}

pub fn default_help(_turn: &mut Turn<'_>) -> Result<String> {
    Ok(templates::DEFAULT_HELP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::classify;

    fn reply(text: &str) -> String {
        let mut persistent = PersistentContext::default();
        let mut session = SessionContext::default();
        let collaborators = Collaborators::in_memory();
        let mut turn = Turn::new(text, &mut persistent, &mut session, &collaborators, Local::now());
        handler_for(classify(text))(&mut turn).unwrap()
    }

    #[test]
    fn static_intents_use_their_templates() {
        assert_eq!(reply("any diet tips?"), templates::NUTRITION_TIPS);
        assert_eq!(reply("hello"), templates::DEFAULT_HELP);
    }

    #[test]
    fn read_only_handlers_leave_persistent_context_alone() {
        let mut persistent = PersistentContext::default();
        let mut session = SessionContext::default();
        let collaborators = Collaborators::in_memory();
        let mut turn = Turn::new(
            "what food should I eat",
            &mut persistent,
            &mut session,
            &collaborators,
            Local::now(),
        );
        nutrition_advice(&mut turn).unwrap();
        assert!(!turn.persistent_changed());
    }
}
