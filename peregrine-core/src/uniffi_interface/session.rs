use crate::collaborators::{
    Collaborators, InMemoryCalendar, InMemoryProfile, InMemoryWorkoutPlans, ProfileManager,
};
use crate::config::EngineConfig;
use crate::engine::CoachEngine;
use crate::runtime::global_runtime;
use crate::store::ContextStore;
use crate::uniffi_interface::errors::CoachError;
use crate::uniffi_interface::objects::{ChatMessage, ContextSummary, ProfileRecord, ScheduledSession};
use log::*;
use std::sync::Arc;

/// A coaching conversation for foreign callers. Every method blocks on the
/// process-wide runtime.
#[derive(uniffi::Object)]
pub struct CoachSession {
    engine: CoachEngine,
    calendar: Arc<InMemoryCalendar>,
}

#[uniffi::export]
impl CoachSession {
    /// Opens the persistent context at `database_path`, or keeps it in memory
    /// when no path is given.
    #[uniffi::constructor]
    pub fn new(database_path: Option<String>) -> Result<Arc<Self>, CoachError> {
        let rt = global_runtime()?;
        let config = EngineConfig {
            database_path,
            ..EngineConfig::from_env()
        };
        let store =
            ContextStore::open(config.database_path.as_deref()).map_err(CoachError::storage)?;

        let calendar = Arc::new(InMemoryCalendar::new());
        let collaborators = Collaborators {
            profile: Arc::new(InMemoryProfile::default()),
            calendar: calendar.clone(),
            workout_plans: Arc::new(InMemoryWorkoutPlans::new()),
        };
        let engine = rt.block_on(CoachEngine::start(store, collaborators, &config))?;
        info!("Coach session ready");

        Ok(Arc::new(Self { engine, calendar }))
    }

    /// Sends a message and waits for the coach's answer.
    pub fn send_message(&self, text: String) -> Result<Arc<ChatMessage>, CoachError> {
        debug!("send_message: {}", text);
        let rt = global_runtime()?;
        let reply = rt.block_on(self.engine.send_message(text))?;
        Ok(Arc::new(ChatMessage::from(reply)))
    }

    /// Queues a message without waiting; poll `messages` and `is_composing`.
    pub fn submit_message(&self, text: String) -> Result<(), CoachError> {
        let rt = global_runtime()?;
        let _pending = rt.block_on(self.engine.submit(text))?;
        Ok(())
    }

    pub fn messages(&self) -> Result<Vec<Arc<ChatMessage>>, CoachError> {
        let rt = global_runtime()?;
        let messages = rt.block_on(self.engine.messages());
        Ok(messages
            .into_iter()
            .map(|m| Arc::new(ChatMessage::from(m)))
            .collect())
    }

    pub fn is_composing(&self) -> bool {
        self.engine.is_composing()
    }

    pub fn clear_conversation(&self) -> Result<(), CoachError> {
        let rt = global_runtime()?;
        rt.block_on(self.engine.clear_conversation());
        Ok(())
    }

    pub fn profile(&self) -> Result<ProfileRecord, CoachError> {
        let rt = global_runtime()?;
        let collaborators = rt.block_on(self.engine.collaborators());
        Ok(ProfileRecord::from(collaborators.profile.snapshot()))
    }

    pub fn context_summary(&self) -> Result<ContextSummary, CoachError> {
        let rt = global_runtime()?;
        let (combined, persistent) = rt.block_on(async {
            (
                self.engine.combined_context().await,
                self.engine.persistent_context().await,
            )
        });
        Ok(ContextSummary::new(
            combined,
            persistent.total_workouts_created,
        ))
    }

    pub fn scheduled_workouts(&self) -> Vec<Arc<ScheduledSession>> {
        self.calendar
            .events()
            .into_iter()
            .map(|e| Arc::new(ScheduledSession::from(e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trip_through_ffi_surface() {
        let session = CoachSession::new(None).unwrap();
        let reply = session
            .send_message("schedule a workout for tomorrow".to_string())
            .unwrap();
        assert!(!reply.is_from_user());
        assert!(reply.text().contains("Main Workout"));
        assert!(!session.is_composing());

        assert_eq!(session.scheduled_workouts().len(), 1);
        assert_eq!(session.context_summary().unwrap().total_workouts_created, 1);

        session
            .send_message("my weight is 172 lbs".to_string())
            .unwrap();
        assert_eq!(session.profile().unwrap().weight, 172);

        session.clear_conversation().unwrap();
        assert_eq!(session.messages().unwrap().len(), 1);
    }
}
