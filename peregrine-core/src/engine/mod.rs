//! The message pipeline. User messages are appended as soon as they are
//! submitted; a single worker task answers them one at a time, in order.

mod message;
mod welcome;

pub use message::{Author, Message};
pub use welcome::contextual_welcome;

use message::Transcript;

use crate::collaborators::Collaborators;
use crate::config::EngineConfig;
use crate::context::{
    CombinedContext, PersistentContext, PreferenceUpdate, SessionContext, WorkoutPlan, combine,
};
use crate::handlers::{Turn, handler_for, templates};
use crate::intent::classify;
use crate::store::ContextStore;
use anyhow::{Result, anyhow, bail};
use chrono::{Local, Utc};
use log::{debug, error, info};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use tokio::sync::{Mutex, mpsc, oneshot};

struct EngineState {
    persistent: PersistentContext,
    session: SessionContext,
    collaborators: Collaborators,
}

struct Shared {
    state: Mutex<EngineState>,
    transcript: Mutex<Transcript>,
    pending: AtomicUsize,
    store: ContextStore,
}

struct Job {
    text: String,
    reply: oneshot::Sender<Message>,
}

/// Resolves to the assistant's answer for one submitted message.
pub struct PendingReply {
    rx: oneshot::Receiver<Message>,
}

impl Future for PendingReply {
    type Output = Result<Message>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|reply| reply.map_err(|_| anyhow!("coach worker stopped before replying")))
    }
}

pub struct CoachEngine {
    shared: Arc<Shared>,
    jobs: mpsc::UnboundedSender<Job>,
}

impl CoachEngine {
    /// Loads the persistent context, posts a welcome if there is history to
    /// build on, and starts the worker. Must be called inside a tokio runtime.
    pub async fn start(
        store: ContextStore,
        collaborators: Collaborators,
        config: &EngineConfig,
    ) -> Result<Self> {
        let loader = store.clone();
        let persistent = tokio::task::spawn_blocking(move || loader.load()).await?;
        info!(
            "Coach starting with {} past workouts, last type {:?}",
            persistent.workout_history.len(),
            persistent.last_workout_type
        );

        let mut transcript = Transcript::new(config.transcript_limit);
        if let Some(welcome) = contextual_welcome(&persistent) {
            transcript.push(Message::assistant(welcome));
        }

        let shared = Arc::new(Shared {
            state: Mutex::new(EngineState {
                persistent,
                session: SessionContext::default(),
                collaborators,
            }),
            transcript: Mutex::new(transcript),
            pending: AtomicUsize::new(0),
            store,
        });

        let (jobs, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(rx, Arc::clone(&shared)));

        Ok(Self { shared, jobs })
    }

    /// Starts an engine with in-memory collaborators and the configured store.
    pub async fn open(config: &EngineConfig) -> Result<Self> {
        let store = ContextStore::open(config.database_path.as_deref())?;
        Self::start(store, Collaborators::in_memory(), config).await
    }

    /// Appends the user message and queues it for an answer.
    pub async fn submit(&self, text: impl Into<String>) -> Result<PendingReply> {
        let text = text.into();
        let (reply, rx) = oneshot::channel();

        // Holding the transcript lock keeps queue order equal to append order.
        let mut transcript = self.shared.transcript.lock().await;
        self.shared.pending.fetch_add(1, Ordering::SeqCst);
        if self
            .jobs
            .send(Job {
                text: text.clone(),
                reply,
            })
            .is_err()
        {
            self.shared.pending.fetch_sub(1, Ordering::SeqCst);
            bail!("coach worker is not running");
        }
        transcript.push(Message::user(text));

        Ok(PendingReply { rx })
    }

    pub async fn send_message(&self, text: impl Into<String>) -> Result<Message> {
        self.submit(text).await?.await
    }

    pub async fn clear_conversation(&self) {
        self.shared
            .transcript
            .lock()
            .await
            .reset_to(Message::assistant(templates::GREETING));
    }

    /// Swaps the collaborators used by subsequent messages.
    pub async fn configure(&self, collaborators: Collaborators) {
        self.shared.state.lock().await.collaborators = collaborators;
        debug!("Coach collaborators replaced");
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.shared.transcript.lock().await.snapshot()
    }

    /// True while any submitted message is still waiting for its answer.
    pub fn is_composing(&self) -> bool {
        self.shared.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn combined_context(&self) -> CombinedContext {
        let state = self.shared.state.lock().await;
        combine(&state.persistent, &state.session)
    }

    pub async fn persistent_context(&self) -> PersistentContext {
        self.shared.state.lock().await.persistent.clone()
    }

    pub async fn session_context(&self) -> SessionContext {
        self.shared.state.lock().await.session.clone()
    }

    pub async fn collaborators(&self) -> Collaborators {
        self.shared.state.lock().await.collaborators.clone()
    }

    pub async fn record_workout(&self, plan: WorkoutPlan) -> Result<()> {
        self.mutate_persistent(move |persistent| persistent.record_workout(plan, Utc::now()))
            .await
    }

    pub async fn update_preferences(&self, update: PreferenceUpdate) -> Result<()> {
        self.mutate_persistent(move |persistent| {
            persistent.update_preferences(&update, Utc::now())
        })
        .await
    }

    async fn mutate_persistent<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut PersistentContext) + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        tokio::task::spawn_blocking(move || {
            let mut state = shared.state.blocking_lock();
            f(&mut state.persistent);
            shared.store.save(&state.persistent);
        })
        .await?;
        Ok(())
    }
}

async fn run_worker(mut jobs: mpsc::UnboundedReceiver<Job>, shared: Arc<Shared>) {
    debug!("Coach worker started");
    while let Some(Job { text, reply }) = jobs.recv().await {
        let message = Message::assistant(answer(&shared, text).await);

        shared.transcript.lock().await.push(message.clone());
        shared.pending.fetch_sub(1, Ordering::SeqCst);
        if reply.send(message).is_err() {
            debug!("Reply dropped by caller");
        }
    }
    debug!("Coach worker stopped");
}

/// Runs one message through classification and its handler on the blocking
/// pool. Failures and panics become the generic help text.
async fn answer(shared: &Arc<Shared>, text: String) -> String {
    let worker = Arc::clone(shared);
    match tokio::task::spawn_blocking(move || handle_blocking(&worker, &text)).await {
        Ok(Ok(reply)) => reply,
        Ok(Err(e)) => {
            error!("Handler failed: {:#}", e);
            templates::DEFAULT_HELP.to_string()
        }
        Err(e) => {
            error!("Handler task aborted: {}", e);
            templates::DEFAULT_HELP.to_string()
        }
    }
}

fn handle_blocking(shared: &Shared, text: &str) -> Result<String> {
    let mut guard = shared.state.blocking_lock();
    let state = &mut *guard;

    let intent = classify(text);
    debug!("Classified message as {}", intent);

    // The handler works on copies; a turn that errors or panics leaves the
    // live contexts exactly as they were last saved.
    let mut persistent = state.persistent.clone();
    let mut session = state.session.clone();
    let (reply, persistent_changed) = {
        let mut turn = Turn::new(
            text,
            &mut persistent,
            &mut session,
            &state.collaborators,
            Local::now(),
        );
        let reply = handler_for(intent)(&mut turn)?;
        (reply, turn.persistent_changed())
    };

    session.remember(format!("{}: {}", intent, text));
    state.session = session;
    if persistent_changed {
        state.persistent = persistent;
        shared.store.save(&state.persistent);
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{InMemoryProfile, ProfileManager, WorkoutPlanManager};
    use crate::context::{CONVERSATION_MEMORY_LIMIT, WorkoutType};

    async fn fresh_engine() -> CoachEngine {
        CoachEngine::start(
            ContextStore::in_memory(),
            Collaborators::in_memory(),
            &EngineConfig::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn workout_request_gets_a_plan() {
        let engine = fresh_engine().await;
        assert!(engine.messages().await.is_empty());

        let reply = engine.send_message("give me a workout").await.unwrap();
        assert_eq!(reply.author, Author::Assistant);
        assert!(reply.text.contains("Main Workout"));
        assert!(!engine.is_composing());

        let messages = engine.messages().await;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_from_user());
        assert_eq!(messages[1], reply);
        assert_eq!(engine.persistent_context().await.total_workouts_created, 1);
    }

    #[tokio::test]
    async fn profile_update_reaches_collaborator() {
        let engine = fresh_engine().await;
        let reply = engine.send_message("my weight is 180 lbs").await.unwrap();
        assert!(reply.text.contains("Weight"));
        assert_eq!(engine.collaborators().await.profile.snapshot().weight, 180);
    }

    #[tokio::test]
    async fn replies_arrive_in_submission_order() {
        let engine = fresh_engine().await;
        let first = engine.submit("hello").await.unwrap();
        let second = engine.submit("any food tips").await.unwrap();
        let third = engine.submit("I feel sad").await.unwrap();
        assert!(engine.is_composing());

        assert_eq!(first.await.unwrap().text, templates::DEFAULT_HELP);
        assert_eq!(second.await.unwrap().text, templates::NUTRITION_TIPS);
        assert_eq!(third.await.unwrap().text, templates::SUPPORT_LOW_MOOD);
        assert!(!engine.is_composing());

        let messages = engine.messages().await;
        assert_eq!(messages.len(), 6);
        let asked: Vec<_> = messages
            .iter()
            .filter(|m| m.is_from_user())
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(asked, ["hello", "any food tips", "I feel sad"]);
    }

    struct PanickingPlans;

    impl WorkoutPlanManager for PanickingPlans {
        fn list(&self) -> Vec<WorkoutPlan> {
            Vec::new()
        }

        fn create(&self, _plan: WorkoutPlan) -> WorkoutPlan {
            panic!("plan storage exploded");
        }
    }

    #[tokio::test]
    async fn handler_panic_falls_back_to_help() {
        let engine = fresh_engine().await;
        engine
            .configure(Collaborators {
                workout_plans: Arc::new(PanickingPlans),
                ..Collaborators::in_memory()
            })
            .await;

        let reply = engine.send_message("give me a workout").await.unwrap();
        assert_eq!(reply.text, templates::DEFAULT_HELP);
        assert!(!engine.is_composing());

        // the engine keeps serving afterwards
        let reply = engine.send_message("diet advice").await.unwrap();
        assert_eq!(reply.text, templates::NUTRITION_TIPS);
    }

    #[tokio::test]
    async fn failed_turn_leaves_contexts_as_saved() {
        let store = ContextStore::in_memory();
        let engine = CoachEngine::start(
            store.clone(),
            Collaborators::in_memory(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();
        engine.send_message("a strength workout").await.unwrap();
        let session_before = engine.session_context().await;

        engine
            .configure(Collaborators {
                workout_plans: Arc::new(PanickingPlans),
                ..Collaborators::in_memory()
            })
            .await;
        let reply = engine.send_message("a yoga workout please").await.unwrap();
        assert_eq!(reply.text, templates::DEFAULT_HELP);

        let persistent = engine.persistent_context().await;
        assert_eq!(persistent.last_workout_type, WorkoutType::Strength);
        assert_eq!(persistent, store.load());
        assert_eq!(engine.session_context().await, session_before);
    }

    #[tokio::test]
    async fn context_persists_across_restarts() {
        let store = ContextStore::in_memory();

        let engine = CoachEngine::start(
            store.clone(),
            Collaborators::in_memory(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();
        engine.send_message("a cardio workout please").await.unwrap();
        drop(engine);

        let restarted = CoachEngine::start(store, Collaborators::in_memory(), &EngineConfig::default())
            .await
            .unwrap();
        let persistent = restarted.persistent_context().await;
        assert_eq!(persistent.total_workouts_created, 1);
        assert_eq!(persistent.last_workout_type, WorkoutType::Cardio);

        let messages = restarted.messages().await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.starts_with("**Welcome back!**"));
        assert!(messages[0].text.contains("Cardio Workout"));
        assert!(messages[0].text.contains("I remember you like Cardio\n"));

        // session state does not survive
        assert_eq!(restarted.session_context().await, SessionContext::default());
        assert_eq!(
            restarted.combined_context().await.current_workout_type,
            WorkoutType::Cardio
        );
    }

    #[tokio::test]
    async fn clear_conversation_leaves_only_greeting() {
        let engine = fresh_engine().await;
        engine.send_message("hello").await.unwrap();
        engine.clear_conversation().await;
        let messages = engine.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, templates::GREETING);
    }

    #[tokio::test]
    async fn transcript_is_trimmed_to_limit() {
        let config = EngineConfig {
            transcript_limit: 5,
            ..EngineConfig::default()
        };
        let engine = CoachEngine::start(ContextStore::in_memory(), Collaborators::in_memory(), &config)
            .await
            .unwrap();
        for i in 0..4 {
            engine.send_message(format!("hello {}", i)).await.unwrap();
        }
        let messages = engine.messages().await;
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].text, templates::DEFAULT_HELP);
        assert_eq!(messages[1].text, "hello 2");
    }

    #[tokio::test]
    async fn conversation_memory_is_bounded() {
        let engine = fresh_engine().await;
        for i in 0..25 {
            engine.send_message(format!("hi {}", i)).await.unwrap();
        }
        let session = engine.session_context().await;
        assert_eq!(session.conversation_memory.len(), CONVERSATION_MEMORY_LIMIT);
        assert_eq!(
            session.conversation_memory.latest().map(String::as_str),
            Some("default_help: hi 24")
        );
    }

    #[tokio::test]
    async fn direct_updates_are_saved() {
        let store = ContextStore::in_memory();
        let engine = CoachEngine::start(
            store.clone(),
            Collaborators::in_memory(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();

        engine
            .update_preferences(PreferenceUpdate {
                preferred_workout_types: [WorkoutType::Boxing].into(),
                days_per_week: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();
        engine
            .record_workout(WorkoutPlan {
                title: "Shadow Boxing".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let saved = store.load();
        assert_eq!(saved.preferences.days_per_week, 5);
        assert_eq!(saved.total_workouts_created, 1);
        assert_eq!(saved, engine.persistent_context().await);
    }

    #[tokio::test]
    async fn configure_rebinds_profile() {
        let engine = fresh_engine().await;
        let profile = Arc::new(InMemoryProfile::default());
        engine
            .configure(Collaborators {
                profile: profile.clone(),
                ..Collaborators::in_memory()
            })
            .await;
        engine.send_message("I'm 40 years old, update my age").await.unwrap();
        assert_eq!(profile.snapshot().age, 40);
    }
}
