mod schema;
mod sqlite;

pub use sqlite::SqliteSlotStore;

use crate::context::PersistentContext;
use anyhow::Result;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Fixed, unversioned slot the persistent context lives under.
pub const CONTEXT_KEY: &str = "PeregrinePersistentContext";

/// Raw keyed storage for serialized blobs. Called from blocking contexts only.
pub trait SlotStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, payload: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Loads and saves the [`PersistentContext`]. Storage problems never reach the
/// caller: the in-memory context stays authoritative and failures are logged.
#[derive(Clone)]
pub struct ContextStore {
    slots: Arc<dyn SlotStore>,
}

impl ContextStore {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySlotStore::new()))
    }

    /// SQLite-backed when a path is given, memory-backed otherwise.
    pub fn open(database_path: Option<&str>) -> Result<Self> {
        match database_path {
            Some(path) => Ok(Self::new(Arc::new(SqliteSlotStore::open(path)?))),
            None => Ok(Self::in_memory()),
        }
    }

    pub fn load(&self) -> PersistentContext {
        match self.try_load() {
            Ok(Some(context)) => {
                debug!(
                    "Loaded persistent context with {} workouts in history",
                    context.workout_history.len()
                );
                context
            }
            Ok(None) => {
                debug!("No persistent context stored yet, starting fresh");
                PersistentContext::default()
            }
            Err(e) => {
                warn!("Discarding unreadable persistent context: {:#}", e);
                PersistentContext::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<PersistentContext>> {
        match self.slots.read(CONTEXT_KEY)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, context: &PersistentContext) {
        if let Err(e) = self.try_save(context) {
            error!("Failed to save persistent context: {:#}", e);
        }
    }

    pub fn try_save(&self, context: &PersistentContext) -> Result<()> {
        let payload = serde_json::to_string(context)?;
        self.slots.write(CONTEXT_KEY, &payload)
    }
}
