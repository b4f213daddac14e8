use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: impl Into<String>, author: Author) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Author::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Author::Assistant)
    }

    pub fn is_from_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Append-only message list trimmed to its newest `limit` entries.
#[derive(Debug)]
pub(crate) struct Transcript {
    messages: Vec<Message>,
    limit: usize,
}

impl Transcript {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > self.limit {
            let excess = self.messages.len() - self.limit;
            self.messages.drain(..excess);
        }
    }

    pub(crate) fn reset_to(&mut self, message: Message) {
        self.messages.clear();
        self.messages.push(message);
    }

    pub(crate) fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }
}
