use crate::collaborators::{Profile, ScheduledWorkout};
use crate::context::CombinedContext;
use crate::engine::Message;
use chrono::SecondsFormat;

#[derive(uniffi::Object)]
pub struct ChatMessage {
    id: String,
    text: String,
    from_user: bool,
    timestamp: String,
}

#[uniffi::export]
impl ChatMessage {
    pub fn id(&self) -> String {
        self.id.clone()
    }

    pub fn text(&self) -> String {
        self.text.clone()
    }

    pub fn is_from_user(&self) -> bool {
        self.from_user
    }

    /// RFC 3339, UTC.
    pub fn timestamp(&self) -> String {
        self.timestamp.clone()
    }
}

impl From<Message> for ChatMessage {
    fn from(m: Message) -> Self {
        ChatMessage {
            id: m.id.to_string(),
            from_user: m.is_from_user(),
            timestamp: m.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            text: m.text,
        }
    }
}

#[derive(uniffi::Record)]
pub struct ProfileRecord {
    pub name: String,
    pub age: u32,
    pub weight: u32,
    pub height: u32,
    pub body_fat_percentage: f64,
    pub equipment: Vec<String>,
    pub fitness_level: String,
    pub goals: Vec<String>,
    pub daily_calorie_goal: u32,
}

impl From<Profile> for ProfileRecord {
    fn from(p: Profile) -> Self {
        ProfileRecord {
            name: p.name,
            age: p.age,
            weight: p.weight,
            height: p.height,
            body_fat_percentage: p.body_fat_percentage,
            equipment: p.equipment,
            fitness_level: p.fitness_level,
            goals: p.goals,
            daily_calorie_goal: p.daily_calorie_goal,
        }
    }
}

#[derive(uniffi::Record)]
pub struct ContextSummary {
    pub last_workout_title: Option<String>,
    pub current_workout_type: String,
    pub preferred_workout_types: Vec<String>,
    pub days_per_week: u8,
    pub fitness_level: String,
    pub updating_workout: bool,
    pub conversation_memory: Vec<String>,
    pub total_workouts_created: u64,
}

impl ContextSummary {
    pub fn new(combined: CombinedContext, total_workouts_created: u64) -> Self {
        let preferences = combined.current_preferences;
        ContextSummary {
            last_workout_title: combined.last_workout_plan.map(|p| p.title),
            current_workout_type: combined.current_workout_type.label().to_string(),
            preferred_workout_types: preferences
                .preferred_workout_types
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            days_per_week: preferences.days_per_week,
            fitness_level: preferences.fitness_level.label().to_string(),
            updating_workout: combined.updating_workout,
            conversation_memory: combined.conversation_memory,
            total_workouts_created,
        }
    }
}

#[derive(uniffi::Object)]
pub struct ScheduledSession {
    title: String,
    start: chrono::NaiveDateTime,
    description: String,
}

#[uniffi::export]
impl ScheduledSession {
    pub fn title(&self) -> String {
        self.title.clone()
    }

    /// Local wall-clock time, `YYYY-MM-DD HH:MM`.
    pub fn start(&self) -> String {
        self.start.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn description(&self) -> String {
        self.description.clone()
    }
}

impl From<ScheduledWorkout> for ScheduledSession {
    fn from(s: ScheduledWorkout) -> Self {
        ScheduledSession {
            title: s.title,
            start: s.start,
            description: s.description,
        }
    }
}
