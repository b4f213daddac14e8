//! Services the engine reads and writes while handling a message. The app
//! supplies real implementations; the in-memory ones here back tests, the CLI
//! and FFI sessions that have nothing better.

use crate::context::WorkoutPlan;
use crate::extract::{contains_any, extract_number, matching_keywords};
use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

const WEIGHT_RANGE: RangeInclusive<u32> = 1..=500;
const HEIGHT_RANGE: RangeInclusive<u32> = 1..=100;
const AGE_RANGE: RangeInclusive<u32> = 1..=120;

pub const EQUIPMENT_KEYWORDS: &[&str] = &[
    "dumbbells",
    "barbell",
    "kettlebell",
    "resistance bands",
    "pull-up bar",
    "bench",
];

pub const GOAL_KEYWORDS: &[&str] = &[
    "lose weight",
    "build muscle",
    "improve endurance",
    "get stronger",
    "stay healthy",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    /// Pounds.
    pub weight: u32,
    /// Inches.
    pub height: u32,
    pub body_fat_percentage: f64,
    pub equipment: Vec<String>,
    pub fitness_level: String,
    pub goals: Vec<String>,
    pub daily_calorie_goal: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            age: 25,
            weight: 150,
            height: 170,
            body_fat_percentage: 15.0,
            equipment: Vec::new(),
            fitness_level: "Intermediate".to_string(),
            goals: Vec::new(),
            daily_calorie_goal: 2000,
        }
    }
}

pub trait ProfileManager: Send + Sync {
    fn set_weight(&self, pounds: u32);
    fn set_height(&self, inches: u32);
    fn set_age(&self, years: u32);
    fn set_calorie_goal(&self, calories: u32);
    fn set_equipment(&self, equipment: Vec<String>);
    fn set_goals(&self, goals: Vec<String>);
    fn snapshot(&self) -> Profile;

    /// Applies whatever profile facts can be read out of a chat message.
    /// Anything missing or out of range leaves the field as it was.
    fn update_from_text(&self, text: &str) {
        let lowered = text.to_lowercase();
        let number = extract_number(text);

        if contains_any(&lowered, &["lbs", "pounds"]) {
            if let Some(weight) = number.filter(|n| WEIGHT_RANGE.contains(n)) {
                self.set_weight(weight);
            }
        }
        if contains_any(&lowered, &["inches", "tall"]) {
            if let Some(height) = number.filter(|n| HEIGHT_RANGE.contains(n)) {
                self.set_height(height);
            }
        }
        if contains_any(&lowered, &["age", "years old"]) {
            if let Some(age) = number.filter(|n| AGE_RANGE.contains(n)) {
                self.set_age(age);
            }
        }
        if contains_any(&lowered, &["calorie", "kcal"]) {
            if let Some(calories) = number.filter(|n| *n > 0) {
                self.set_calorie_goal(calories);
            }
        }
        if contains_any(&lowered, &["equipment", "have"]) {
            let found = matching_keywords(&lowered, EQUIPMENT_KEYWORDS);
            if !found.is_empty() {
                self.set_equipment(found.into_iter().map(String::from).collect());
            }
        }
        if contains_any(&lowered, &["goal", "want to"]) {
            let found = matching_keywords(&lowered, GOAL_KEYWORDS);
            if !found.is_empty() {
                self.set_goals(found.into_iter().map(String::from).collect());
            }
        }
    }
}

pub trait CalendarManager: Send + Sync {
    /// Returns false when the event could not be created.
    fn schedule_workout(&self, title: &str, start: NaiveDateTime, description: &str) -> bool;
}

pub trait WorkoutPlanManager: Send + Sync {
    fn list(&self) -> Vec<WorkoutPlan>;
    fn create(&self, plan: WorkoutPlan) -> WorkoutPlan;
}

#[derive(Debug, Default)]
pub struct InMemoryProfile {
    profile: RwLock<Profile>,
}

impl InMemoryProfile {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile: RwLock::new(profile),
        }
    }

    fn edit(&self, f: impl FnOnce(&mut Profile)) {
        let mut profile = self.profile.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut profile);
    }
}

impl ProfileManager for InMemoryProfile {
    fn set_weight(&self, pounds: u32) {
        debug!("Profile weight -> {}", pounds);
        self.edit(|p| p.weight = pounds);
    }

    fn set_height(&self, inches: u32) {
        debug!("Profile height -> {}", inches);
        self.edit(|p| p.height = inches);
    }

    fn set_age(&self, years: u32) {
        debug!("Profile age -> {}", years);
        self.edit(|p| p.age = years);
    }

    fn set_calorie_goal(&self, calories: u32) {
        self.edit(|p| p.daily_calorie_goal = calories);
    }

    fn set_equipment(&self, equipment: Vec<String>) {
        self.edit(|p| p.equipment = equipment);
    }

    fn set_goals(&self, goals: Vec<String>) {
        self.edit(|p| p.goals = goals);
    }

    fn snapshot(&self) -> Profile {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub title: String,
    pub start: NaiveDateTime,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    events: Mutex<Vec<ScheduledWorkout>>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScheduledWorkout> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CalendarManager for InMemoryCalendar {
    fn schedule_workout(&self, title: &str, start: NaiveDateTime, description: &str) -> bool {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScheduledWorkout {
                title: title.to_string(),
                start,
                description: description.to_string(),
            });
        true
    }
}

#[derive(Debug, Default)]
pub struct InMemoryWorkoutPlans {
    plans: Mutex<Vec<WorkoutPlan>>,
}

impl InMemoryWorkoutPlans {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkoutPlanManager for InMemoryWorkoutPlans {
    fn list(&self) -> Vec<WorkoutPlan> {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn create(&self, plan: WorkoutPlan) -> WorkoutPlan {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(plan.clone());
        plan
    }
}

/// The capability set handed to the engine at construction.
#[derive(Clone)]
pub struct Collaborators {
    pub profile: Arc<dyn ProfileManager>,
    pub calendar: Arc<dyn CalendarManager>,
    pub workout_plans: Arc<dyn WorkoutPlanManager>,
}

impl Collaborators {
    pub fn in_memory() -> Self {
        Self {
            profile: Arc::new(InMemoryProfile::default()),
            calendar: Arc::new(InMemoryCalendar::new()),
            workout_plans: Arc::new(InMemoryWorkoutPlans::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updated(text: &str) -> Profile {
        let profile = InMemoryProfile::default();
        profile.update_from_text(text);
        profile.snapshot()
    }

    #[test]
    fn weight_needs_a_unit() {
        assert_eq!(updated("My weight is 165 lbs").weight, 165);
        assert_eq!(updated("I weigh 170 pounds").weight, 170);
        assert_eq!(updated("my weight is 165").weight, 150);
    }

    #[test]
    fn out_of_range_values_are_ignored() {
        assert_eq!(updated("I lifted 900 lbs").weight, 150);
        assert_eq!(updated("I'm 0 years old").age, 25);
        assert_eq!(updated("I'm 300 inches tall").height, 170);
    }

    #[test]
    fn height_skips_feet() {
        assert_eq!(updated("I'm 5'8\" tall").height, 8);
        assert_eq!(updated("I'm 70 inches").height, 70);
    }

    #[test]
    fn age_and_calories() {
        let profile = updated("I'm 31 years old");
        assert_eq!(profile.age, 31);
        assert_eq!(updated("set my calorie goal to 1800").daily_calorie_goal, 1800);
    }

    #[test]
    fn equipment_and_goals_replace_lists() {
        let profile = InMemoryProfile::default();
        profile.update_from_text("I have dumbbells and a bench");
        profile.update_from_text("My goal: I want to build muscle and get stronger");
        let snapshot = profile.snapshot();
        assert_eq!(snapshot.equipment, vec!["dumbbells", "bench"]);
        assert_eq!(snapshot.goals, vec!["build muscle", "get stronger"]);

        profile.update_from_text("I have a kettlebell");
        assert_eq!(profile.snapshot().equipment, vec!["kettlebell"]);
    }

    #[test]
    fn no_numbers_changes_nothing() {
        assert_eq!(updated("update my weight please"), Profile::default());
    }

    #[test]
    fn in_memory_calendar_records_events() {
        let calendar = InMemoryCalendar::new();
        let start = chrono::NaiveDate::from_ymd_opt(2026, 10, 17)
            .and_then(|d| d.and_hms_opt(18, 0, 0))
            .unwrap();
        assert!(calendar.schedule_workout("Leg Day", start, "squats"));
        assert_eq!(calendar.events().len(), 1);
        assert_eq!(calendar.events()[0].start, start);
    }
}
