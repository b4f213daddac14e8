use crate::context::{Exercise, WorkoutPlan, WorkoutPreferences, WorkoutType};
use std::collections::BTreeSet;
use std::fmt::Write;

const WARM_UP_MINUTES: u32 = 5;
const COOL_DOWN_MINUTES: u32 = 5;

fn exercises_for(workout_type: WorkoutType) -> Vec<Exercise> {
    match workout_type {
        WorkoutType::Strength => vec![
            Exercise::reps("Push-ups", 3, 10, "chest"),
            Exercise::reps("Squats", 3, 15, "legs"),
            Exercise::timed("Plank", 3, 30, "core"),
            Exercise::reps("Lunges", 3, 10, "legs"),
        ],
        WorkoutType::Cardio => vec![
            Exercise::timed("Jumping Jacks", 3, 60, "full body"),
            Exercise::timed("Burpees", 3, 45, "full body"),
        ],
        WorkoutType::Yoga => vec![
            Exercise::timed("Sun Salutation", 3, 120, "full body"),
            Exercise::timed("Warrior II", 2, 45, "legs"),
            Exercise::timed("Child's Pose", 2, 60, "back"),
        ],
        WorkoutType::Hiit => vec![Exercise::timed("High Intensity Intervals", 8, 30, "full body")],
        WorkoutType::Pilates => vec![
            Exercise::timed("Hundred", 1, 60, "core"),
            Exercise::reps("Roll-ups", 2, 8, "core"),
        ],
        WorkoutType::Running => vec![Exercise::timed("Interval Running", 5, 300, "cardio")],
        WorkoutType::Cycling => vec![Exercise::timed("Cycling Intervals", 4, 600, "cardio")],
        WorkoutType::Swimming => vec![Exercise::timed("Swimming Laps", 4, 300, "full body")],
        WorkoutType::Boxing => vec![Exercise::timed("Shadow Boxing", 3, 180, "upper body")],
        WorkoutType::Dance => vec![Exercise::timed("Dance Cardio", 1, 1200, "full body")],
    }
}

fn target_groups(workout_type: WorkoutType) -> &'static [&'static str] {
    match workout_type {
        WorkoutType::Strength => &["full body", "core", "upper body", "lower body"],
        WorkoutType::Cardio | WorkoutType::Hiit => &["cardio", "full body"],
        WorkoutType::Yoga => &["flexibility", "balance", "mobility"],
        WorkoutType::Pilates => &["core", "flexibility", "balance"],
        WorkoutType::Running | WorkoutType::Cycling => &["cardio", "lower body"],
        WorkoutType::Swimming => &["full body", "cardio"],
        WorkoutType::Boxing => &["upper body", "core", "cardio"],
        WorkoutType::Dance => &["full body", "cardio", "coordination"],
    }
}

fn equipment_for(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Yoga | WorkoutType::Pilates => "yoga mat",
        WorkoutType::Cycling => "stationary bike",
        _ => "none",
    }
}

/// Plan for `workout_type`, sized and titled from the user's preferences.
pub fn build_plan(workout_type: WorkoutType, preferences: &WorkoutPreferences) -> WorkoutPlan {
    WorkoutPlan {
        title: format!(
            "{} {} Workout",
            preferences.fitness_level.label(),
            workout_type.label()
        ),
        target_muscle_groups: target_groups(workout_type)
            .iter()
            .map(|g| g.to_string())
            .collect(),
        equipment: BTreeSet::from([equipment_for(workout_type).to_string()]),
        exercises: exercises_for(workout_type),
        workout_type: Some(workout_type),
        duration_minutes: preferences.workout_duration.minutes(),
    }
}

pub fn render_plan(plan: &WorkoutPlan) -> String {
    let main_minutes = plan
        .duration_minutes
        .saturating_sub(WARM_UP_MINUTES + COOL_DOWN_MINUTES);

    let mut out = format!(
        "**Here's a great workout for you!** 💪\n\n**{}**\n\n",
        plan.title
    );
    let _ = write!(
        out,
        "**Warm-up ({} minutes):**\n• Light jogging in place\n• Arm circles\n• Hip rotations\n\n",
        WARM_UP_MINUTES
    );
    let _ = writeln!(out, "**Main Workout ({} minutes):**", main_minutes);
    for exercise in &plan.exercises {
        let _ = writeln!(out, "• {}: {}", exercise.name, exercise.formatted_sets());
    }
    let _ = write!(
        out,
        "\n**Cool-down ({} minutes):**\n• Stretching exercises\n• Deep breathing\n\n",
        COOL_DOWN_MINUTES
    );
    let _ = write!(
        out,
        "**Total Time:** {} minutes\n\nWould you like me to modify this workout or create a different type of plan?",
        plan.duration_minutes
    );
    out
}
