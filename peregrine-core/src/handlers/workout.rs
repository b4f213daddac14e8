use super::Turn;
use super::plan::{build_plan, render_plan};
use crate::context::{PreferenceUpdate, WorkoutPlan, WorkoutType};
use crate::extract::contains_any;
use anyhow::Result;
use chrono::{Days, NaiveDateTime, Utc};
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Phrases asking to adjust or repeat the previous plan.
pub const MODIFY_KEYWORDS: &[&str] = &[
    "harder",
    "easier",
    "modify",
    "change",
    "same workout",
    "continue",
];

/// Day offset requested for scheduling, if the message asks for it.
fn requested_day(lowered: &str) -> Option<(u64, &'static str)> {
    if !lowered.contains("schedule") {
        return None;
    }
    if lowered.contains("today") {
        Some((0, "today"))
    } else if lowered.contains("tomorrow") {
        Some((1, "tomorrow"))
    } else {
        None
    }
}

fn schedule(turn: &Turn<'_>, plan: &WorkoutPlan, offset: u64, day: &str) -> String {
    let hour = turn.context.current_preferences.preferred_time.hour();
    let start_on = |offset: u64| -> Option<NaiveDateTime> {
        turn.now
            .date_naive()
            .checked_add_days(Days::new(offset))
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
    };
    let Some(mut start) = start_on(offset) else {
        warn!("Could not build a start time for {} at {}:00", day, hour);
        return "I couldn't work out a time to schedule this workout.".to_string();
    };

    // A slot earlier today is already gone; book the same hour tomorrow.
    let mut day = day;
    let mut note = "";
    if start <= turn.now.naive_local() {
        match start_on(offset + 1) {
            Some(next) => {
                debug!("{} has passed, moving to the next day", start);
                start = next;
                day = "tomorrow";
                note = " since that time has already passed today";
            }
            None => {
                warn!("Could not move past {}", start);
                return "I couldn't work out a time to schedule this workout.".to_string();
            }
        }
    }

    let description = plan
        .exercises
        .iter()
        .map(|e| format!("{}: {}", e.name, e.formatted_sets()))
        .collect::<Vec<_>>()
        .join("\n");

    if turn
        .collaborators
        .calendar
        .schedule_workout(&plan.title, start, &description)
    {
        info!("Scheduled '{}' for {}", plan.title, start);
        format!(
            "📅 I've added **{}** to your calendar for {} at {}{}.",
            plan.title,
            day,
            start.format("%H:%M"),
            note
        )
    } else {
        warn!("Calendar refused to schedule '{}'", plan.title);
        "I couldn't add this workout to your calendar. You can still schedule it yourself."
            .to_string()
    }
}

/// Builds a fresh plan for the requested type, records it and describes it.
pub fn workout_request(turn: &mut Turn<'_>) -> Result<String> {
    let requested = WorkoutType::detect(&turn.lowered);
    if let Some(workout_type) = requested {
        debug!("Workout type requested: {:?}", workout_type);
        turn.session.current_workout_type = Some(workout_type);
        turn.session.note_preferences(&PreferenceUpdate {
            preferred_workout_types: BTreeSet::from([workout_type]),
            ..Default::default()
        });
        turn.persistent.last_workout_type = workout_type;
    }
    let workout_type = requested.unwrap_or(turn.context.current_workout_type);

    let previous = turn
        .context
        .last_workout_plan
        .clone()
        .filter(|_| contains_any(&turn.lowered, MODIFY_KEYWORDS));
    turn.session.updating_workout = previous.is_some();

    let plan = turn.collaborators.workout_plans.create(build_plan(
        workout_type,
        &turn.context.current_preferences,
    ));
    turn.persistent
        .record_workout(plan.clone(), turn.now.with_timezone(&Utc));
    turn.persistent.last_workout_plan = Some(plan.clone());
    turn.session.last_workout_plan = Some(plan.clone());
    turn.mark_persistent_changed();

    let mut reply = String::new();
    if let Some(previous) = &previous {
        reply.push_str(&format!(
            "Building on your last workout, **{}**.\n\n",
            previous.title
        ));
    }
    reply.push_str(&render_plan(&plan));
    if let Some((offset, day)) = requested_day(&turn.lowered) {
        reply.push_str("\n\n");
        reply.push_str(&schedule(turn, &plan, offset, day));
    }
    Ok(reply)
}
