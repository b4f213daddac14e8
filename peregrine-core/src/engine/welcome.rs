use crate::context::PersistentContext;

fn join_or<I, S>(items: I, fallback: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

/// Opening message for a returning user, or `None` when there is nothing to
/// build on yet.
pub fn contextual_welcome(context: &PersistentContext) -> Option<String> {
    let preferred = join_or(
        context
            .preferences
            .preferred_workout_types
            .iter()
            .map(|t| t.label()),
        "general workouts",
    );

    if let Some(last) = context.workout_history.latest() {
        return Some(format!(
            "**Welcome back!** 👋

I remember your last workout: **{}**
- Target areas: {}
- Equipment: {}

**What would you like to do?**
• **Continue with this plan** - Say \"same workout\"
• **Modify it** - Say \"make the workout harder\" or \"an easier workout\"
• **Create something new** - Ask for a different type of workout
• **Build on your preferences** - I remember you like {}

I'm here to help you build on your fitness journey! 💪",
            last.title,
            join_or(&last.target_muscle_groups, "full body"),
            join_or(&last.equipment, "none"),
            preferred,
        ));
    }

    if !context.preferences.preferred_workout_types.is_empty() {
        return Some(format!(
            "**Welcome back!** 👋

I remember your preferences:
- You like to focus on: {}
- Preferred workout type: {}
- Equipment available: {}

**Let's create a workout that builds on what you enjoy!**
Say something like \"give me a workout\"",
            preferred,
            context.last_workout_type.label(),
            join_or(
                context.preferences.available_equipment.iter().map(|e| e.label()),
                "none listed"
            ),
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Equipment, WorkoutPlan, WorkoutType};
    use chrono::Utc;
    use std::collections::BTreeSet;

    #[test]
    fn fresh_context_has_no_welcome() {
        assert_eq!(contextual_welcome(&PersistentContext::default()), None);
    }

    #[test]
    fn history_welcome_describes_last_plan() {
        let mut context = PersistentContext::default();
        context.record_workout(
            WorkoutPlan {
                title: "Leg Blast".to_string(),
                target_muscle_groups: BTreeSet::from(["glutes".to_string(), "legs".to_string()]),
                equipment: BTreeSet::from(["dumbbells".to_string()]),
                exercises: vec![],
                ..Default::default()
            },
            Utc::now(),
        );
        let welcome = contextual_welcome(&context).unwrap();
        assert!(welcome.contains("**Leg Blast**"));
        assert!(welcome.contains("Target areas: glutes, legs"));
        assert!(welcome.contains("Equipment: dumbbells"));
        assert!(welcome.contains("you like Strength Training"));
    }

    #[test]
    fn preferences_welcome_without_history() {
        let mut context = PersistentContext::default();
        context.preferences.preferred_workout_types = BTreeSet::from([WorkoutType::Yoga]);
        context.preferences.available_equipment = BTreeSet::from([Equipment::YogaMat]);
        context.last_workout_type = WorkoutType::Yoga;
        let welcome = contextual_welcome(&context).unwrap();
        assert!(welcome.contains("You like to focus on: Yoga"));
        assert!(welcome.contains("Equipment available: Yoga Mat"));
    }
}
