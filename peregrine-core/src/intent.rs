use crate::extract::contains_any;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    WorkoutRequest,
    ProfileUpdate,
    NutritionAdvice,
    EmotionalSupport,
    DefaultHelp,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::WorkoutRequest,
        Intent::ProfileUpdate,
        Intent::NutritionAdvice,
        Intent::EmotionalSupport,
        Intent::DefaultHelp,
    ];

    /// Same name serde writes for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::WorkoutRequest => "workout_request",
            Intent::ProfileUpdate => "profile_update",
            Intent::NutritionAdvice => "nutrition_advice",
            Intent::EmotionalSupport => "emotional_support",
            Intent::DefaultHelp => "default_help",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Checked top to bottom; the first rule with a keyword in the message wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::WorkoutRequest,
        keywords: &["workout", "exercise", "training"],
    },
    IntentRule {
        intent: Intent::ProfileUpdate,
        keywords: &["weight", "height", "age", "goal"],
    },
    IntentRule {
        intent: Intent::NutritionAdvice,
        keywords: &["nutrition", "diet", "food", "meal"],
    },
    IntentRule {
        intent: Intent::EmotionalSupport,
        keywords: &["sad", "anxious", "tired", "can't"],
    },
];

pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| contains_any(&lowered, rule.keywords))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::DefaultHelp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_wins_over_profile() {
        assert_eq!(
            classify("Workout ideas to lose some weight?"),
            Intent::WorkoutRequest
        );
    }

    #[test]
    fn every_rule_keyword_classifies_to_its_intent() {
        for (position, rule) in INTENT_RULES.iter().enumerate() {
            for keyword in rule.keywords {
                let expected = INTENT_RULES[..=position]
                    .iter()
                    .find(|r| contains_any(keyword, r.keywords))
                    .map(|r| r.intent);
                assert_eq!(Some(classify(keyword)), expected, "keyword {}", keyword);
            }
        }
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(classify("My WEIGHT is 180"), Intent::ProfileUpdate);
        assert_eq!(classify("what's a good meal plan"), Intent::NutritionAdvice);
        assert_eq!(classify("I can't do this"), Intent::EmotionalSupport);
        assert_eq!(classify("I'm so tired today"), Intent::EmotionalSupport);
        // "page" contains "age"
        assert_eq!(classify("open the settings page"), Intent::ProfileUpdate);
    }

    #[test]
    fn display_name_matches_serialized_name() {
        for intent in Intent::ALL {
            assert_eq!(
                serde_json::to_string(&intent).unwrap(),
                format!("\"{}\"", intent)
            );
            let parsed: Intent = serde_json::from_str(&format!("\"{}\"", intent.as_str())).unwrap();
            assert_eq!(parsed, intent);
        }
    }

    #[test]
    fn unmatched_falls_back_to_help() {
        assert_eq!(classify("hello there"), Intent::DefaultHelp);
        assert_eq!(classify(""), Intent::DefaultHelp);
    }
}
