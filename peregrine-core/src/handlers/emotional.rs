use super::{Turn, templates};
use crate::extract::contains_any;
use anyhow::Result;

const SUPPORT_RESPONSES: &[(&[&str], &str)] = &[
    (&["sad", "depressed", "down"], templates::SUPPORT_LOW_MOOD),
    (&["anxious", "stressed", "worried"], templates::SUPPORT_ANXIETY),
    (&["tired", "exhausted", "fatigue"], templates::SUPPORT_FATIGUE),
    (&["can't", "don't want to", "give up"], templates::SUPPORT_DISCOURAGED),
];

pub fn emotional_support(turn: &mut Turn<'_>) -> Result<String> {
    let reply = SUPPORT_RESPONSES
        .iter()
        .find(|(keywords, _)| contains_any(&turn.lowered, keywords))
        .map(|(_, template)| *template)
        .unwrap_or(templates::SUPPORT_GENERAL);
    Ok(reply.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::Collaborators;
    use crate::context::{PersistentContext, SessionContext};
    use chrono::Local;

    fn support(text: &str) -> String {
        let mut persistent = PersistentContext::default();
        let mut session = SessionContext::default();
        let collaborators = Collaborators::in_memory();
        let mut turn = Turn::new(text, &mut persistent, &mut session, &collaborators, Local::now());
        emotional_support(&mut turn).unwrap()
    }

    #[test]
    fn picks_template_by_feeling() {
        assert_eq!(support("I feel so sad"), templates::SUPPORT_LOW_MOOD);
        assert_eq!(support("I'm anxious about tomorrow"), templates::SUPPORT_ANXIETY);
        assert_eq!(support("I'm tired"), templates::SUPPORT_FATIGUE);
        assert_eq!(support("I can't keep going"), templates::SUPPORT_DISCOURAGED);
    }

    #[test]
    fn earlier_groups_take_priority() {
        assert_eq!(support("I'm sad and tired"), templates::SUPPORT_LOW_MOOD);
    }

    #[test]
    fn unmatched_feeling_gets_general_support() {
        assert_eq!(support("meh"), templates::SUPPORT_GENERAL);
    }
}
