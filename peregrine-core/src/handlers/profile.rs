use super::{Turn, templates};
use crate::extract::contains_any;
use anyhow::Result;

/// Checked in order; the first group found in the message picks the reply.
const ACKNOWLEDGEMENTS: &[(&[&str], &str)] = &[
    (&["weight", "lbs", "pounds"], templates::WEIGHT_UPDATED),
    (&["height", "inches", "tall"], templates::HEIGHT_UPDATED),
    (&["age", "years old"], templates::AGE_UPDATED),
    (&["goal", "want to"], templates::GOALS_UPDATED),
];

pub fn profile_update(turn: &mut Turn<'_>) -> Result<String> {
    turn.collaborators.profile.update_from_text(turn.message);

    let reply = ACKNOWLEDGEMENTS
        .iter()
        .find(|(keywords, _)| contains_any(&turn.lowered, keywords))
        .map(|(_, template)| *template)
        .unwrap_or(templates::PROFILE_HELP);
    Ok(reply.to_string())
}
