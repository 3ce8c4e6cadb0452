//! Terminal-state rules for a second innings.
//!
//! The rules are a simplification of real cricket scoring (no rain rules, no
//! par scores). They are applied literally and in a fixed order; the first
//! rule that matches decides the outcome.

use serde::Serialize;

use crate::error::InputError;
use crate::match_state::MatchState;

/// Total overs in the format.
pub const MAX_OVERS: i32 = 20;
/// Wickets that end an innings.
pub const MAX_WICKETS: i32 = 10;
/// Highest target accepted for prediction.
pub const MAX_TARGET: i32 = 300;

/// What the classifier decided about a match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The chasing side has passed the target.
    BattingTeamWon,
    /// One run short with all overs bowled.
    Drawn,
    /// All out more than one run short.
    BowlingTeamWon,
    /// All out exactly one run short.
    Tied,
    /// The same team was picked for both sides.
    IdenticalTeams,
    /// Nothing decided yet; eligible for prediction once the ranges check out.
    InProgress,
}

/// Decide whether the match has already concluded.
pub fn classify(state: &MatchState) -> Outcome {
    // Widened so an extreme target cannot overflow
    let score = i64::from(state.score);
    let one_short = i64::from(state.target) - 1;

    if state.score > state.target {
        Outcome::BattingTeamWon
    } else if score == one_short && state.overs_completed == MAX_OVERS {
        Outcome::Drawn
    } else if state.wickets_fallen == MAX_WICKETS && score < one_short {
        Outcome::BowlingTeamWon
    } else if state.wickets_fallen == MAX_WICKETS && score == one_short {
        Outcome::Tied
    } else if state.batting_team == state.bowling_team {
        Outcome::IdenticalTeams
    } else {
        Outcome::InProgress
    }
}

/// Range checks for a match still in progress. Every violation is reported.
pub fn validate_ranges(state: &MatchState) -> Result<(), InputError> {
    let mut errors = Vec::new();

    if !(0..=MAX_TARGET).contains(&state.target) {
        errors.push(InputError::TargetOutOfRange(state.target));
    }
    if state.score < 0 {
        errors.push(InputError::NegativeScore(state.score));
    }
    if !(0..=MAX_OVERS).contains(&state.overs_completed) {
        errors.push(InputError::OversOutOfRange(state.overs_completed));
    }
    if !(0..=MAX_WICKETS).contains(&state.wickets_fallen) {
        errors.push(InputError::WicketsOutOfRange(state.wickets_fallen));
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(InputError::Multiple(errors)),
    }
}
