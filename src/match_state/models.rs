use serde::{Deserialize, Serialize};

/// Raw form payload, as typed or selected by the user.
///
/// Nothing is checked yet; see [`MatchInput::into_state`](super::MatchInput::into_state).
/// Names are matched case-sensitively against the catalog after surrounding
/// whitespace is trimmed, so `" Mumbai Indians\n"` resolves but
/// `"mumbai indians"` does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInput {
    pub batting_team: String,
    pub bowling_team: String,
    /// City where the match is being played
    pub city: String,
    /// Runs the batting team must exceed to win
    pub target: i32,
    pub score: i32,
    pub overs: i32,
    pub wickets: i32,
}

/// Second-innings match state for a 20-over game.
///
/// Team and venue names are catalog members. The numeric fields are kept
/// signed and unchecked so that the terminal-state rules see exactly what was
/// entered; range validation happens only for matches still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub target: i32,
    pub score: i32,
    pub overs_completed: i32,
    pub wickets_fallen: i32,
}
