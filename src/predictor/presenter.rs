use std::fmt;

use serde::Serialize;

use crate::match_state::MatchState;

use super::classifier::Outcome;
use super::oracle::Prediction;

/// Text ready to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rendered {
    /// The match is decided, or the selection is invalid.
    Status { outcome: Outcome, message: String },
    /// Rounded percentages for both sides.
    Probabilities {
        batting_team: String,
        win_percent: i64,
        bowling_team: String,
        loss_percent: i64,
    },
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Status { message, .. } => write!(f, "{}", message),
            Rendered::Probabilities {
                batting_team,
                win_percent,
                bowling_team,
                loss_percent,
            } => write!(
                f,
                "{} - {}%\n{} - {}%",
                batting_team, win_percent, bowling_team, loss_percent
            ),
        }
    }
}

/// Message for a decided match. `None` while the match is in progress.
pub fn render_outcome(outcome: Outcome, state: &MatchState) -> Option<Rendered> {
    let message = match outcome {
        Outcome::BattingTeamWon => format!("{} won the match", state.batting_team),
        Outcome::Drawn => "Match Drawn".to_string(),
        Outcome::BowlingTeamWon => format!("{} won the match", state.bowling_team),
        Outcome::Tied => "Match tied".to_string(),
        Outcome::IdenticalTeams => "To proceed, please select different teams because no match can be played between the same teams".to_string(),
        Outcome::InProgress => return None,
    };
    Some(Rendered::Status { outcome, message })
}

pub fn render_prediction(state: &MatchState, prediction: Prediction) -> Rendered {
    Rendered::Probabilities {
        batting_team: state.batting_team.clone(),
        win_percent: percent(prediction.win),
        bowling_team: state.bowling_team.clone(),
        loss_percent: percent(prediction.loss),
    }
}

/// Whole percent, halves rounded to even.
fn percent(p: f64) -> i64 {
    (p * 100.0).round_ties_even() as i64
}
